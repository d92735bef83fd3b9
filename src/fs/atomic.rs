//! 原子写入工具。
//!
//! 先把结果完整写入同目录下的临时文件，成功后再 rename 到目标路径。
//! 加/解密中途失败时，目标文件保持原样，不会出现被截断的输出。

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// 原子写文件。
///
/// `write_fn` 返回错误时删除临时文件并原样返回该错误。
pub fn write_atomic<F>(target: &Path, write_fn: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let file_name = target.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "target path has no file name")
    })?;

    // 相对路径的 parent 可能是空路径，即当前目录
    let parent = target.parent().unwrap_or_else(|| Path::new(""));
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = tmp_path_for(parent, &file_name.to_string_lossy());
    let mut tmp_file = File::create(&tmp_path)?;

    let written = write_fn(&mut tmp_file).and_then(|()| tmp_file.sync_all());
    drop(tmp_file);

    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    if target.exists() {
        fs::remove_file(target)?;
    }

    if let Err(err) = fs::rename(&tmp_path, target) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    Ok(())
}

fn tmp_path_for(parent: &Path, base_name: &str) -> PathBuf {
    let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);

    parent.join(format!(
        ".{base_name}.tmp-{}-{counter}",
        std::process::id()
    ))
}
