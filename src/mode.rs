//! 按文件后缀选择加密或解密，并决定输出路径
//!
//! - `.bfile` / `.bfile;binaryfile`（不区分大小写）→ 解密，输出 `<原文件名>.dec`
//! - 其他任何文件 → 加密，输出 `<原文件名>.bfile`

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::decrypt::{VerifyPolicy, decrypt_file};
use crate::encrypt::encrypt_file;
use crate::error::BfileError;

const ENCRYPTED_EXTS: [&str; 2] = ["bfile", "bfile;binaryfile"];
const ENCRYPTED_SUFFIX: &str = "bfile";
const DECRYPTED_SUFFIX: &str = "dec";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl Mode {
    /// 根据输入文件后缀判断模式
    pub fn detect(path: &Path) -> Self {
        let is_encrypted = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .is_some_and(|ext| ENCRYPTED_EXTS.contains(&ext.as_str()));

        if is_encrypted {
            Self::Decrypt
        } else {
            Self::Encrypt
        }
    }

    /// 默认输出路径：在完整文件名后追加后缀
    pub fn output_path(self, input: &Path) -> PathBuf {
        let suffix = match self {
            Self::Encrypt => ENCRYPTED_SUFFIX,
            Self::Decrypt => DECRYPTED_SUFFIX,
        };

        let mut name = OsString::from(input.as_os_str());
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encrypt => f.write_str("encryption"),
            Self::Decrypt => f.write_str("decryption"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// 覆盖默认输出路径
    pub output: Option<PathBuf>,
    pub policy: VerifyPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub mode: Mode,
    pub output: PathBuf,
    /// 加密时恒为 true
    pub verified: bool,
}

/// 处理单个文件：判断模式、选择输出路径、执行加密或解密
pub fn process_file(
    input: &Path,
    internal_path: &str,
    options: &ProcessOptions,
) -> Result<Outcome, BfileError> {
    let mode = Mode::detect(input);
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| mode.output_path(input));

    info!(%mode, input = %input.display(), output = %output.display(), "processing file");

    let verified = match mode {
        Mode::Encrypt => {
            encrypt_file(input, &output, internal_path)?;
            true
        }
        Mode::Decrypt => decrypt_file(input, &output, internal_path, options.policy)?,
    };

    Ok(Outcome {
        mode,
        output,
        verified,
    })
}
