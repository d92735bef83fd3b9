//! bfile 命令行入口
//!
//! 用法：
//!   bfile <file-path> <internal-file-path> [--output <path>] [--strict] [-v]
//!
//! 示例：
//!   bfile D:\english.bfile strings/english.lang
//!
//! - 输入为 .bfile 时解密到 <file-path>.dec
//! - 否则加密到 <file-path>.bfile
//! - 解密必须使用加密时的内部路径，否则 HMAC 校验失败

use std::path::PathBuf;
use std::process::exit;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bfile::{Mode, ProcessOptions, VerifyPolicy, process_file};

#[derive(Debug, Parser)]
#[command(name = "bfile", version, about = "Encrypt or decrypt a single .bfile resource")]
struct Cli {
    /// 输入文件；.bfile 后缀时解密，否则加密
    file_path: PathBuf,

    /// 资源在包内的路径，例如 strings/english.lang
    internal_path: String,

    /// 输出路径（默认在输入文件名后追加 .dec / .bfile）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// HMAC 校验失败时拒绝输出
    #[arg(long)]
    strict: bool,

    /// 日志详细程度（可重复）；设置 RUST_LOG 时以其为准
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = ProcessOptions {
        output: cli.output,
        policy: if cli.strict {
            VerifyPolicy::Strict
        } else {
            VerifyPolicy::Warn
        },
    };

    let mode = Mode::detect(&cli.file_path);
    let outcome = process_file(&cli.file_path, &cli.internal_path, &options).with_context(|| {
        format!(
            "{mode} of {} failed (did you use the correct internal file path?)",
            cli.file_path.display()
        )
    })?;

    if !outcome.verified {
        eprintln!("Warning: HMAC check failed, decrypted data might not be valid!");
    }

    println!(
        "{} succeeded! Wrote to {}",
        capitalize(&outcome.mode.to_string()),
        outcome.output.display()
    );

    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        exit(1);
    }
}
