mod encrypt;
mod decrypt;

pub mod crypto;
pub mod format;
pub mod fs;
pub mod mode;
pub mod error;

pub use decrypt::{Decrypted, VerifyPolicy};
pub use error::BfileError;
pub use mode::{Mode, Outcome, ProcessOptions, process_file};

use std::path::Path;

/// 加密明文，`internal_path` 参与密钥派生但不写入输出
pub fn encrypt(plaintext: &[u8], internal_path: &str) -> Result<Vec<u8>, BfileError> {
    encrypt::encrypt_bytes(plaintext, internal_path)
}

/// 解密容器；HMAC 不一致时只警告（见 [`VerifyPolicy::Warn`]）
pub fn decrypt(container: &[u8], internal_path: &str) -> Result<Decrypted, BfileError> {
    decrypt::decrypt_bytes(container, internal_path, VerifyPolicy::default())
}

pub fn decrypt_with_policy(
    container: &[u8],
    internal_path: &str,
    policy: VerifyPolicy,
) -> Result<Decrypted, BfileError> {
    decrypt::decrypt_bytes(container, internal_path, policy)
}

pub fn encrypt_file(
    input: &Path,
    output: &Path,
    internal_path: &str,
) -> Result<(), BfileError> {
    encrypt::encrypt_file(input, output, internal_path)
}

pub fn decrypt_file(
    input: &Path,
    output: &Path,
    internal_path: &str,
    policy: VerifyPolicy,
) -> Result<bool, BfileError> {
    decrypt::decrypt_file(input, output, internal_path, policy)
}
