//! bfile 加密流程实现
//!
//! 加密流程（严格顺序）：
//! 1. 生成 salt 与 IV
//! 2. 由 salt + 内部路径派生密钥
//! 3. AES-CBC 加密明文
//! 4. 对 salt ‖ IV ‖ 密文计算 HMAC
//! 5. 输出 salt ‖ IV ‖ 密文 ‖ HMAC
//!
//! 注意：
//! - 内部路径不会写入容器
//! - 整个文件在内存中处理，不做流式加密

use std::path::Path;

use rand::{RngCore, rngs::OsRng};
use tracing::debug;

use crate::crypto::cipher::{self, IV_SIZE};
use crate::crypto::hash;
use crate::crypto::kdf::{self, generate_salt};
use crate::error::BfileError;
use crate::format::container::{Container, MAC_SIZE};
use crate::fs::atomic::write_atomic;

/// 加密明文，返回完整容器
pub fn encrypt_bytes(plaintext: &[u8], internal_path: &str) -> Result<Vec<u8>, BfileError> {
    // ---------- 生成 salt / IV ----------
    let salt = generate_salt();

    let mut iv = [0u8; IV_SIZE];
    OsRng.fill_bytes(&mut iv);

    // ---------- 派生密钥 ----------
    let key = kdf::derive_key(&salt, internal_path.as_bytes())?;

    // ---------- 加密 ----------
    let ciphertext = cipher::encrypt(key.cipher_key(), &iv, plaintext)?;

    // ---------- HMAC ----------
    let mut container = Container {
        salt,
        iv,
        ciphertext: &ciphertext,
        mac: [0u8; MAC_SIZE],
    };
    let mac = hash::hash(&container.authenticated_parts(), Some(key.mac_key()))?;
    container.mac = mac;

    debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "encrypted bfile payload"
    );

    Ok(container.to_bytes())
}

/// 加密文件
///
/// 输出通过临时文件原子写入，失败时不会留下半成品。
pub fn encrypt_file(
    input_path: &Path,
    output_path: &Path,
    internal_path: &str,
) -> Result<(), BfileError> {
    let plaintext = std::fs::read(input_path)?;
    let container = encrypt_bytes(&plaintext, internal_path)?;

    write_atomic(output_path, |file| {
        use std::io::Write;
        file.write_all(&container)
    })?;

    Ok(())
}
