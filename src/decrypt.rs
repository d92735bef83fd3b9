//! bfile 解密流程实现
//!
//! 解密流程（严格顺序）：
//! 1. 校验容器长度并拆分字段（不合法立即报错，不做任何密码学运算）
//! 2. 由容器中的 salt + 内部路径派生密钥
//! 3. 重新计算 HMAC 并以常量时间比较
//! 4. AES-CBC 解密并去除填充
//!
//! HMAC 不一致时的处理由 [`VerifyPolicy`] 决定：
//! - `Warn`（默认）：记录警告，继续解密，结果中 `verified == false`
//! - `Strict`：直接返回 `BfileError::MacMismatch`，不输出任何明文

use std::path::Path;

use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::crypto::{cipher, hash, kdf};
use crate::error::BfileError;
use crate::format::container::Container;
use crate::fs::atomic::write_atomic;

/// HMAC 校验失败时的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerifyPolicy {
    /// 只警告，仍然输出解密结果
    #[default]
    Warn,
    /// 校验失败即终止
    Strict,
}

/// 解密结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decrypted {
    pub plaintext: Vec<u8>,
    /// HMAC 是否一致
    pub verified: bool,
}

pub fn decrypt_bytes(
    container: &[u8],
    internal_path: &str,
    policy: VerifyPolicy,
) -> Result<Decrypted, BfileError> {
    // ---------- 拆分容器 ----------
    let container = Container::parse(container)?;

    // ---------- 派生密钥 ----------
    let key = kdf::derive_key(&container.salt, internal_path.as_bytes())?;

    // ---------- 校验 HMAC ----------
    let computed = hash::hash(&container.authenticated_parts(), Some(key.mac_key()))?;
    let verified: bool = computed[..].ct_eq(&container.mac[..]).into();

    if !verified {
        match policy {
            VerifyPolicy::Strict => return Err(BfileError::MacMismatch),
            VerifyPolicy::Warn => {
                warn!(internal_path, "HMAC check failed, decrypted data might not be valid");
            }
        }
    }

    // ---------- 解密 ----------
    let plaintext = cipher::decrypt(key.cipher_key(), &container.iv, container.ciphertext)?;

    debug!(
        ciphertext_len = container.ciphertext.len(),
        plaintext_len = plaintext.len(),
        verified,
        "decrypted bfile payload"
    );

    Ok(Decrypted {
        plaintext,
        verified,
    })
}

/// 解密文件，返回 HMAC 是否一致
///
/// 发生致命错误时不会创建或改动输出文件。
pub fn decrypt_file(
    input_path: &Path,
    output_path: &Path,
    internal_path: &str,
    policy: VerifyPolicy,
) -> Result<bool, BfileError> {
    let container = std::fs::read(input_path)?;
    let decrypted = decrypt_bytes(&container, internal_path, policy)?;

    write_atomic(output_path, |file| {
        use std::io::Write;
        file.write_all(&decrypted.plaintext)
    })?;

    Ok(decrypted.verified)
}
