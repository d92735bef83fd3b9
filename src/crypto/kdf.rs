//! 密钥派生（KDF）模块
//!
//! 派生方式：
//!   key = SHA-256(salt ‖ STATIC_CONTEXT ‖ internal_path)
//!
//! - salt 每次加密随机生成，明文存放在容器头部
//! - internal_path 不写入容器，解密时必须由调用方给出与加密时完全一致的值
//! - 同一组 (salt, internal_path) 总是得到同一把密钥
//!
//! 输出的 32 字节密钥整体作为 HMAC 密钥，前 16 字节作为 AES 密钥。

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroizing;

use crate::crypto::cipher::CIPHER_KEY_SIZE;
use crate::crypto::hash;
use crate::error::BfileError;

/// 派生密钥长度
pub const KEY_LEN: usize = 32;

/// salt 长度
pub const SALT_SIZE: usize = 12;

/// 参与派生的固定上下文（含结尾的 NUL，共 10 字节）
///
/// 仅用于区分命名空间，不是秘密。
pub const STATIC_CONTEXT: &[u8; 10] = b"swapTeam\n\0";

/// 单次加/解密使用的派生密钥
///
/// 离开作用域后自动清零。
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    /// HMAC 使用完整的 32 字节
    pub fn mac_key(&self) -> &[u8] {
        &self.0[..]
    }

    /// AES 只使用前 16 字节
    pub fn cipher_key(&self) -> &[u8] {
        &self.0[..CIPHER_KEY_SIZE]
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DerivedKey").field(&"[REDACTED]").finish()
    }
}

/// 生成随机 salt
///
/// 每个容器都必须使用独立的 salt。
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// 根据 salt 与内部路径派生密钥
pub fn derive_key(salt: &[u8; SALT_SIZE], internal_path: &[u8]) -> Result<DerivedKey, BfileError> {
    let digest = hash::hash(&[&salt[..], &STATIC_CONTEXT[..], internal_path], None)?;
    Ok(DerivedKey(Zeroizing::new(digest)))
}
