//! SHA-256 / HMAC-SHA256 摘要原语
//!
//! 对若干个字节片段按顺序拼接后求摘要：
//! - 提供 secret 时计算 HMAC-SHA256（以 secret 为密钥）
//! - 不提供 secret 时计算普通 SHA-256
//!
//! 片段逐个喂入哈希状态，不会真的在内存里拼接；
//! 空片段不产生任何贡献。

use hmac::{Hmac, Mac};
use sha2::{Digest as _, Sha256};

use crate::error::BfileError;

type HmacSha256 = Hmac<Sha256>;

/// 摘要长度（SHA-256 / HMAC-SHA256 均为 32 字节）
pub const DIGEST_SIZE: usize = 32;

pub type Digest = [u8; DIGEST_SIZE];

/// 对 `parts` 按顺序求摘要
///
/// #### 参数
/// - `parts`：按顺序拼接的输入片段（协议中最多三段）
/// - `secret`：HMAC 密钥；为 `None` 时退化为 SHA-256
///
/// #### 错误
/// - HMAC 无法用给定密钥初始化时返回 `BfileError::Primitive`
pub fn hash(parts: &[&[u8]], secret: Option<&[u8]>) -> Result<Digest, BfileError> {
    let mut out = [0u8; DIGEST_SIZE];

    match secret {
        Some(secret) => {
            let mut mac =
                <HmacSha256 as Mac>::new_from_slice(secret).map_err(|_| BfileError::Primitive)?;
            for part in parts.iter().filter(|p| !p.is_empty()) {
                mac.update(part);
            }
            out.copy_from_slice(&mac.finalize().into_bytes());
        }
        None => {
            let mut hasher = Sha256::new();
            for part in parts.iter().filter(|p| !p.is_empty()) {
                hasher.update(part);
            }
            out.copy_from_slice(&hasher.finalize());
        }
    }

    Ok(out)
}
