//! bfile 容器格式
//!
//! 字节布局（无长度前缀，无魔数）：
//!
//! | 偏移             | 长度 | 字段                 |
//! |------------------|------|----------------------|
//! | 0                | 12   | salt                 |
//! | 12               | 16   | IV                   |
//! | 28               | n    | 密文（AES-CBC）      |
//! | 28 + n           | 32   | HMAC-SHA256          |
//!
//! n 必须大于 0 且为分组长度的整数倍。HMAC 覆盖 salt ‖ IV ‖ 密文。
//! 格式不合法的输入必须在做任何密码学运算之前被拒绝。

use std::io::Write;

use crate::crypto::cipher::{BLOCK_SIZE, IV_SIZE};
use crate::crypto::hash::DIGEST_SIZE;
use crate::crypto::kdf::SALT_SIZE;
use crate::error::BfileError;

/// HMAC 长度
pub const MAC_SIZE: usize = DIGEST_SIZE;

/// 密文之前的固定字段长度（salt + IV）
pub const PREFIX_SIZE: usize = SALT_SIZE + IV_SIZE;

/// 容器的最小长度：12 + 16 + 32
pub const MIN_CONTAINER_SIZE: usize = PREFIX_SIZE + MAC_SIZE;

/// 解析后的容器
///
/// 解析时借用输入缓冲区中的密文，避免复制整个文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<'a> {
    pub salt: [u8; SALT_SIZE],
    pub iv: [u8; IV_SIZE],
    pub ciphertext: &'a [u8],
    pub mac: [u8; MAC_SIZE],
}

impl<'a> Container<'a> {
    /// 拆分容器字节
    ///
    /// #### 错误
    /// - 长度不足 60 字节，或密文长度为 0 / 不是 16 的整数倍：`BfileError::Format`
    pub fn parse(bytes: &'a [u8]) -> Result<Self, BfileError> {
        if bytes.len() < MIN_CONTAINER_SIZE {
            return Err(BfileError::Format(format!(
                "{} bytes is shorter than the {MIN_CONTAINER_SIZE}-byte minimum",
                bytes.len()
            )));
        }

        let mac_start = bytes.len() - MAC_SIZE;
        let ciphertext = &bytes[PREFIX_SIZE..mac_start];

        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(BfileError::Format(format!(
                "ciphertext length {} is not a positive multiple of {BLOCK_SIZE}",
                ciphertext.len()
            )));
        }

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&bytes[..SALT_SIZE]);

        let mut iv = [0u8; IV_SIZE];
        iv.copy_from_slice(&bytes[SALT_SIZE..PREFIX_SIZE]);

        let mut mac = [0u8; MAC_SIZE];
        mac.copy_from_slice(&bytes[mac_start..]);

        Ok(Self {
            salt,
            iv,
            ciphertext,
            mac,
        })
    }

    /// HMAC 的输入片段：salt、IV、密文
    pub fn authenticated_parts(&self) -> [&[u8]; 3] {
        [&self.salt[..], &self.iv[..], self.ciphertext]
    }

    /// 序列化后的总长度
    pub fn encoded_len(&self) -> usize {
        MIN_CONTAINER_SIZE + self.ciphertext.len()
    }

    /// 按布局顺序写出
    pub fn write<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(&self.salt)?;
        writer.write_all(&self.iv)?;
        writer.write_all(self.ciphertext)?;
        writer.write_all(&self.mac)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(self.ciphertext);
        out.extend_from_slice(&self.mac);
        out
    }
}
