//! AES-CBC 分组加解密原语（PKCS#7 填充）
//!
//! 与容器格式配合使用：
//! - key 为派生密钥中用于加密的 16 字节部分
//! - iv 以不可变引用传入，调用方保存的 IV 不会被改写
//! - 输出缓冲区按需增长，不需要先探测长度再分配

use aes::Aes128;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};

use crate::error::BfileError;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// AES 分组长度
pub const BLOCK_SIZE: usize = 16;

/// 加密密钥长度（AES-128）
pub const CIPHER_KEY_SIZE: usize = 16;

/// IV 长度
pub const IV_SIZE: usize = BLOCK_SIZE;

/// 长度为 `len` 的明文经 PKCS#7 填充后的密文长度
///
/// 已经对齐时仍会追加一个完整的填充块。
pub fn padded_len(len: usize) -> usize {
    (len / BLOCK_SIZE + 1) * BLOCK_SIZE
}

pub fn encrypt(key: &[u8], iv: &[u8; IV_SIZE], plaintext: &[u8]) -> Result<Vec<u8>, BfileError> {
    let cipher = Aes128CbcEnc::new_from_slices(key, iv).map_err(|_| BfileError::Key)?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// 解密并校验、去除填充
///
/// #### 错误
/// - key 长度不对：`BfileError::Key`
/// - 密文长度不是分组长度的整数倍：`BfileError::Primitive`
/// - 填充字节不一致：`BfileError::Padding`
pub fn decrypt(key: &[u8], iv: &[u8; IV_SIZE], ciphertext: &[u8]) -> Result<Vec<u8>, BfileError> {
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(BfileError::Primitive);
    }

    let cipher = Aes128CbcDec::new_from_slices(key, iv).map_err(|_| BfileError::Key)?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| BfileError::Padding)
}
