//! 密码学原语与密钥派生。

pub mod cipher;
pub mod hash;
pub mod kdf;
