use thiserror::Error;

#[derive(Debug, Error)]
pub enum BfileError {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("hash or cipher primitive failed")]
    Primitive,

    #[error("malformed key material")]
    Key,

    #[error("inconsistent block padding (wrong internal path?)")]
    Padding,

    #[error("not a bfile container: {0}")]
    Format(String),

    #[error("HMAC check failed")]
    MacMismatch,
}
