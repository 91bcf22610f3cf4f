#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("output buffer of {len} bytes is too short for a 16 byte digest")]
    OutputTooShort { len: usize },
    #[error("invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("unknown digest algorithm `{0}`, expected `md4` or `md5`")]
    UnknownAlgorithm(String),
}
