use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherError {
    #[error(transparent)]
    Codec(#[from] base64::DecodeError),
    #[error("Invalid key length - must be exactly 32 bytes, got {0}")]
    InvalidKeyLength(usize),
    #[error("encryption failed: {0}")]
    Encryption(String),
    #[error("random source unavailable: {0}")]
    Random(String),
    #[error("decryption failed")]
    DecryptionFailed,
    #[error("background task failed: {0}")]
    Task(String),
}

/// Cause of a failed decryption.
///
/// Only ever logged. Callers of `decrypt` see [`CipherError::DecryptionFailed`]
/// regardless of which variant occurred.
#[derive(Error, Debug)]
pub enum OpenError {
    #[error("malformed base64: {0}")]
    Codec(#[from] base64::DecodeError),
    #[error("nonce must be 12 bytes, got {0}")]
    NonceLength(usize),
    #[error("authentication tag mismatch")]
    Authentication,
    #[error("plaintext is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Error, Debug)]
pub enum KeyFetchError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("key endpoint responded with {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Key(#[from] CipherError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{name} is not a valid value: {value}")]
    Invalid { name: &'static str, value: String },
    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),
}

pub type Result<T, E = CipherError> = std::result::Result<T, E>;
