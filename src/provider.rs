use std::fmt;

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::{CipherError, OpenError, Result};

pub const KEY_LEN: usize = 32;
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

/// An imported 256-bit AES-GCM key usable only for encrypt and decrypt.
///
/// The raw key bytes cannot be read back out of the handle. Cloning shares
/// nothing mutable, so one key may serve concurrent operations.
#[derive(Clone)]
pub struct DataKey {
    cipher: Aes256Gcm,
}

impl fmt::Debug for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DataKey(..)")
    }
}

pub trait AeadProvider: Send + Sync {
    /// Fills `buf` with cryptographically secure random bytes.
    fn fill_random(&self, buf: &mut [u8]) -> Result<()>;

    fn import_key(&self, raw: &[u8]) -> Result<DataKey> {
        let cipher = Aes256Gcm::new_from_slice(raw)
            .map_err(|_| CipherError::InvalidKeyLength(raw.len()))?;
        Ok(DataKey { cipher })
    }

    /// Returns `ciphertext || tag`.
    fn seal(
        &self,
        key: &DataKey,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        key.cipher
            .encrypt(Nonce::from_slice(nonce), Payload { msg: plaintext, aad })
            .map_err(|e| CipherError::Encryption(e.to_string()))
    }

    fn open(
        &self,
        key: &DataKey,
        nonce: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> std::result::Result<Vec<u8>, OpenError> {
        if nonce.len() != NONCE_LEN {
            return Err(OpenError::NonceLength(nonce.len()));
        }
        key.cipher
            .decrypt(Nonce::from_slice(nonce), Payload { msg: ciphertext, aad })
            .map_err(|_| OpenError::Authentication)
    }
}

/// Provider backed by the operating system's random number generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProvider;

impl AeadProvider for SystemProvider {
    fn fill_random(&self, buf: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| CipherError::Random(e.to_string()))
    }
}
