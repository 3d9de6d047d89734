//! Chat payload encryption with the chat id bound in as associated data.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::codec::{decode_base64, encode_base64};
use crate::error::{CipherError, OpenError, Result};
use crate::metrics::measure;
use crate::provider::{AeadProvider, DataKey, NONCE_LEN, SystemProvider};

/// The encrypted artifact exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub iv: String,
    pub ciphertext: String,
}

#[derive(Debug, Clone, Default)]
pub struct Crypto<P = SystemProvider> {
    provider: P,
}

impl Crypto<SystemProvider> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: AeadProvider> Crypto<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Imports a base64 256-bit key. Malformed base64 and wrong key
    /// lengths are returned as-is.
    pub fn import_key(&self, base64_key: &str) -> Result<DataKey> {
        measure("import_key", || {
            let raw = Zeroizing::new(decode_base64(base64_key)?);
            self.provider.import_key(&raw)
        })
    }

    pub fn encrypt(&self, key: &DataKey, plaintext: &str, aad: &str) -> Result<Envelope> {
        measure("encrypt", || {
            let mut nonce = [0u8; NONCE_LEN];
            self.provider.fill_random(&mut nonce)?;

            let sealed = self
                .provider
                .seal(key, &nonce, aad.as_bytes(), plaintext.as_bytes())?;

            debug!(plaintext_len = plaintext.len(), "payload encrypted");
            Ok(Envelope {
                iv: encode_base64(&nonce),
                ciphertext: encode_base64(&sealed),
            })
        })
    }

    pub fn decrypt(&self, key: &DataKey, iv: &str, ciphertext: &str, aad: &str) -> Result<String> {
        measure("decrypt", || {
            self.open(key, iv, ciphertext, aad).map_err(|cause| {
                warn!(error = %cause, "decryption failed");
                CipherError::DecryptionFailed
            })
        })
    }

    pub fn decrypt_envelope(&self, key: &DataKey, envelope: &Envelope, aad: &str) -> Result<String> {
        self.decrypt(key, &envelope.iv, &envelope.ciphertext, aad)
    }

    fn open(
        &self,
        key: &DataKey,
        iv: &str,
        ciphertext: &str,
        aad: &str,
    ) -> std::result::Result<String, OpenError> {
        let nonce = decode_base64(iv)?;
        let sealed = decode_base64(ciphertext)?;
        let plaintext = self.provider.open(key, &nonce, aad.as_bytes(), &sealed)?;
        Ok(String::from_utf8(plaintext)?)
    }
}

pub fn import_key(base64_key: &str) -> Result<DataKey> {
    Crypto::new().import_key(base64_key)
}

pub fn encrypt(key: &DataKey, plaintext: &str, aad: &str) -> Result<Envelope> {
    Crypto::new().encrypt(key, plaintext, aad)
}

pub fn decrypt(key: &DataKey, iv: &str, ciphertext: &str, aad: &str) -> Result<String> {
    Crypto::new().decrypt(key, iv, ciphertext, aad)
}
