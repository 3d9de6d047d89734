//! Async entry points that run cipher work on the tokio blocking pool.

use std::sync::Arc;

use tokio::task;

use crate::cipher::{Crypto, Envelope};
use crate::error::{CipherError, Result};
use crate::provider::{AeadProvider, DataKey};

pub async fn encrypt_blocking_task<P>(
    crypto: Arc<Crypto<P>>,
    key: DataKey,
    plaintext: String,
    aad: String,
) -> Result<Envelope>
where
    P: AeadProvider + 'static,
{
    task::spawn_blocking(move || crypto.encrypt(&key, &plaintext, &aad))
        .await
        .map_err(|e| CipherError::Task(e.to_string()))?
}

pub async fn decrypt_blocking_task<P>(
    crypto: Arc<Crypto<P>>,
    key: DataKey,
    envelope: Envelope,
    aad: String,
) -> Result<String>
where
    P: AeadProvider + 'static,
{
    task::spawn_blocking(move || crypto.decrypt_envelope(&key, &envelope, &aad))
        .await
        .map_err(|e| CipherError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn concurrent_round_trips_share_one_key() {
        let crypto = Arc::new(Crypto::new());
        let key = crypto.import_key("e7qvsq0FsUQWidzMHr59RJSi5I92l+bGkjUgfWQvRt0=").unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let crypto = crypto.clone();
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                let plaintext = format!("message {i}");
                let envelope =
                    encrypt_blocking_task(crypto.clone(), key.clone(), plaintext.clone(), "42".into())
                        .await
                        .unwrap();
                let decrypted = decrypt_blocking_task(crypto, key, envelope, "42".into())
                    .await
                    .unwrap();
                assert_eq!(decrypted, plaintext);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn failure_stays_normalised() {
        let crypto = Arc::new(Crypto::new());
        let key = crypto.import_key("e7qvsq0FsUQWidzMHr59RJSi5I92l+bGkjUgfWQvRt0=").unwrap();
        let envelope = crypto.encrypt(&key, "hi", "1").unwrap();

        let err = decrypt_blocking_task(crypto, key, envelope, "2".into())
            .await
            .unwrap_err();
        assert!(matches!(err, CipherError::DecryptionFailed));
    }
}
