//! Client-side encryption for Alfred chat payloads.

pub mod cipher;
pub mod codec;
pub mod config;
pub mod error;
pub mod key_client;
pub mod metrics;
pub mod offload;
pub mod provider;
pub mod telemetry;

pub use cipher::{Crypto, Envelope, decrypt, encrypt, import_key};
pub use config::KeyClientConfig;
pub use error::{CipherError, ConfigError, KeyFetchError, OpenError};
pub use key_client::KeyClient;
pub use provider::{AeadProvider, DataKey, SystemProvider};
