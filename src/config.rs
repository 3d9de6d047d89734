use std::env::{self, VarError};
use std::time::Duration;

use dotenv::dotenv;
use validator::Validate;

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "ALFRED_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "ALFRED_KEY_FETCH_TIMEOUT_SECS";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for reaching the key issuance endpoint.
#[derive(Debug, Clone, Validate)]
pub struct KeyClientConfig {
    #[validate(url)]
    pub base_url: String,
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,
}

impl KeyClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads the config from the process environment, loading `.env` first
    /// if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let base_url = env::var(BASE_URL_VAR).map_err(|_| ConfigError::Missing(BASE_URL_VAR))?;
        let timeout_secs = match env::var(TIMEOUT_VAR) {
            Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: TIMEOUT_VAR,
                value,
            })?,
            Err(VarError::NotPresent) => DEFAULT_TIMEOUT_SECS,
            Err(VarError::NotUnicode(raw)) => {
                return Err(ConfigError::Invalid {
                    name: TIMEOUT_VAR,
                    value: raw.to_string_lossy().into_owned(),
                });
            }
        };

        let config = Self { base_url, timeout_secs };
        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_url() {
        let config = KeyClientConfig::new("https://alfred.example.com").unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn rejects_non_url() {
        let err = KeyClientConfig::new("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    // One function so the cases do not race on the process environment.
    #[test]
    fn from_env_reads_and_validates_environment() {
        unsafe {
            env::remove_var(BASE_URL_VAR);
            env::remove_var(TIMEOUT_VAR);
        }
        assert!(matches!(
            KeyClientConfig::from_env(),
            Err(ConfigError::Missing(BASE_URL_VAR))
        ));

        unsafe { env::set_var(BASE_URL_VAR, "http://127.0.0.1:8080") };
        let config = KeyClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

        unsafe { env::set_var(TIMEOUT_VAR, " 30 ") };
        assert_eq!(KeyClientConfig::from_env().unwrap().timeout_secs, 30);

        unsafe { env::set_var(TIMEOUT_VAR, "abc") };
        match KeyClientConfig::from_env() {
            Err(ConfigError::Invalid { name, value }) => {
                assert_eq!(name, TIMEOUT_VAR);
                assert_eq!(value, "abc");
            }
            other => panic!("expected invalid timeout, got {other:?}"),
        }

        unsafe { env::set_var(TIMEOUT_VAR, "0") };
        assert!(matches!(KeyClientConfig::from_env(), Err(ConfigError::Validation(_))));

        #[cfg(unix)]
        {
            use std::ffi::OsStr;
            use std::os::unix::ffi::OsStrExt;

            unsafe { env::set_var(TIMEOUT_VAR, OsStr::from_bytes(&[0x31, 0xff])) };
            assert!(matches!(
                KeyClientConfig::from_env(),
                Err(ConfigError::Invalid { name: TIMEOUT_VAR, .. })
            ));
        }

        unsafe {
            env::remove_var(BASE_URL_VAR);
            env::remove_var(TIMEOUT_VAR);
        }
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = KeyClientConfig {
            base_url: "http://127.0.0.1:8080".into(),
            timeout_secs: 0,
        };
        assert!(config.validate().is_err());
    }
}
