//! Configuration loading and validation for the cookie service.
//!
//! All values are read from `COOKIE_`-prefixed environment variables at
//! startup; nested keys use `__` (`COOKIE_SIGNING__KEYS`) and key rings are
//! comma-separated. The process exits with a clear message if anything is
//! missing or inconsistent.

use std::sync::Arc;

use anyhow::{Context, Result};
use cookies::{JarOptions, SignIdentifier};
use keystore::{EncryptionConfig, KeyStore, KeyStoreConfig, SigningConfig};
use serde::Deserialize;

use crate::server::middleware::DEFAULT_REQUEST_TIMEOUT;

/// Jar-wide defaults applied to every request.
#[derive(Debug, Clone, Deserialize)]
pub struct JarSettings {
    /// Force the `secure` decision instead of deriving it from the connection.
    #[serde(default)]
    pub secure: Option<bool>,

    /// Sign cookies on write by default.
    #[serde(default)]
    pub signed: bool,

    /// Encrypt on write and decrypt on read by default.
    #[serde(default)]
    pub encrypted: bool,

    /// Suffix of signature companion cookies (`name.<suffix>`).
    #[serde(default = "default_sign_identifier")]
    pub sign_identifier: String,
}

impl Default for JarSettings {
    fn default() -> Self {
        Self {
            secure: None,
            signed: false,
            encrypted: false,
            sign_identifier: default_sign_identifier(),
        }
    }
}

/// Validated service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the HTTP(S) server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// PEM certificate chain. Must be set together with `tls_key_path`.
    #[serde(default)]
    pub tls_cert_path: Option<String>,

    /// PEM private key. Must be set together with `tls_cert_path`.
    #[serde(default)]
    pub tls_key_path: Option<String>,

    /// Per-request timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Tracing log level (e.g. `"info"`, `"debug"`). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Encryption key ring and cipher settings.
    #[serde(default)]
    pub encryption: Option<EncryptionConfig>,

    /// Signing key ring and HMAC settings.
    #[serde(default)]
    pub signing: Option<SigningConfig>,

    /// Jar defaults.
    #[serde(default)]
    pub jar: JarSettings,
}

fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}
fn default_log_level() -> String {
    "info".into()
}
fn default_sign_identifier() -> String {
    "sig".into()
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("COOKIE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("encryption.keys")
        .with_list_parse_key("signing.keys")
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the result fails
    /// validation.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(environment())
    }

    fn from_environment(source: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(source)
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Returns `true` when both TLS paths are configured.
    pub fn tls_enabled(&self) -> bool {
        self.tls_cert_path.is_some() && self.tls_key_path.is_some()
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    /// Key store construction input.
    pub fn key_store_config(&self) -> KeyStoreConfig {
        KeyStoreConfig {
            encryption: self.encryption.clone(),
            signing: self.signing.clone(),
        }
    }

    /// Build the shared key store.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured key ring is empty.
    pub fn key_store(&self) -> Result<Arc<KeyStore>> {
        let store = KeyStore::new(self.key_store_config()).context("invalid key store configuration")?;
        Ok(Arc::new(store))
    }

    /// Jar defaults around an already built key store.
    pub fn jar_options(&self, key_store: Arc<KeyStore>) -> JarOptions {
        JarOptions {
            key_store,
            secure: self.jar.secure,
            signed: self.jar.signed,
            encrypted: self.jar.encrypted,
            sign_identifier: SignIdentifier::Suffix(self.jar.sign_identifier.clone()),
        }
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("COOKIE_PORT must be > 0");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("COOKIE_REQUEST_TIMEOUT_SECS must be > 0");
        }
        ensure_non_empty(&self.log_level, "COOKIE_LOG_LEVEL")?;
        ensure_non_empty(&self.jar.sign_identifier, "COOKIE_JAR__SIGN_IDENTIFIER")?;

        match (&self.tls_cert_path, &self.tls_key_path) {
            (Some(cert), Some(key)) => {
                ensure_non_empty(cert, "COOKIE_TLS_CERT_PATH")?;
                ensure_non_empty(key, "COOKIE_TLS_KEY_PATH")?;
            }
            (None, None) => {}
            _ => anyhow::bail!("COOKIE_TLS_CERT_PATH and COOKIE_TLS_KEY_PATH must be set together"),
        }

        if let Some(encryption) = &self.encryption {
            if encryption.keys.is_empty() {
                anyhow::bail!("COOKIE_ENCRYPTION__KEYS is required when encryption is configured");
            }
            let spec = keystore::lookup(&encryption.algorithm).with_context(|| {
                format!("COOKIE_ENCRYPTION__ALGORITHM {} is not supported", encryption.algorithm)
            })?;
            for (index, key) in encryption.keys.iter().enumerate() {
                if key.len() != spec.key_length {
                    anyhow::bail!(
                        "COOKIE_ENCRYPTION__KEYS entry {index} must be {} bytes for {}, got {}",
                        spec.key_length,
                        spec.algorithm,
                        key.len()
                    );
                }
            }
            if spec.is_aead() && !spec.accepts_tag_length(encryption.auth_tag_length) {
                anyhow::bail!(
                    "COOKIE_ENCRYPTION__AUTH_TAG_LENGTH {} is not valid for {}",
                    encryption.auth_tag_length,
                    spec.algorithm
                );
            }
        }
        if let Some(signing) = &self.signing {
            if signing.keys.is_empty() {
                anyhow::bail!("COOKIE_SIGNING__KEYS is required when signing is configured");
            }
        }

        if self.jar.signed && self.signing.is_none() {
            anyhow::bail!("COOKIE_JAR__SIGNED requires COOKIE_SIGNING__KEYS");
        }
        if self.jar.encrypted && self.encryption.is_none() {
            anyhow::bail!("COOKIE_JAR__ENCRYPTED requires COOKIE_ENCRYPTION__KEYS");
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystore::{SigningAlgorithm, TextEncoding};

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Config::from_environment(environment().source(Some(map)))
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_port(), 8080);
        assert_eq!(default_request_timeout(), 30);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_sign_identifier(), "sig");
    }

    #[test]
    fn empty_environment_is_valid() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert!(cfg.encryption.is_none());
        assert!(cfg.signing.is_none());
        assert!(!cfg.tls_enabled());
        assert!(!cfg.key_store().unwrap().has_signing_keys());
    }

    #[test]
    fn parses_nested_key_rings() {
        let cfg = load(&[
            ("COOKIE_PORT", "9000"),
            ("COOKIE_SIGNING__KEYS", "keyboard cat a,keyboard cat b"),
            ("COOKIE_SIGNING__ALGORITHM", "sha256"),
            ("COOKIE_ENCRYPTION__KEYS", "secretsecretsecretsecret"),
            ("COOKIE_ENCRYPTION__ENCODING", "base64"),
            ("COOKIE_JAR__SIGNED", "true"),
            ("COOKIE_JAR__SIGN_IDENTIFIER", "mysig"),
        ])
        .unwrap();

        assert_eq!(cfg.port, 9000);
        let signing = cfg.signing.as_ref().unwrap();
        assert_eq!(signing.keys.len(), 2);
        assert_eq!(signing.keys[1].as_bytes(), b"keyboard cat b");
        assert_eq!(signing.algorithm, SigningAlgorithm::Sha256);

        let encryption = cfg.encryption.as_ref().unwrap();
        assert_eq!(encryption.encoding, TextEncoding::Base64);
        assert_eq!(encryption.algorithm, "aes-192-ccm");
        assert_eq!(encryption.auth_tag_length, 16);

        let options = cfg.jar_options(cfg.key_store().unwrap());
        assert!(options.signed);
        assert!(!options.encrypted);
        assert_eq!(options.sign_identifier.companion("foo"), "foo.mysig");
    }

    #[test]
    fn rejects_unpaired_tls_paths() {
        let err = load(&[("COOKIE_TLS_CERT_PATH", "/etc/tls/cert.pem")]).unwrap_err();
        assert!(err.to_string().contains("must be set together"));
    }

    #[test]
    fn rejects_wrong_key_length() {
        let err = load(&[("COOKIE_ENCRYPTION__KEYS", "short")]).unwrap_err();
        assert!(err.to_string().contains("24 bytes"));
    }

    #[test]
    fn rejects_unknown_cipher() {
        assert!(load(&[
            ("COOKIE_ENCRYPTION__KEYS", "secretsecretsecretsecret"),
            ("COOKIE_ENCRYPTION__ALGORITHM", "rot13"),
        ])
        .is_err());
    }

    #[test]
    fn rejects_signed_jar_without_keys() {
        let err = load(&[("COOKIE_JAR__SIGNED", "true")]).unwrap_err();
        assert!(err.to_string().contains("COOKIE_SIGNING__KEYS"));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(load(&[("COOKIE_REQUEST_TIMEOUT_SECS", "0")]).is_err());
    }
}
