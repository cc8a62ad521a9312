use std::fmt;
use std::sync::Arc;

use crate::config::ConfigError;

/// Shortest signing secret accepted, in bytes (HS256 key size).
pub const MIN_SECRET_LEN: usize = 32;

/// Process-wide symmetric key material for signing and verifying tokens.
///
/// Built once at startup and never mutated; clones share the same bytes. The secret
/// is always injected from the environment, never compiled in.
#[derive(Clone)]
pub struct SecretStore {
    secret: Arc<[u8]>,
}

impl SecretStore {
    /// Wraps `secret`, rejecting anything shorter than [`MIN_SECRET_LEN`] bytes.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        let secret = secret.as_ref();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: format!("must be at least {} bytes", MIN_SECRET_LEN),
            });
        }
        Ok(Self {
            secret: Arc::from(secret),
        })
    }

    pub fn expose(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SecretStore")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        assert!(SecretStore::new("").is_err());
        let err = SecretStore::new("too-short").unwrap_err();
        assert_eq!(
            err.to_string(),
            "JWT_SECRET is invalid: must be at least 32 bytes"
        );
    }

    #[test]
    fn test_debug_is_redacted() {
        let store = SecretStore::new("0123456789abcdef0123456789abcdef").unwrap();
        let rendered = format!("{:?}", store);
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("0123456789abcdef"));
        assert_eq!(store.expose(), b"0123456789abcdef0123456789abcdef");
    }
}
