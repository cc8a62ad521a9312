use std::env;
use std::fmt;

use crate::auth::SecretStore;

/// Raised when the environment does not describe a runnable server.
#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, reason } => write!(f, "{} is invalid: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    /// PostgreSQL connection string; `None` runs on the in-memory registry.
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: SecretStore,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        let jwt_secret = SecretStore::new(jwt_secret)?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid {
                key: "SERVER_PORT",
                reason: "must be a number".into(),
            })?;

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .ok()
            .filter(|cost| (4..=31).contains(cost))
            .ok_or_else(|| ConfigError::Invalid {
                key: "BCRYPT_COST",
                reason: "must be a number between 4 and 31".into(),
            })?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            server_port,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret,
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use std::sync::Mutex;

    lazy_static! {
        static ref ENV_LOCK: Mutex<()> = Mutex::new(());
    }

    const KEYS: [&str; 5] = [
        "JWT_SECRET",
        "DATABASE_URL",
        "SERVER_PORT",
        "SERVER_HOST",
        "BCRYPT_COST",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_config_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("JWT_SECRET", "config-test-secret-0123456789abcdef");

        let config = Config::from_env().unwrap();

        assert!(config.database_url.is_none());
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");

        // Test custom values
        env::set_var("SERVER_PORT", "3000");
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("BCRYPT_COST", "10");

        let config = Config::from_env().unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.database_url.as_deref(), Some("postgres://test"));
        assert_eq!(config.bcrypt_cost, 10);
        clear_env();
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));

        env::set_var("JWT_SECRET", "short");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { key: "JWT_SECRET", .. })
        ));

        env::set_var("JWT_SECRET", "config-test-secret-0123456789abcdef");
        env::set_var("SERVER_PORT", "eighty");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { key: "SERVER_PORT", .. })
        ));

        env::set_var("SERVER_PORT", "8080");
        env::set_var("BCRYPT_COST", "99");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { key: "BCRYPT_COST", .. })
        ));
        clear_env();
    }
}
