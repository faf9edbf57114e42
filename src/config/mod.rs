#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod lambda;

use crate::domain::ports::SecretSource;
use crate::utils::error::{BmiError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::Deserialize;
use std::fmt;
use tokio::sync::OnceCell;

/// Environment variable naming the secret that holds the database credentials.
pub const SECRET_ID_ENV: &str = "DB_SECRET_ARN";

pub const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Database connection parameters as stored in the secret.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub dbname: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_MYSQL_PORT
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .field("port", &self.port)
            .finish()
    }
}

impl DbConfig {
    pub fn from_secret_string(secret: &str) -> Result<Self> {
        let config: DbConfig = serde_json::from_str(secret)
            .map_err(|e| BmiError::configuration(format!("Malformed database secret: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for DbConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)
            .and_then(|_| validate_non_empty_string("username", &self.username))
            .and_then(|_| validate_non_empty_string("dbname", &self.dbname))
            .map_err(|e| BmiError::configuration(e.to_string()))
    }
}

/// Resolves `DbConfig` once and serves the cached copy afterwards.
///
/// A failed resolution leaves the cache empty, so the next call fetches again.
pub struct ConfigProvider<S: SecretSource> {
    source: S,
    secret_id: Option<String>,
    cache: OnceCell<DbConfig>,
}

impl<S: SecretSource> ConfigProvider<S> {
    pub fn new(source: S, secret_id: Option<String>) -> Self {
        Self {
            source,
            secret_id,
            cache: OnceCell::new(),
        }
    }

    /// Reads the secret identifier from `DB_SECRET_ARN`. A missing variable is
    /// reported by `get_config`, not here.
    pub fn from_env(source: S) -> Self {
        let secret_id = std::env::var(SECRET_ID_ENV)
            .ok()
            .filter(|id| !id.trim().is_empty());
        Self::new(source, secret_id)
    }

    pub async fn get_config(&self) -> Result<&DbConfig> {
        self.cache
            .get_or_try_init(|| async {
                let secret_id = self.secret_id.as_deref().ok_or_else(|| {
                    BmiError::configuration(format!(
                        "{} environment variable is required",
                        SECRET_ID_ENV
                    ))
                })?;

                tracing::debug!("Fetching database secret {}", secret_id);
                let secret = self.source.fetch_secret(secret_id).await.map_err(|e| match e {
                    BmiError::ConfigurationError { .. } => e,
                    other => BmiError::configuration(other.to_string()),
                })?;

                let config = DbConfig::from_secret_string(&secret)?;
                tracing::info!(host = %config.host, dbname = %config.dbname, "Database configuration resolved");
                Ok::<DbConfig, BmiError>(config)
            })
            .await
    }

    pub fn is_cached(&self) -> bool {
        self.cache.initialized()
    }
}

/// In-memory secret source for local runs and tests.
#[derive(Debug, Clone)]
pub struct StaticSecretSource {
    secret: String,
}

impl StaticSecretSource {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl SecretSource for StaticSecretSource {
    async fn fetch_secret(&self, _secret_id: &str) -> Result<String> {
        Ok(self.secret.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const SECRET: &str = r#"{
        "host": "bmi-db.cluster.eu-west-3.rds.amazonaws.com",
        "username": "admin",
        "password": "s3cr3t",
        "dbname": "bmi",
        "engine": "mysql"
    }"#;

    #[derive(Clone)]
    struct CountingSource {
        secret: std::result::Result<String, String>,
        fetches: Arc<AtomicUsize>,
    }

    impl SecretSource for CountingSource {
        async fn fetch_secret(&self, _secret_id: &str) -> Result<String> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.secret
                .clone()
                .map_err(|message| BmiError::ConnectionError { message })
        }
    }

    fn counting(secret: std::result::Result<&str, &str>) -> (CountingSource, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            secret: secret.map(String::from).map_err(String::from),
            fetches: fetches.clone(),
        };
        (source, fetches)
    }

    #[test]
    fn test_parse_secret_with_default_port() {
        let config = DbConfig::from_secret_string(SECRET).unwrap();
        assert_eq!(config.host, "bmi-db.cluster.eu-west-3.rds.amazonaws.com");
        assert_eq!(config.username, "admin");
        assert_eq!(config.dbname, "bmi");
        assert_eq!(config.port, DEFAULT_MYSQL_PORT);
    }

    #[test]
    fn test_parse_secret_rejects_missing_fields() {
        let err = DbConfig::from_secret_string(r#"{"host": "db", "username": "admin"}"#)
            .unwrap_err();
        assert!(matches!(err, BmiError::ConfigurationError { .. }));

        let err = DbConfig::from_secret_string("not json").unwrap_err();
        assert!(matches!(err, BmiError::ConfigurationError { .. }));

        let err = DbConfig::from_secret_string(
            r#"{"host": " ", "username": "admin", "password": "x", "dbname": "bmi"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, BmiError::ConfigurationError { .. }));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = DbConfig::from_secret_string(SECRET).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("s3cr3t"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_config_is_fetched_once() {
        let (source, fetches) = counting(Ok(SECRET));
        let provider = ConfigProvider::new(source, Some("arn:bmi-db".to_string()));

        tokio_test::block_on(async {
            let first = provider.get_config().await.unwrap().clone();
            let second = provider.get_config().await.unwrap();
            assert_eq!(&first, second);
        });

        assert!(provider.is_cached());
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_secret_id_is_configuration_error() {
        let (source, fetches) = counting(Ok(SECRET));
        let provider = ConfigProvider::new(source, None);

        let err = tokio_test::block_on(provider.get_config()).unwrap_err();
        assert!(matches!(err, BmiError::ConfigurationError { .. }));
        assert_eq!(fetches.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failed_fetch_is_not_cached() {
        let (source, fetches) = counting(Err("secrets manager unreachable"));
        let provider = ConfigProvider::new(source, Some("arn:bmi-db".to_string()));

        for _ in 0..2 {
            let err = tokio_test::block_on(provider.get_config()).unwrap_err();
            assert!(matches!(err, BmiError::ConfigurationError { .. }));
        }
        assert!(!provider.is_cached());
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }
}
