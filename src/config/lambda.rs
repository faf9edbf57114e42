#[cfg(feature = "lambda")]
use crate::domain::ports::SecretSource;
#[cfg(feature = "lambda")]
use crate::utils::error::{BmiError, Result};
#[cfg(feature = "lambda")]
use aws_sdk_secretsmanager::Client as SecretsManagerClient;

/// AWS Secrets Manager backed secret source.
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct SecretsManagerSource {
    client: SecretsManagerClient,
}

#[cfg(feature = "lambda")]
impl SecretsManagerSource {
    pub fn new(client: SecretsManagerClient) -> Self {
        Self { client }
    }

    /// Builds a client from the default AWS provider chain (region, credentials).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(SecretsManagerClient::new(&config))
    }
}

#[cfg(feature = "lambda")]
impl SecretSource for SecretsManagerSource {
    async fn fetch_secret(&self, secret_id: &str) -> Result<String> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| BmiError::ConfigurationError {
                message: format!(
                    "Failed to read secret '{}' from Secrets Manager: {}",
                    secret_id,
                    aws_sdk_secretsmanager::error::DisplayErrorContext(&e)
                ),
            })?;

        output
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| BmiError::ConfigurationError {
                message: format!("Secret '{}' has no string value", secret_id),
            })
    }
}
