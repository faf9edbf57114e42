use crate::config::client::ClientConfig;
use crate::core::handler::BMI_PATH;
use crate::domain::model::{BmiHistoryEntry, BmiMeasurement, BmiResult};
use crate::utils::error::{BmiError, Result};
use crate::utils::validation::Validate;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// HTTP client for the BMI API.
pub struct BmiClient {
    client: Client,
    base_url: String,
}

impl BmiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, BMI_PATH)
    }

    pub async fn calculate(&self, measurement: BmiMeasurement) -> Result<BmiResult> {
        tracing::debug!("POST {} {:?}", self.url(), measurement);
        let response = self.client.post(self.url()).json(&measurement).send().await?;
        Self::parse(response).await
    }

    pub async fn history(&self) -> Result<Vec<BmiHistoryEntry>> {
        tracing::debug!("GET {}", self.url());
        let response = self.client.get(self.url()).send().await?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(text);
        Err(BmiError::ClientError {
            status: status.as_u16(),
            message,
        })
    }
}
