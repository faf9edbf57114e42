use crate::config::ConfigProvider;
use crate::domain::model::{BmiMeasurement, BmiResult};
use crate::domain::ports::{BmiConnection, Connector, SecretSource};
use crate::utils::error::{BmiError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

pub const BMI_PATH: &str = "/bmi";

pub const SUCCESS_MESSAGE: &str = "BMI calculated and saved successfully";

pub const INVALID_MEASUREMENT_MESSAGE: &str = "height and weight must be positive numbers";

/// Inbound proxy event. Keys other than these are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: &str, path: &str, body: Option<&str>) -> Self {
        Self {
            http_method: method.to_string(),
            path: path.to_string(),
            body: body.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    fn json(status_code: u16, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    pub fn ok<T: Serialize>(payload: &T) -> Result<Self> {
        Ok(Self::json(200, serde_json::to_string(payload)?))
    }

    /// The single place a `BmiError` becomes an HTTP response.
    pub fn from_error(error: &BmiError) -> Self {
        let body = json!({ "error": error.public_message() }).to_string();
        Self::json(error.status_code(), body)
    }

    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// Handles one request end to end: resolve config, open a connection,
/// dispatch, close the connection.
pub struct BmiHandler<S: SecretSource, C: Connector> {
    config: ConfigProvider<S>,
    connector: C,
}

impl<S: SecretSource, C: Connector> BmiHandler<S, C> {
    pub fn new(config: ConfigProvider<S>, connector: C) -> Self {
        Self { config, connector }
    }

    pub fn config(&self) -> &ConfigProvider<S> {
        &self.config
    }

    /// Never fails: every error is mapped to a response here.
    pub async fn handle(&self, request: ApiRequest) -> ApiResponse {
        tracing::debug!(method = %request.http_method, path = %request.path, "Handling request");

        match self.process(&request).await {
            Ok(response) => {
                tracing::info!(
                    method = %request.http_method,
                    path = %request.path,
                    status = response.status_code,
                    "Request completed"
                );
                response
            }
            Err(e) => {
                if e.is_system_error() {
                    tracing::error!(
                        method = %request.http_method,
                        path = %request.path,
                        "Request failed: {}",
                        e
                    );
                } else {
                    tracing::warn!(
                        method = %request.http_method,
                        path = %request.path,
                        "Request rejected: {}",
                        e
                    );
                }
                ApiResponse::from_error(&e)
            }
        }
    }

    async fn process(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let config = self.config.get_config().await?;

        let mut connection = self.connector.connect(config).await?;
        let result = route(&mut connection, request).await;
        if let Err(e) = connection.close().await {
            tracing::warn!("Failed to close store connection: {}", e);
        }
        result
    }
}

async fn route<B: BmiConnection>(connection: &mut B, request: &ApiRequest) -> Result<ApiResponse> {
    match (request.http_method.as_str(), request.path.as_str()) {
        ("POST", BMI_PATH) => {
            let measurement = parse_measurement(request.body.as_deref())?;
            let record = measurement.into_record();
            connection.insert(&record).await?;
            tracing::info!(
                height = record.height,
                weight = record.weight,
                bmi = record.bmi,
                "BMI record stored"
            );
            ApiResponse::ok(&BmiResult {
                bmi: record.bmi,
                message: SUCCESS_MESSAGE.to_string(),
            })
        }
        ("GET", BMI_PATH) => {
            let records = connection.list_recent().await?;
            tracing::debug!("Listing {} BMI records", records.len());
            ApiResponse::ok(&records)
        }
        (method, path) => Err(BmiError::RouteNotFound {
            method: method.to_string(),
            path: path.to_string(),
        }),
    }
}

/// Parses a POST body into a measurement. A missing body counts as `{}`.
pub fn parse_measurement(body: Option<&str>) -> Result<BmiMeasurement> {
    let body = body.filter(|b| !b.trim().is_empty()).unwrap_or("{}");
    let value: Value = serde_json::from_str(body)
        .map_err(|e| BmiError::validation(format!("request body is not valid JSON: {}", e)))?;
    let fields = value
        .as_object()
        .ok_or_else(|| BmiError::validation("request body must be a JSON object"))?;

    let height = positive_field(fields.get("height"));
    let weight = positive_field(fields.get("weight"));
    match (height, weight) {
        (Some(height), Some(weight)) => {
            let measurement = BmiMeasurement { height, weight };
            if !measurement.bmi().is_finite() {
                return Err(BmiError::validation(INVALID_MEASUREMENT_MESSAGE));
            }
            Ok(measurement)
        }
        _ => Err(BmiError::validation(INVALID_MEASUREMENT_MESSAGE)),
    }
}

fn positive_field(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v > 0.0)
}
