use thiserror::Error;

/// Fixed body message for every system-caused failure. The cause is logged, never returned.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

pub const ROUTE_NOT_FOUND_MESSAGE: &str = "route not found";

#[derive(Error, Debug)]
pub enum BmiError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("Query error: {message}")]
    QueryError { message: String },

    #[error("Route not found: {method} {path}")]
    RouteNotFound { method: String, path: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    ClientError { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, BmiError>;

impl BmiError {
    pub fn validation(message: impl Into<String>) -> Self {
        BmiError::ValidationError {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        BmiError::ConfigurationError {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        BmiError::ConnectionError {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        BmiError::QueryError {
            message: message.into(),
        }
    }

    /// HTTP status the handler answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            BmiError::ValidationError { .. } => 400,
            BmiError::RouteNotFound { .. } => 404,
            BmiError::ConfigurationError { .. }
            | BmiError::ConnectionError { .. }
            | BmiError::QueryError { .. }
            | BmiError::InvalidConfigValueError { .. }
            | BmiError::SerializationError(_)
            | BmiError::IoError(_)
            | BmiError::ApiError(_)
            | BmiError::ClientError { .. } => 500,
        }
    }

    /// Message placed in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        match self {
            BmiError::ValidationError { message } => message.clone(),
            BmiError::RouteNotFound { .. } => ROUTE_NOT_FOUND_MESSAGE.to_string(),
            BmiError::ConfigurationError { .. }
            | BmiError::ConnectionError { .. }
            | BmiError::QueryError { .. }
            | BmiError::InvalidConfigValueError { .. }
            | BmiError::SerializationError(_)
            | BmiError::IoError(_)
            | BmiError::ApiError(_)
            | BmiError::ClientError { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether the failure was caused by the system rather than the caller.
    pub fn is_system_error(&self) -> bool {
        self.status_code() >= 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = BmiError::validation("height and weight must be positive numbers");
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.public_message(),
            "height and weight must be positive numbers"
        );
        assert!(!err.is_system_error());

        let err = BmiError::RouteNotFound {
            method: "DELETE".to_string(),
            path: "/bmi".to_string(),
        };
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.public_message(), "route not found");
    }

    #[test]
    fn test_system_errors_are_opaque() {
        let errors = vec![
            BmiError::configuration("DB_SECRET_ARN is not set"),
            BmiError::connection("Access denied for user 'admin'"),
            BmiError::query("Table 'bmi_history' doesn't exist"),
            BmiError::InvalidConfigValueError {
                field: "api.base_url".to_string(),
                value: "admin".to_string(),
                reason: "Unsupported URL scheme".to_string(),
            },
            BmiError::ClientError {
                status: 502,
                message: "admin gateway down".to_string(),
            },
            BmiError::IoError(std::io::Error::new(std::io::ErrorKind::Other, "admin")),
        ];

        for err in errors {
            assert_eq!(err.status_code(), 500);
            assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
            assert!(err.is_system_error());
            assert!(!err.public_message().contains("admin"));
        }
    }
}
