use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for request data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Custom period whose start is not before its end
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Report type outside financial|service|customer|inventory|worker
    #[error("Unknown report type: {0}")]
    UnknownReportType(String),

    /// Record source failure while reading operational data
    #[error("Repository error: {0}")]
    Repository(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Report payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Report generation exceeded its deadline
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing caller identity
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Append-only store rejected a write for an existing id
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn invalid_range(msg: impl Into<String>) -> Self {
        AppError::InvalidRange(msg.into())
    }

    pub fn repository(msg: impl Into<String>) -> Self {
        AppError::Repository(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Stable machine-readable category
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidRange(_) => "INVALID_RANGE",
            AppError::UnknownReportType(_) => "UNKNOWN_REPORT_TYPE",
            AppError::Repository(_) | AppError::Database(_) => "REPOSITORY_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Timeout(_) => "TIMEOUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show callers.
    ///
    /// Data-source and internal failures are reduced to their category; the
    /// underlying detail only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Repository(_) | AppError::Database(_) => {
                "Failed to read operational records".to_string()
            }
            AppError::Serialization(_) => "Failed to encode report payload".to_string(),
            AppError::Timeout(_) => "Report generation exceeded its deadline".to_string(),
            AppError::Configuration(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Whether the error was raised by request validation, before any read
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidRange(_)
                | AppError::UnknownReportType(_)
                | AppError::NotFound(_)
                | AppError::Unauthorized(_)
                | AppError::Conflict(_)
        )
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        }

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.public_message(),
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidRange(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownReportType(_) => StatusCode::BAD_REQUEST,
            AppError::Repository(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
