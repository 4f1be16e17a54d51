use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedOpsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} {1} not found")]
    NotFound(&'static str, i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl MedOpsError {
    pub fn to_error_code(&self) -> &'static str {
        match self {
            MedOpsError::Database(_) => "DATABASE_ERROR",
            MedOpsError::NotFound(..) => "NOT_FOUND",
            MedOpsError::InvalidInput(_) => "INVALID_INPUT",
            MedOpsError::Config(_) => "CONFIG_ERROR",
            MedOpsError::Http(_) => "HTTP_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.to_error_code().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MedOpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_and_code() {
        let err = MedOpsError::NotFound("patient", 42);
        assert_eq!(err.to_string(), "patient 42 not found");
        assert_eq!(err.to_error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_invalid_input_code() {
        let err = MedOpsError::InvalidInput("bad stage".to_string());
        assert_eq!(err.to_error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_error_response_serializes() {
        let resp = MedOpsError::Config("missing DATABASE_URL".to_string()).to_error_response();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("CONFIG_ERROR"));
        assert!(json.contains("missing DATABASE_URL"));
    }
}
