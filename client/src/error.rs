//! Error type shared by every backend call.

use serde::Deserialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Service {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Error body shape shared by PostgREST and the storage API. Every
/// field is optional in practice.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    error: Option<String>,
    message: Option<String>,
}

/// Turn a non-success response into a `Service` error, decoding the
/// body when it has the usual JSON error shape.
pub(crate) async fn service_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => ApiError::Service {
            status,
            code: parsed.code.or(parsed.error),
            message: parsed.message.unwrap_or_else(|| format!("HTTP {status}")),
        },
        Err(_) => ApiError::Service {
            status,
            code: None,
            message: if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let err = ApiError::Service {
            status: 401,
            code: Some("PGRST301".to_string()),
            message: "JWT expired".to_string(),
        };
        assert_eq!(err.to_string(), "JWT expired (HTTP 401)");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.status(), None);
    }
}
