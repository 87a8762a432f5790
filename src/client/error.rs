use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("report service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("could not set up the HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("could not reach the report service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("report service answered {status}")]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("could not build the upload form: {0}")]
    Form(#[source] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_status_errors_carry_a_status() {
        let status = ClientError::Status {
            status: StatusCode::BAD_REQUEST,
            detail: Some("coluna ausente".into()),
        };
        assert_eq!(status.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(status.to_string(), "report service answered 400 Bad Request");

        let timeout = ClientError::Timeout(Duration::from_secs(60));
        assert!(timeout.is_timeout());
        assert_eq!(timeout.status(), None);
    }

    #[test]
    fn client_setup_failure_is_not_reported_as_unreachable() {
        let source = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let err = ClientError::Build(source);
        let message = err.to_string();
        assert!(message.starts_with("could not set up the HTTP client"), "{message}");
        assert!(!message.contains("could not reach"));
        assert_eq!(err.status(), None);
    }
}
