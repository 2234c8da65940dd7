use thiserror::Error;

/// Failure of a single call to the analysis service
///
/// Non-2xx responses keep the raw body so the diagnostic text reaches the
/// caller unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// The service answered with a non-2xx status
    #[error("API {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection, timeout or other transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// The local media could not be read for upload
    #[error("Media error: {0}")]
    Media(String),

    /// The success body was not the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl RequestError {
    /// HTTP status of the failed call, when the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw error body returned by the service
    pub fn body(&self) -> Option<&str> {
        match self {
            RequestError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RequestError::Decode(err.to_string())
        } else {
            RequestError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_keeps_body() {
        let err = RequestError::Status {
            status: 400,
            body: "{\"error\": \"sessionId is required\"}".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "API 400: {\"error\": \"sessionId is required\"}"
        );
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.body(), Some("{\"error\": \"sessionId is required\"}"));
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = RequestError::Network("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);
    }
}
