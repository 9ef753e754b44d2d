use crate::error::Error;
use serde::Deserialize;

/// The body the backend sends alongside a non-success status code.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct BackendErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

impl BackendErrorResponse {
    /// Parses an error body. Bodies that aren't the expected JSON object yield an error response without a message.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn into_error(self, status: u16) -> Error {
        Error::Backend {
            status,
            message: self.error.filter(|message| !message.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_with_message() {
        let response = BackendErrorResponse::from_body(r#"{"error": "Invalid client ID"}"#);
        assert_eq!(response.error.as_deref(), Some("Invalid client ID"));

        match response.into_error(400) {
            Error::Backend { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("Invalid client ID"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn html_error_body_has_no_message() {
        let response = BackendErrorResponse::from_body("<html><body>Internal Server Error</body></html>");
        assert_eq!(response, BackendErrorResponse::default());
    }

    #[test]
    fn empty_error_message_is_dropped() {
        match BackendErrorResponse::from_body(r#"{"error": ""}"#).into_error(500) {
            Error::Backend { message, .. } => assert_eq!(message, None),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
