use thiserror::Error;

/// Failures reported by a [`ContentGateway`](crate::gateway::ContentGateway).
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Username, repository or token is missing. Checked before any request is sent.
    #[error("GitHub settings not configured")]
    NotConfigured,

    #[error("transport error: {0}")]
    Transport(String),

    /// The response could not be read as a listing, a file, base64 or UTF-8 text.
    #[error("decode error: {0}")]
    Decode(String),

    /// GitHub answered with a non-success status. Carries its own message when it sent one.
    #[error("{0}")]
    RemoteRejected(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            GatewayError::Decode(value.to_string())
        } else {
            GatewayError::Transport(value.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(value: serde_json::Error) -> Self {
        GatewayError::Decode(value.to_string())
    }
}

impl From<base64::DecodeError> for GatewayError {
    fn from(value: base64::DecodeError) -> Self {
        GatewayError::Decode(format!("invalid base64 payload: {}", value))
    }
}

impl From<std::string::FromUtf8Error> for GatewayError {
    fn from(value: std::string::FromUtf8Error) -> Self {
        GatewayError::Decode(format!("payload is not UTF-8: {}", value))
    }
}

/// Failures of the publish workflow.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("title is required to publish a post")]
    EmptyTitle,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    use super::*;

    #[test]
    fn test_decode_errors_map_to_decode() {
        let err: GatewayError = STANDARD.decode("@@@").unwrap_err().into();
        assert!(matches!(err, GatewayError::Decode(_)));

        let err: GatewayError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert!(matches!(err, GatewayError::Decode(_)));

        let err: GatewayError = serde_json::from_str::<Vec<String>>("{}").unwrap_err().into();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(GatewayError::NotConfigured.to_string(), "GitHub settings not configured");
        assert_eq!(GatewayError::RemoteRejected("Bad credentials".to_string()).to_string(), "Bad credentials");
        let err: PublishError = GatewayError::RemoteRejected("Not Found".to_string()).into();
        assert_eq!(err.to_string(), "Not Found");
    }
}
