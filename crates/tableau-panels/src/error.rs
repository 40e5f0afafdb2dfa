//! Error types for the scraping pipeline.

/// All errors that can occur while acquiring a session or resolving panels.
///
/// Per-zone lookup misses are not represented here: a zone without image
/// metadata, or with a worksheet outside the panel table, is skipped.
#[derive(thiserror::Error, Debug)]
pub enum PanelError {
    /// The dashboard HTML did not carry the session token markers.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A response body could not be framed or parsed as JSON.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A parsed response lacked a key on the path to the zone tree.
    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PanelError {
    /// Stable label used in machine-readable error output.
    pub fn kind(&self) -> &'static str {
        match self {
            PanelError::MalformedResponse(_) => "malformed_response",
            PanelError::ParseError(_) => "parse_error",
            PanelError::SchemaError(_) => "schema_error",
            PanelError::Http(_) => "http",
            PanelError::UnexpectedStatus { .. } => "unexpected_status",
            PanelError::InvalidConfig(_) => "invalid_config",
        }
    }
}

impl From<serde_json::Error> for PanelError {
    fn from(e: serde_json::Error) -> Self {
        PanelError::ParseError(e.to_string())
    }
}

pub type PanelResult<T> = Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(
            PanelError::MalformedResponse("x".into()).kind(),
            "malformed_response"
        );
        assert_eq!(PanelError::ParseError("x".into()).kind(), "parse_error");
        assert_eq!(PanelError::SchemaError("zones".into()).kind(), "schema_error");
        assert_eq!(
            PanelError::UnexpectedStatus {
                url: "https://example.com".into(),
                status: 410,
            }
            .kind(),
            "unexpected_status"
        );
    }

    #[test]
    fn test_json_error_maps_to_parse_error() {
        let err: PanelError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, PanelError::ParseError(_)));
    }

    #[test]
    fn test_schema_error_message_names_path() {
        let err = PanelError::SchemaError("missing `worldUpdate.applicationPresModel`".into());
        assert_eq!(
            err.to_string(),
            "Schema error: missing `worldUpdate.applicationPresModel`"
        );
    }
}
