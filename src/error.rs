use serde_json::Value as JsonValue;

/// Errors surfaced by every CampusWatch API operation.
///
/// The display string is always non-empty and human-readable, suitable for
/// feeding straight into a toast or status line. Server-reported details are
/// preferred over generic transport text; each operation supplies a fallback
/// message for responses that carry no usable body.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The server answered with an error status; `detail` comes from the
    /// response body (`detail` string, else the first field error), or the
    /// operation's fallback message when the body carries neither.
    #[error("{detail}")]
    Api { status: u16, detail: String },

    /// The request produced no response (connection, DNS, decode, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A payload failed to serialize before the request was sent.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No refresh token is held, or the server rejected the refresh
    /// exchange. The session has already been signed out.
    #[error("Session expired, please sign in again")]
    SessionExpired,

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of a server-reported error, if there was a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Build an `Api` error from an error response body.
    ///
    /// Resolution order: body `detail` string → first message of the first
    /// field-error key → `fallback`.
    pub(crate) fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        let detail = extract_detail(body)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Self::Api { status, detail }
    }
}

/// Pull a human-readable message out of an error body.
///
/// CampusWatch errors are either `{"detail": "..."}` or a field-error map
/// like `{"email": ["Enter a valid email address."]}`.
fn extract_detail(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    if let Some(detail) = value.get("detail").and_then(JsonValue::as_str) {
        return Some(detail.to_string());
    }
    let fields = value.as_object()?;
    fields.values().find_map(|messages| match messages {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(list) => list.first().and_then(JsonValue::as_str).map(String::from),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_preferred() {
        let err = ApiError::from_response(401, r#"{"detail":"Invalid credentials"}"#, "fallback");
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn first_field_error_used_without_detail() {
        let err = ApiError::from_response(
            400,
            r#"{"email":["Enter a valid email address.","Too long."]}"#,
            "fallback",
        );
        assert_eq!(err.to_string(), "Enter a valid email address.");
    }

    #[test]
    fn plain_string_field_error() {
        let err = ApiError::from_response(400, r#"{"username":"Already taken"}"#, "fallback");
        assert_eq!(err.to_string(), "Already taken");
    }

    #[test]
    fn fallback_on_empty_body() {
        let err = ApiError::from_response(500, "", "Unable to load incidents");
        assert_eq!(err.to_string(), "Unable to load incidents");
    }

    #[test]
    fn fallback_on_non_json_body() {
        let err =
            ApiError::from_response(502, "<html>Bad Gateway</html>", "Unable to load incidents");
        assert_eq!(err.to_string(), "Unable to load incidents");
    }

    #[test]
    fn fallback_on_empty_detail() {
        let err = ApiError::from_response(400, r#"{"detail":""}"#, "Something went wrong");
        assert_eq!(err.to_string(), "Something went wrong");
    }

    #[test]
    fn message_never_empty() {
        let errors = [
            ApiError::from_response(400, "{}", "fallback"),
            ApiError::SessionExpired,
            ApiError::Config("CAMPUSWATCH_API_URL: relative URL without a base".into()),
        ];
        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
