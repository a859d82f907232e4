//! Failure taxonomy of the HTTP layer

/// Why a call to a backend service failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (refused, DNS, timeout)
    #[error("Connection failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },

    /// A 2xx body that is not the expected JSON
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    /// Text suitable for a status-bar notice
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport("request timed out".to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// The services answer either `{"message": "..."}` or a field → message
/// map for validation failures.
pub fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => {
            if let Some(serde_json::Value::String(message)) = map.get("message") {
                return Some(message.clone());
            }
            let fields: Vec<String> = map
                .iter()
                .filter_map(|(field, value)| value.as_str().map(|msg| format!("{field}: {msg}")))
                .collect();
            if fields.is_empty() {
                Some(body.to_string())
            } else {
                Some(fields.join("; "))
            }
        }
        Ok(serde_json::Value::String(message)) => Some(message),
        _ => Some(body.to_string()),
    }
}
