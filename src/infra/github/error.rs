//! GitHub API error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{}", format_remote_error(.status, .message))]
    RemoteService {
        /// HTTP status, absent when the body could not be decoded.
        status: Option<u16>,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to get GitHub token: {0}")]
    Token(String),
}

impl GitHubError {
    /// Error for a body that is not the JSON shape we expected.
    pub(crate) fn malformed(resource: &str, err: &serde_json::Error) -> Self {
        Self::RemoteService {
            status: None,
            message: format!("Malformed response from {resource}: {err}"),
        }
    }
}

fn format_remote_error(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("GitHub API error: {message} (HTTP {code})"),
        None => format!("GitHub API error: {message}"),
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Extract a human-readable message from a GitHub error body.
///
/// GitHub answers errors with `{"message": "...", "errors": [...]}`. Falls back
/// to the raw body (or the status reason) when the body is not of that shape.
pub(crate) fn error_message_from_body(body: &str, fallback: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        let trimmed = body.trim();
        return if trimmed.is_empty() {
            fallback.to_string()
        } else {
            trimmed.to_string()
        };
    };

    let mut msg = value
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or(fallback)
        .to_string();

    if let Some(errors) = value.get("errors").and_then(|e| e.as_array()) {
        msg.push_str(&format_error_details(errors));
    }

    msg
}

/// Format error details from GitHub API errors array.
/// Returns a formatted string like "[field1 is code1, field2 is code2]" or empty string.
fn format_error_details(errors: &[serde_json::Value]) -> String {
    let error_details: Vec<String> = errors
        .iter()
        .filter_map(|e| {
            let field = e.get("field").and_then(|v| v.as_str());
            let code = e.get("code").and_then(|v| v.as_str());
            match (field, code) {
                (Some(f), Some(c)) => Some(format!("{f} is {c}")),
                (Some(f), None) => Some(f.to_string()),
                (None, Some(c)) => Some(c.to_string()),
                (None, None) => None,
            }
        })
        .collect();

    if error_details.is_empty() {
        String::new()
    } else {
        format!(" [{}]", error_details.join(", "))
    }
}
