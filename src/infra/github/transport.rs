//! HTTP transport for the GitHub REST API.
//!
//! One `reqwest::Client` serves both call modes: authenticated requests carry
//! the session credentials, anonymous ones go out without an `Authorization`
//! header (used for the public repository listing).

use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{GitHubError, Result, error_message_from_body};

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("repolens/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Characters escaped inside URL paths. `/` is left alone so nested content
/// paths and branch names like `feature/x` keep their structure.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a value for use inside a request path.
pub fn encode_path(value: &str) -> String {
    utf8_percent_encode(value, PATH_ESCAPE).to_string()
}

/// Credentials used for authenticated calls.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP Basic with a username and password (or personal access token).
    Basic { username: String, password: String },
    /// Bearer token, optionally paired with the acting username.
    Token {
        token: String,
        username: Option<String>,
    },
}

impl Credentials {
    /// Pick a credential form from loosely supplied parts.
    ///
    /// Username and password together select Basic; otherwise a token is
    /// required and the username (if any) rides along as the acting user.
    pub fn from_parts(
        username: Option<String>,
        password: Option<String>,
        token: Option<String>,
    ) -> Result<Self> {
        match (username, password, token) {
            (Some(username), Some(password), _) => Ok(Self::Basic { username, password }),
            (username, _, Some(token)) => Ok(Self::Token { token, username }),
            _ => Err(GitHubError::Authentication(
                "either a username and password or an API token is required".to_string(),
            )),
        }
    }

    /// Username supplied alongside the credentials, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Basic { username, .. } => Some(username),
            Self::Token { username, .. } => username.as_deref(),
        }
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::Token { token, .. } => request.bearer_auth(token),
        }
    }
}

// Secrets never reach logs or panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Token { username, .. } => f
                .debug_struct("Token")
                .field("token", &"<redacted>")
                .field("username", username)
                .finish(),
        }
    }
}

/// Whether a request carries the session credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Authenticated,
    Anonymous,
}

/// Thin wrapper over `reqwest::Client` bound to one API root.
pub struct HttpTransport {
    base_url: String,
    client: Client,
    credentials: Credentials,
}

impl HttpTransport {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// GET `path` (relative to the API root) and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, access: Access) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).header(ACCEPT, GITHUB_JSON);
        if access == Access::Authenticated {
            request = self.credentials.apply(request);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(path, ?access, status = status.as_u16(), "GitHub API response");

        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, access, path, &body));
        }

        serde_json::from_str(&body).map_err(|e| GitHubError::malformed(path, &e))
    }
}

/// Map a non-2xx response to an error kind.
///
/// Only authenticated calls distinguish bad credentials and missing resources;
/// every anonymous failure is a remote-service error.
fn status_error(status: StatusCode, access: Access, resource: &str, body: &str) -> GitHubError {
    let message = error_message_from_body(body, status.canonical_reason().unwrap_or("request failed"));

    match (access, status) {
        (Access::Authenticated, StatusCode::UNAUTHORIZED) => GitHubError::Authentication(message),
        (Access::Authenticated, StatusCode::NOT_FOUND) => {
            GitHubError::NotFound(resource.to_string())
        }
        _ => GitHubError::RemoteService {
            status: Some(status.as_u16()),
            message,
        },
    }
}
