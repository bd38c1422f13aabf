//! Authenticated session against the GitHub REST API.

use std::process::Command;

use tracing::info;

use super::error::{GitHubError, Result};
use super::models::{UserInfo, UserProfile};
use super::transport::{Access, Credentials, HttpTransport, encode_path};

/// Read-only GitHub client bound to one authenticated user.
///
/// Built once by [`RepositoryClient::login`]; nothing in it changes afterwards,
/// so a single instance can serve any number of independent queries.
pub struct RepositoryClient {
    pub(crate) transport: HttpTransport,
    profile: UserProfile,
    username: Option<String>,
}

impl RepositoryClient {
    /// Authenticate against `api_url` and resolve the current user's profile.
    ///
    /// Fails with [`GitHubError::Authentication`] when the service rejects the
    /// credentials.
    pub async fn login(credentials: Credentials, api_url: &str) -> Result<Self> {
        let transport = HttpTransport::new(api_url, credentials)?;
        let profile: UserProfile = transport
            .get_json("/user", Access::Authenticated)
            .await
            .map_err(|e| match e {
                // `/user` always exists for a valid session
                GitHubError::NotFound(_) => {
                    GitHubError::Authentication("no authenticated user for these credentials".to_string())
                }
                other => other,
            })?;

        let username = transport
            .credentials()
            .username()
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .or_else(|| profile.login.clone().filter(|l| !l.is_empty()));

        info!(
            api_url = transport.base_url(),
            user = username.as_deref().unwrap_or("<unknown>"),
            "Authenticated against GitHub"
        );

        Ok(Self {
            transport,
            profile,
            username,
        })
    }

    /// Acting username: the one supplied with the credentials, else the
    /// profile login.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Return `explicit_owner` if given and non-empty, else the acting username.
    pub fn resolve_owner<'a>(&'a self, explicit_owner: Option<&'a str>) -> Result<&'a str> {
        explicit_owner
            .filter(|o| !o.is_empty())
            .or(self.username.as_deref())
            .ok_or_else(|| {
                GitHubError::Configuration(
                    "a repository owner is required when no username is known".to_string(),
                )
            })
    }

    /// Profile of the authenticated user.
    pub fn get_user_info(&self) -> UserInfo {
        UserInfo::from(&self.profile)
    }

    /// `/repos/{owner}/{repo}` with both segments encoded.
    pub(crate) fn repo_path(&self, owner: &str, repo_name: &str) -> String {
        format!("/repos/{}/{}", encode_path(owner), encode_path(repo_name))
    }
}

/// Get GitHub token from `gh auth token` command.
/// This reuses the authentication from GitHub CLI.
pub fn get_gh_token() -> Result<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .map_err(|e| GitHubError::Token(format!("failed to run gh auth token: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitHubError::Token(format!(
            "gh auth token failed: {}",
            stderr.trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(GitHubError::Token(
            "gh auth token returned empty token".to_string(),
        ));
    }

    Ok(token)
}
