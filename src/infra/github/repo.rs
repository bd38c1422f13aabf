//! Repository operations.

use super::client::RepositoryClient;
use super::error::{GitHubError, Result};
use super::models::{ContentEntry, ContentsResponse, RepositoryDetail, RepositorySummary};
use super::transport::{Access, encode_path};

impl RepositoryClient {
    /// List public repositories of `owner` (or the acting user).
    ///
    /// Uses the anonymous listing endpoint, so only public repositories show
    /// up and any non-2xx answer is a [`GitHubError::RemoteService`]. Order is
    /// whatever GitHub returns.
    pub async fn list_repositories(&self, owner: Option<&str>) -> Result<Vec<RepositorySummary>> {
        let owner = self.resolve_owner(owner)?;
        let path = format!("/users/{}/repos", encode_path(owner));
        self.transport.get_json(&path, Access::Anonymous).await
    }

    /// List the entries at `path` (`/` or empty for the root).
    ///
    /// A path naming a single file yields a one-element list.
    pub async fn list_contents(
        &self,
        repo_name: &str,
        owner: Option<&str>,
        path: &str,
    ) -> Result<Vec<ContentEntry>> {
        let owner = self.resolve_owner(owner)?;
        let trimmed = path.trim_matches('/');
        let mut url = format!("{}/contents", self.repo_path(owner, repo_name));
        if !trimmed.is_empty() {
            url.push('/');
            url.push_str(&encode_path(trimmed));
        }

        let response: ContentsResponse = self
            .transport
            .get_json(&url, Access::Authenticated)
            .await?;
        Ok(response.into_entries())
    }

    /// Name of the repository's default branch.
    pub async fn get_default_branch(&self, repo_name: &str, owner: Option<&str>) -> Result<String> {
        let owner = self.resolve_owner(owner)?;
        let path = self.repo_path(owner, repo_name);
        let detail: RepositoryDetail = self.transport.get_json(&path, Access::Authenticated).await?;

        detail
            .default_branch
            .filter(|b| !b.is_empty())
            .ok_or_else(|| GitHubError::RemoteService {
                status: None,
                message: format!("{owner}/{repo_name} reports no default branch"),
            })
    }
}
