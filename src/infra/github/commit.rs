//! Commit operations and the first-parent history walk.

use tracing::debug;

use super::client::RepositoryClient;
use super::error::{GitHubError, Result};
use super::models::{BranchDetail, Commit, CommitRecord, FileChange, StatusFilter};
use super::transport::{Access, encode_path};

/// Lazy walk from a branch tip to the root commit along first parents.
///
/// Each [`CommitChain::next`] costs one request. Secondary parents of merge
/// commits are never visited. Once the root is reached, or a request fails,
/// the chain is exhausted and cannot be restarted.
pub struct CommitChain<'a> {
    client: &'a RepositoryClient,
    owner: String,
    repo_name: String,
    next_sha: Option<String>,
}

impl<'a> CommitChain<'a> {
    fn new(client: &'a RepositoryClient, owner: &str, repo_name: &str, tip_sha: String) -> Self {
        Self {
            client,
            owner: owner.to_string(),
            repo_name: repo_name.to_string(),
            next_sha: Some(tip_sha),
        }
    }

    /// Fetch the next commit, or `None` past the root.
    pub async fn next(&mut self) -> Result<Option<CommitRecord>> {
        let Some(sha) = self.next_sha.take() else {
            return Ok(None);
        };

        let commit = self
            .client
            .get_commit(&self.repo_name, &sha, Some(self.owner.as_str()))
            .await?;
        self.next_sha = commit.first_parent_sha().map(str::to_string);
        debug!(sha = %sha, parent = ?self.next_sha, "Walked commit");

        Ok(Some(CommitRecord {
            sha,
            message: commit.commit.message,
        }))
    }

    /// Drain the remaining chain, tip first.
    pub async fn collect(mut self) -> Result<Vec<CommitRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await? {
            records.push(record);
        }
        Ok(records)
    }
}

impl RepositoryClient {
    /// Start a first-parent walk at the tip of `branch` (default branch when
    /// omitted or empty).
    pub async fn commit_chain(
        &self,
        repo_name: &str,
        owner: Option<&str>,
        branch: Option<&str>,
    ) -> Result<CommitChain<'_>> {
        let owner = self.resolve_owner(owner)?;
        let branch = match branch.filter(|b| !b.is_empty()) {
            Some(b) => b.to_string(),
            None => self.get_default_branch(repo_name, Some(owner)).await?,
        };

        let path = format!(
            "{}/branches/{}",
            self.repo_path(owner, repo_name),
            encode_path(&branch)
        );
        let detail: BranchDetail = self.transport.get_json(&path, Access::Authenticated).await?;

        Ok(CommitChain::new(self, owner, repo_name, detail.commit.sha))
    }

    /// `{sha, message}` for every commit from the branch tip to the root,
    /// following first parents.
    pub async fn list_commit_messages(
        &self,
        repo_name: &str,
        owner: Option<&str>,
        branch: Option<&str>,
    ) -> Result<Vec<CommitRecord>> {
        self.commit_chain(repo_name, owner, branch)
            .await?
            .collect()
            .await
    }

    /// Raw commit object for `commit_sha`.
    pub async fn get_commit(
        &self,
        repo_name: &str,
        commit_sha: &str,
        owner: Option<&str>,
    ) -> Result<Commit> {
        let owner = self.resolve_owner(owner)?;
        let path = format!(
            "{}/commits/{}",
            self.repo_path(owner, repo_name),
            encode_path(commit_sha)
        );
        self.transport
            .get_json(&path, Access::Authenticated)
            .await
            .map_err(|e| match e {
                // GitHub answers an unknown SHA with 422 "No commit found for SHA"
                GitHubError::RemoteService {
                    status: Some(422), ..
                } => GitHubError::NotFound(path.clone()),
                other => other,
            })
    }

    /// File-level changes of a commit whose status is in `status_filter`.
    pub async fn view_commit_changes(
        &self,
        repo_name: &str,
        commit_sha: &str,
        owner: Option<&str>,
        status_filter: &StatusFilter,
    ) -> Result<Vec<FileChange>> {
        let commit = self.get_commit(repo_name, commit_sha, owner).await?;

        Ok(commit
            .files
            .iter()
            .filter(|file| status_filter.contains(file.status))
            .map(FileChange::from)
            .collect())
    }
}
