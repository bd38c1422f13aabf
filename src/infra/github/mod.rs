//! Read-only GitHub REST client.
//!
//! `RepositoryClient` authenticates once and answers repository, contents and
//! commit queries through a single `HttpTransport`.

mod client;
mod commit;
pub(crate) mod error;
#[cfg(test)]
pub(crate) mod mock;
pub mod models;
mod repo;
pub mod transport;

pub use client::{RepositoryClient, get_gh_token};
pub use commit::CommitChain;
pub use error::GitHubError;
pub use models::{
    Commit, CommitRecord, ContentEntry, ContentType, FileChange, FileStatus, RepositorySummary,
    StatusFilter, UserInfo,
};
pub use transport::{Credentials, DEFAULT_API_URL};
