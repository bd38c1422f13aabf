//! Typed views of GitHub REST responses and the records projected from them.
//!
//! Response structs only declare the fields this crate reads; everything else
//! in the payload is ignored. Optional fields that GitHub omits or sends as
//! `null` deserialize to `None`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Users ============

/// Profile returned by `GET /user`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UserProfile {
    pub login: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
}

/// Flattened subset of the authenticated user's profile.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserInfo {
    pub name: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
}

impl From<&UserProfile> for UserInfo {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            location: profile.location.clone(),
            company: profile.company.clone(),
            email: profile.email.clone(),
            bio: profile.bio.clone(),
            followers: profile.followers,
            following: profile.following,
        }
    }
}

// ============ Repositories ============

/// Entry of `GET /users/{owner}/repos`, projected to the fields we expose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub default_branch: Option<String>,
    pub clone_url: Option<String>,
}

/// Subset of `GET /repos/{owner}/{repo}`.
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryDetail {
    pub default_branch: Option<String>,
}

/// Subset of `GET /repos/{owner}/{repo}/branches/{branch}`.
#[derive(Debug, Deserialize)]
pub(crate) struct BranchDetail {
    pub commit: ShaRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShaRef {
    pub sha: String,
}

// ============ Contents ============

/// Kind of a contents entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    File,
    Dir,
    Symlink,
    Submodule,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::File => "file",
            Self::Dir => "dir",
            Self::Symlink => "symlink",
            Self::Submodule => "submodule",
        };
        f.write_str(s)
    }
}

/// One file or directory in a repository tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: ContentType,
    pub git_url: Option<String>,
    pub path: String,
}

/// The contents endpoint answers a directory with an array and a file with a
/// single object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ContentsResponse {
    Listing(Vec<ContentEntry>),
    Single(ContentEntry),
}

impl ContentsResponse {
    pub fn into_entries(self) -> Vec<ContentEntry> {
        match self {
            Self::Listing(entries) => entries,
            Self::Single(entry) => vec![entry],
        }
    }
}

// ============ Commits ============

/// Raw commit object of `GET /repos/{owner}/{repo}/commits/{sha}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Commit {
    pub sha: String,
    pub html_url: Option<String>,
    pub commit: CommitDetail,
    #[serde(default)]
    pub parents: Vec<ShaRef>,
    pub stats: Option<CommitStats>,
    #[serde(default)]
    pub files: Vec<CommitFile>,
}

impl Commit {
    /// SHA of the first listed parent; merge siblings are ignored.
    pub fn first_parent_sha(&self) -> Option<&str> {
        self.parents.first().map(|p| p.sha.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommitDetail {
    #[serde(default)]
    pub message: String,
    pub author: Option<GitSignature>,
    pub committer: Option<GitSignature>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GitSignature {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommitStats {
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub total: u64,
}

/// Per-file entry of a commit's `files` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommitFile {
    pub filename: String,
    pub status: FileStatus,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changes: u64,
    pub patch: Option<String>,
    pub previous_filename: Option<String>,
}

/// `{sha, message}` pair emitted per hop of the first-parent walk.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommitRecord {
    pub sha: String,
    pub message: String,
}

/// File-level change of a commit.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileChange {
    pub file_name: String,
    pub additions: u64,
    pub changes: u64,
    pub deletions: u64,
    pub status: FileStatus,
    pub patch: Option<String>,
}

impl From<&CommitFile> for FileChange {
    fn from(file: &CommitFile) -> Self {
        Self {
            file_name: file.filename.clone(),
            additions: file.additions,
            changes: file.changes,
            deletions: file.deletions,
            status: file.status,
            patch: file.patch.clone(),
        }
    }
}

/// Status of a changed file.
///
/// GitHub reports deletions as `removed`; they are exposed as `deleted`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    #[serde(rename(serialize = "deleted", deserialize = "removed"), alias = "deleted")]
    Deleted,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Unknown,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Renamed => "renamed",
            Self::Copied => "copied",
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "added" => Ok(Self::Added),
            "modified" => Ok(Self::Modified),
            "deleted" | "removed" => Ok(Self::Deleted),
            "renamed" => Ok(Self::Renamed),
            "copied" => Ok(Self::Copied),
            "changed" => Ok(Self::Changed),
            "unchanged" => Ok(Self::Unchanged),
            other => Err(format!(
                "unknown file status '{other}' (expected added, modified, deleted, renamed, copied, changed or unchanged)"
            )),
        }
    }
}

/// Set of statuses kept by `view_commit_changes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFilter(HashSet<FileStatus>);

impl StatusFilter {
    pub fn new(statuses: impl IntoIterator<Item = FileStatus>) -> Self {
        Self(statuses.into_iter().collect())
    }

    pub fn contains(&self, status: FileStatus) -> bool {
        self.0.contains(&status)
    }
}

impl Default for StatusFilter {
    /// Added, modified and deleted files.
    fn default() -> Self {
        Self::new([FileStatus::Added, FileStatus::Modified, FileStatus::Deleted])
    }
}
