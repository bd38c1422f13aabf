//! `log`, `show` and `changes`.

use anyhow::Context;
use clap::Args;

use super::common::{GlobalArgs, OutputFormat, connect, summary_line, to_json};
use crate::infra::github::{CommitRecord, FileChange, FileStatus, RepositoryClient, StatusFilter};
use crate::shared::repo_ref::RepoRef;
use crate::shared::table::{Column, Table};

const SHORT_SHA_LEN: usize = 7;

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LogArgs {
    /// Repository as NAME, OWNER/NAME or a GitHub URL
    pub repo: RepoRef,

    /// Branch to walk (defaults to the repository's default branch)
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Stop after this many commits
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ShowArgs {
    /// Repository as NAME, OWNER/NAME or a GitHub URL
    pub repo: RepoRef,

    /// Commit SHA
    pub sha: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ChangesArgs {
    /// Repository as NAME, OWNER/NAME or a GitHub URL
    pub repo: RepoRef,

    /// Commit SHA
    pub sha: String,

    /// Keep files with this status (repeatable; default: added, modified, deleted)
    #[arg(short, long = "status", value_name = "STATUS")]
    pub statuses: Vec<FileStatus>,
}

impl ChangesArgs {
    fn status_filter(&self) -> StatusFilter {
        if self.statuses.is_empty() {
            StatusFilter::default()
        } else {
            StatusFilter::new(self.statuses.iter().copied())
        }
    }
}

#[tokio::main]
pub async fn run_log(args: &LogArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let client = connect().await?;
    print!("{}", log(&client, args, global).await?);
    Ok(())
}

#[tokio::main]
pub async fn run_show(args: &ShowArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let client = connect().await?;
    print!("{}", show(&client, args, global).await?);
    Ok(())
}

#[tokio::main]
pub async fn run_changes(args: &ChangesArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let client = connect().await?;
    print!("{}", changes(&client, args, global).await?);
    Ok(())
}

/// Walk first parents from the branch tip, fetching only as many commits as
/// `--limit` asks for.
pub async fn log(
    client: &RepositoryClient,
    args: &LogArgs,
    global: &GlobalArgs,
) -> anyhow::Result<String> {
    let owner = args.repo.owner_or(global.owner.as_deref());
    let mut chain = client
        .commit_chain(&args.repo.name, owner, args.branch.as_deref())
        .await
        .with_context(|| format!("Failed to resolve branch tip of {}", args.repo.name))?;

    let mut records = Vec::new();
    while args.limit.is_none_or(|limit| records.len() < limit) {
        let Some(record) = chain
            .next()
            .await
            .with_context(|| format!("Failed to walk history of {}", args.repo.name))?
        else {
            break;
        };
        records.push(record);
    }

    match global.format {
        OutputFormat::Json => to_json(&records),
        OutputFormat::Table => Ok(format_log(&records)),
    }
}

/// Raw commit object, always as JSON.
pub async fn show(
    client: &RepositoryClient,
    args: &ShowArgs,
    global: &GlobalArgs,
) -> anyhow::Result<String> {
    let owner = args.repo.owner_or(global.owner.as_deref());
    let commit = client
        .get_commit(&args.repo.name, &args.sha, owner)
        .await
        .with_context(|| format!("Failed to get commit {}", args.sha))?;
    to_json(&commit)
}

pub async fn changes(
    client: &RepositoryClient,
    args: &ChangesArgs,
    global: &GlobalArgs,
) -> anyhow::Result<String> {
    let owner = args.repo.owner_or(global.owner.as_deref());
    let files = client
        .view_commit_changes(&args.repo.name, &args.sha, owner, &args.status_filter())
        .await
        .with_context(|| format!("Failed to get changes of commit {}", args.sha))?;

    match global.format {
        OutputFormat::Json => to_json(&files),
        OutputFormat::Table => Ok(format_changes(&files)),
    }
}

fn short_sha(sha: &str) -> String {
    sha.chars().take(SHORT_SHA_LEN).collect()
}

fn format_log(records: &[CommitRecord]) -> String {
    let mut table = Table::new(vec![
        Column::new("SHA", SHORT_SHA_LEN),
        Column::new("MESSAGE", 72),
    ]);
    for record in records {
        table.push(vec![
            short_sha(&record.sha),
            summary_line(&record.message).to_string(),
        ]);
    }
    table.render()
}

fn format_changes(files: &[FileChange]) -> String {
    if files.is_empty() {
        return "No matching file changes.\n".to_string();
    }

    let mut table = Table::new(vec![
        Column::new("STATUS", 9),
        Column::new("+", 6),
        Column::new("-", 6),
        Column::new("FILE", 200),
    ]);
    for file in files {
        table.push(vec![
            file.status.to_string(),
            file.additions.to_string(),
            file.deletions.to_string(),
            file.file_name.clone(),
        ]);
    }
    table.render()
}
