//! `repos`, `contents` and `default-branch`.

use anyhow::Context;
use clap::Args;

use super::common::{GlobalArgs, OutputFormat, connect, to_json};
use crate::infra::github::{ContentEntry, RepositoryClient, RepositorySummary};
use crate::shared::repo_ref::RepoRef;
use crate::shared::table::{Column, Table};

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ReposArgs {
    /// Account whose public repositories are listed (defaults to --owner, then you)
    #[arg(value_name = "OWNER")]
    pub account: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ContentsArgs {
    /// Repository as NAME, OWNER/NAME or a GitHub URL
    pub repo: RepoRef,

    /// Directory or file inside the repository
    #[arg(default_value = "/")]
    pub path: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DefaultBranchArgs {
    /// Repository as NAME, OWNER/NAME or a GitHub URL
    pub repo: RepoRef,
}

#[tokio::main]
pub async fn run_repos(args: &ReposArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let client = connect().await?;
    print!("{}", repos(&client, args, global).await?);
    Ok(())
}

#[tokio::main]
pub async fn run_contents(args: &ContentsArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let client = connect().await?;
    print!("{}", contents(&client, args, global).await?);
    Ok(())
}

#[tokio::main]
pub async fn run_default_branch(
    args: &DefaultBranchArgs,
    global: &GlobalArgs,
) -> anyhow::Result<()> {
    let client = connect().await?;
    print!("{}", default_branch(&client, args, global).await?);
    Ok(())
}

pub async fn repos(
    client: &RepositoryClient,
    args: &ReposArgs,
    global: &GlobalArgs,
) -> anyhow::Result<String> {
    let owner = args.account.as_deref().or(global.owner.as_deref());
    let repositories = client
        .list_repositories(owner)
        .await
        .context("Failed to list repositories")?;

    match global.format {
        OutputFormat::Json => to_json(&repositories),
        OutputFormat::Table => Ok(format_repositories(&repositories)),
    }
}

pub async fn contents(
    client: &RepositoryClient,
    args: &ContentsArgs,
    global: &GlobalArgs,
) -> anyhow::Result<String> {
    let owner = args.repo.owner_or(global.owner.as_deref());
    let entries = client
        .list_contents(&args.repo.name, owner, &args.path)
        .await
        .with_context(|| format!("Failed to list {} in {}", args.path, args.repo.name))?;

    match global.format {
        OutputFormat::Json => to_json(&entries),
        OutputFormat::Table => Ok(format_contents(&entries)),
    }
}

pub async fn default_branch(
    client: &RepositoryClient,
    args: &DefaultBranchArgs,
    global: &GlobalArgs,
) -> anyhow::Result<String> {
    let owner = args.repo.owner_or(global.owner.as_deref());
    let branch = client
        .get_default_branch(&args.repo.name, owner)
        .await
        .with_context(|| format!("Failed to get default branch of {}", args.repo.name))?;

    match global.format {
        OutputFormat::Json => to_json(&serde_json::json!({ "default_branch": branch })),
        OutputFormat::Table => Ok(format!("{branch}\n")),
    }
}

fn format_repositories(repositories: &[RepositorySummary]) -> String {
    if repositories.is_empty() {
        return "No repositories found.\n".to_string();
    }

    let mut table = Table::new(vec![
        Column::new("NAME", 40),
        Column::new("BRANCH", 20),
        Column::new("DESCRIPTION", 60),
    ]);
    for repo in repositories {
        table.push(vec![
            repo.name.clone(),
            repo.default_branch.clone().unwrap_or_default(),
            repo.description.clone().unwrap_or_default(),
        ]);
    }
    table.render()
}

fn format_contents(entries: &[ContentEntry]) -> String {
    let mut table = Table::new(vec![Column::new("TYPE", 9), Column::new("PATH", 200)]);
    for entry in entries {
        table.push(vec![entry.entry_type.to_string(), entry.path.clone()]);
    }
    table.render()
}
