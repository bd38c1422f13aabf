//! Pieces shared by every GitHub-backed subcommand.

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::infra::github::{Credentials, GitHubError, RepositoryClient, get_gh_token};
use crate::shared::config::{Config, load_config};
use crate::shared::env_var::EnvVars;
use crate::shared::logging::LogFormat;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Flags accepted by every subcommand.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Repository owner (defaults to the authenticated user)
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Log format on stderr (level via REPOLENS_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Pick credentials from the environment, falling back to `gh auth token`.
///
/// Username and password select Basic auth. Otherwise a token is taken from
/// the environment, then from `gh_token`. The configured username rides along
/// as the acting user when the environment names none.
pub fn resolve_credentials(
    env: &EnvVars,
    config: &Config,
    gh_token: impl FnOnce() -> Result<String, GitHubError>,
) -> Result<Credentials, GitHubError> {
    let username = env
        .username
        .clone()
        .or_else(|| config.github.username.clone());

    let token = match (&username, &env.password, &env.token) {
        (Some(_), Some(_), _) => None,
        (_, _, Some(token)) => Some(token.clone()),
        _ => Some(gh_token()?),
    };

    Credentials::from_parts(username, env.password.clone(), token)
}

/// Load config and environment, then log in.
pub async fn connect() -> anyhow::Result<RepositoryClient> {
    let env = EnvVars::load();
    let config = load_config()?.with_env(&env);
    let credentials = resolve_credentials(&env, &config, get_gh_token)?;

    RepositoryClient::login(credentials, &config.github.api_url)
        .await
        .with_context(|| format!("Failed to log in to {}", config.github.api_url))
}

/// Pretty-printed JSON with a trailing newline.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// First line of a commit message.
pub fn summary_line(message: &str) -> &str {
    message.lines().next().unwrap_or("")
}
