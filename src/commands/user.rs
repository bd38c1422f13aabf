use clap::Args;

use super::common::{GlobalArgs, OutputFormat, connect, to_json};
use crate::infra::github::{RepositoryClient, UserInfo};

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct UserArgs {}

#[tokio::main]
pub async fn run(args: &UserArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let client = connect().await?;
    print!("{}", execute(&client, args, global)?);
    Ok(())
}

pub fn execute(
    client: &RepositoryClient,
    _args: &UserArgs,
    global: &GlobalArgs,
) -> anyhow::Result<String> {
    let info = client.get_user_info();
    match global.format {
        OutputFormat::Json => to_json(&info),
        OutputFormat::Table => Ok(format_user_info(client.username(), &info)),
    }
}

/// `key: value` lines; absent fields print as `-`.
fn format_user_info(login: Option<&str>, info: &UserInfo) -> String {
    let or_dash = |v: Option<&str>| v.unwrap_or("-").to_string();
    let rows = [
        ("login", or_dash(login)),
        ("name", or_dash(info.name.as_deref())),
        ("location", or_dash(info.location.as_deref())),
        ("company", or_dash(info.company.as_deref())),
        ("email", or_dash(info.email.as_deref())),
        ("bio", or_dash(info.bio.as_deref())),
        ("followers", info.followers.to_string()),
        ("following", info.following.to_string()),
    ];

    rows.iter()
        .map(|(key, value)| format!("{:<11}{value}\n", format!("{key}:")))
        .collect()
}
