use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::commit::{ChangesArgs, LogArgs, ShowArgs};
use crate::commands::common::GlobalArgs;
use crate::commands::config::ConfigCommands;
use crate::commands::repo::{ContentsArgs, DefaultBranchArgs, ReposArgs};
use crate::commands::user::UserArgs;
use crate::commands::{commit, repo, user};

#[derive(Parser, Debug)]
#[command(
    name = "repolens",
    version,
    about,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the authenticated user's profile
    User(UserArgs),

    /// List public repositories of an account
    Repos(ReposArgs),

    /// List files and directories at a path
    Contents(ContentsArgs),

    /// Print a repository's default branch
    DefaultBranch(DefaultBranchArgs),

    /// List commit messages along first parents from a branch tip
    Log(LogArgs),

    /// Print a raw commit object as JSON
    Show(ShowArgs),

    /// List the files changed by a commit
    Changes(ChangesArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    pub fn run(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match self {
            Self::User(args) => user::run(args, global),
            Self::Repos(args) => repo::run_repos(args, global),
            Self::Contents(args) => repo::run_contents(args, global),
            Self::DefaultBranch(args) => repo::run_default_branch(args, global),
            Self::Log(args) => commit::run_log(args, global),
            Self::Show(args) => commit::run_show(args, global),
            Self::Changes(args) => commit::run_changes(args, global),
            Self::Config(cmd) => cmd.run(),
            Self::Completions { shell } => {
                clap_complete::generate(
                    *shell,
                    &mut Cli::command(),
                    "repolens",
                    &mut std::io::stdout(),
                );
                Ok(())
            }
        }
    }
}
