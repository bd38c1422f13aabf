use clap::Parser;
use repolens::cli::Cli;
use repolens::shared::env_var::EnvVars;
use repolens::shared::logging;

fn main() -> anyhow::Result<()> {
    let Cli { global, command } = Cli::parse();

    logging::init(global.log_format, EnvVars::load().log.as_deref());

    command.run(&global)?;

    Ok(())
}
