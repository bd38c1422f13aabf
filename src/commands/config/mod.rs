use clap::Subcommand;

/// Configuration management commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print JSON Schema for the configuration file
    Schema,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Schema => {
                print!("{}", schema_json()?);
                Ok(())
            }
        }
    }
}

fn schema_json() -> anyhow::Result<String> {
    let schema = crate::shared::config::generate_schema();
    let mut json = serde_json::to_string_pretty(&schema)?;
    json.push('\n');
    Ok(json)
}
