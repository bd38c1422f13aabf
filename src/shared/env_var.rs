//! Centralized reader for the environment variables repolens honours.
//!
//! Variable names are private constants here; everything else reads values
//! through the `EnvVars` snapshot.

const API_URL: &str = "REPOLENS_API_URL";
const USERNAME: &str = "REPOLENS_USERNAME";
const PASSWORD: &str = "REPOLENS_PASSWORD";
const TOKEN: &str = "REPOLENS_TOKEN";
const LOG: &str = "REPOLENS_LOG";

/// Token variables checked after `REPOLENS_TOKEN`, in order.
const FALLBACK_TOKENS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Snapshot of the relevant environment at load time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvVars {
    /// Overrides `github.api_url` from the config file.
    pub api_url: Option<String>,

    /// Acting username; also the Basic auth user when a password is set.
    pub username: Option<String>,

    pub password: Option<String>,

    /// First non-empty of REPOLENS_TOKEN, GITHUB_TOKEN, GH_TOKEN.
    pub token: Option<String>,

    /// `tracing_subscriber::EnvFilter` directive.
    pub log: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read all variables from the current process.
    pub fn load() -> Self {
        let token = std::iter::once(TOKEN)
            .chain(FALLBACK_TOKENS)
            .find_map(non_empty_var);

        Self {
            api_url: non_empty_var(API_URL),
            username: non_empty_var(USERNAME),
            password: non_empty_var(PASSWORD),
            token,
            log: non_empty_var(LOG),
        }
    }
}
