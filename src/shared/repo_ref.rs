//! Parsing of repository arguments given on the command line.

use std::sync::LazyLock;

use regex::Regex;

#[expect(clippy::unwrap_used, reason = "pattern is a valid literal")]
static GITHUB_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://[^/]+/|git@[^:]+:|ssh://git@[^/]+/)([^/]+)/([^/]+?)(?:\.git)?/?$")
        .unwrap()
});

/// Repository named on the command line; the owner is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: Option<String>,
    pub name: String,
}

impl RepoRef {
    /// Parse `name`, `owner/name`, or a clone/browse URL
    /// (`https://github.com/owner/name`, `git@github.com:owner/name.git`).
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();

        if let Some(captures) = GITHUB_URL_RE.captures(input) {
            return Ok(Self {
                owner: Some(captures[1].to_string()),
                name: captures[2].to_string(),
            });
        }

        match input.split('/').collect::<Vec<_>>().as_slice() {
            [name] if !name.is_empty() => Ok(Self {
                owner: None,
                name: name.to_string(),
            }),
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: Some(owner.to_string()),
                name: name.to_string(),
            }),
            _ => Err(format!(
                "invalid repository '{input}' (expected NAME, OWNER/NAME or a GitHub URL)"
            )),
        }
    }

    /// Owner embedded in the argument, else `fallback`.
    pub fn owner_or<'a>(&'a self, fallback: Option<&'a str>) -> Option<&'a str> {
        self.owner.as_deref().or(fallback)
    }
}

impl std::str::FromStr for RepoRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
