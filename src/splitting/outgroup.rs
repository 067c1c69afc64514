use std::str::FromStr;

use regex::Regex;

use crate::splitting::ConfigError;

/// Ordered outgroup preference list with whole-word matchers.
#[derive(Debug, Clone)]
pub struct OutgroupSet {
    names: Vec<String>,
    matchers: Vec<Regex>,
}

impl OutgroupSet {
    /// Build from already-split names. Names are trimmed and empty ones dropped.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyOutgroups` if no name survives trimming.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        if names.is_empty() {
            return Err(ConfigError::EmptyOutgroups);
        }

        let matchers = names
            .iter()
            .map(|name| {
                let pattern = format!(r"\b{}\b", regex::escape(name));
                Regex::new(&pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { names, matchers })
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The list in preference order, comma-joined for the rerooting tool
    #[must_use]
    pub fn joined(&self) -> String {
        self.names.join(",")
    }

    /// First configured outgroup occurring in `tree` as a whole word.
    ///
    /// The tree text is searched as-is, branch lengths and support values included.
    #[must_use]
    pub fn first_present(&self, tree: &str) -> Option<&str> {
        self.names
            .iter()
            .zip(&self.matchers)
            .find(|(_, matcher)| matcher.is_match(tree))
            .map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn any_present(&self, tree: &str) -> bool {
        self.first_present(tree).is_some()
    }
}

impl FromStr for OutgroupSet {
    type Err = ConfigError;

    /// Parse a comma-separated list such as `"sp1, sp2,,sp3"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split(','))
    }
}
