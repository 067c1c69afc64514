use std::str::FromStr;

use regex::Regex;

use crate::splitting::ConfigError;

/// Separator between the pattern and the replacement in a rename spec
pub const RENAME_SEPARATOR: char = '/';

/// Regex search/replace applied to every locus name before the suffix is added.
#[derive(Debug, Clone)]
pub struct NameTransform {
    pattern: Regex,
    replacement: String,
}

impl NameTransform {
    /// Compile a transform from its two halves.
    ///
    /// The replacement may use `$1`/`${name}` capture references.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if `pattern` does not compile.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, ConfigError> {
        let pattern = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }

    /// Replace every match of the pattern in `name`
    #[must_use]
    pub fn apply(&self, name: &str) -> String {
        self.pattern
            .replace_all(name, self.replacement.as_str())
            .into_owned()
    }
}

impl FromStr for NameTransform {
    type Err = ConfigError;

    /// Parse `PATTERN/REPLACEMENT`, splitting at the first `/`.
    ///
    /// The replacement may be empty (`_trimmed$/` deletes the match).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pattern, replacement) = s
            .split_once(RENAME_SEPARATOR)
            .ok_or_else(|| ConfigError::MalformedRename(s.to_string()))?;
        Self::new(pattern, replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply() {
        let transform: NameTransform = "^uce-/UCE_".parse().unwrap();
        assert_eq!(transform.apply("uce-100"), "UCE_100");
        assert_eq!(transform.apply("core-uce-100"), "core-uce-100");
    }

    #[test]
    fn test_empty_replacement_deletes() {
        let transform: NameTransform = r"\.nexus$/".parse().unwrap();
        assert_eq!(transform.apply("locus12.nexus"), "locus12");
    }

    #[test]
    fn test_capture_groups() {
        let transform: NameTransform = r"^(\w+)-(\d+)$/${2}_$1".parse().unwrap();
        assert_eq!(transform.apply("uce-100"), "100_uce");
    }

    #[test]
    fn test_replaces_all_matches() {
        let transform: NameTransform = "-/_".parse().unwrap();
        assert_eq!(transform.apply("a-b-c"), "a_b_c");
    }

    #[test]
    fn test_missing_separator_is_error() {
        let result = "no-separator-here".parse::<NameTransform>();
        assert!(matches!(result, Err(ConfigError::MalformedRename(_))));
    }

    #[test]
    fn test_invalid_regex_is_error() {
        let result = "(unclosed/x".parse::<NameTransform>();
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }
}
