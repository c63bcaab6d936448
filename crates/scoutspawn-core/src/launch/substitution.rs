//! Deferred string values, resolved against a [`LaunchContext`](super::LaunchContext).

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One fragment of a launch value. A composite value is a `Vec<Substitution>`
/// whose resolved fragments are concatenated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Substitution {
    /// Literal text.
    Text(String),
    /// Value of a declared launch argument.
    LaunchConfiguration(String),
    /// Path of a temporary copy of a file with textual replacements applied.
    ReplaceString(ReplaceString),
}

impl Substitution {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn config(name: impl Into<String>) -> Self {
        Self::LaunchConfiguration(name.into())
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::LaunchConfiguration(name) => write!(f, "$(var {})", name),
            Self::ReplaceString(r) => write!(f, "$(replace-string {})", r.source_file.display()),
        }
    }
}

/// Render a composite value without resolving it.
pub fn display_composite(value: &[Substitution]) -> String {
    value.iter().map(|s| s.to_string()).collect()
}

/// Replace `pattern` with the resolved `value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Replacement {
    pub pattern: String,
    pub value: Vec<Substitution>,
}

/// Copy `source_file` with every replacement applied in order. The source is
/// never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaceString {
    pub source_file: PathBuf,
    pub replacements: Vec<Replacement>,
}

impl ReplaceString {
    pub fn new(source_file: impl Into<PathBuf>) -> Self {
        Self {
            source_file: source_file.into(),
            replacements: Vec::new(),
        }
    }

    pub fn replace(mut self, pattern: impl Into<String>, value: Vec<Substitution>) -> Self {
        self.replacements.push(Replacement {
            pattern: pattern.into(),
            value,
        });
        self
    }

    /// Apply already-resolved replacements to `content`.
    pub fn apply(content: &str, resolved: &[(String, String)]) -> String {
        resolved
            .iter()
            .fold(content.to_string(), |acc, (pattern, value)| {
                if pattern.is_empty() {
                    acc
                } else {
                    acc.replace(pattern.as_str(), value)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_every_occurrence() {
        let content = "<plugin><ros><namespace>/robot_namespace</namespace></ros>\n\
                       <frame>/robot_namespace/odom</frame></plugin>";
        let out = ReplaceString::apply(
            content,
            &[("/robot_namespace".to_string(), "/robot42".to_string())],
        );
        assert!(!out.contains("/robot_namespace"));
        assert_eq!(out.matches("/robot42").count(), 2);
    }

    #[test]
    fn test_apply_empty_pattern_is_noop() {
        let out = ReplaceString::apply("abc", &[(String::new(), "x".to_string())]);
        assert_eq!(out, "abc");
    }

    #[test]
    fn test_display_composite() {
        let value = vec![Substitution::config("namespace"), Substitution::text("_robot")];
        assert_eq!(display_composite(&value), "$(var namespace)_robot");
    }
}
