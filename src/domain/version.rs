use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{PypublishError, Result};

/// Characters git accepts in a tag name without quoting or escaping.
fn ref_safe_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9A-Za-z][0-9A-Za-z._+-]*$").expect("version pattern is valid")
    })
}

/// A release version as supplied on the command line.
///
/// Stores the bare version number; the tag name always carries exactly one
/// `v` prefix no matter whether the caller typed `1.2.3` or `v1.2.3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    number: String,
}

impl Version {
    /// Parses a caller-supplied version, accepting an optional leading `v`.
    ///
    /// Only checks that the result is usable as a git tag. Semantic versioning
    /// is not enforced; see [`Version::is_semver`].
    ///
    /// # Example
    /// ```
    /// # use pypublish::domain::Version;
    /// assert_eq!(Version::parse("0.2.0").unwrap().tag_name(), "v0.2.0");
    /// assert_eq!(Version::parse("v0.2.0").unwrap().tag_name(), "v0.2.0");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let number = trimmed.strip_prefix('v').unwrap_or(trimmed);

        if number.is_empty() {
            return Err(PypublishError::usage("version must not be empty"));
        }

        if !ref_safe_pattern().is_match(number)
            || number.contains("..")
            || number.ends_with('.')
            || number.ends_with(".lock")
        {
            return Err(PypublishError::usage(format!(
                "'{}' is not a usable version: use letters, digits, '.', '_', '+' or '-'",
                input
            )));
        }

        Ok(Version {
            number: number.to_string(),
        })
    }

    /// The version without the tag prefix (e.g. "1.2.3")
    pub fn number(&self) -> &str {
        &self.number
    }

    /// The canonical tag name (e.g. "v1.2.3")
    pub fn tag_name(&self) -> String {
        format!("v{}", self.number)
    }

    /// Whether the version number is a valid semantic version.
    pub fn is_semver(&self) -> bool {
        semver::Version::parse(&self.number).is_ok()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number)
    }
}
