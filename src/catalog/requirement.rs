//! Requirement specification strings and package-name extraction.
//!
//! A requirement is an opaque pip-style specifier such as
//! `apache-beam[gcp]==2.28.0`. The only part the rest of the system ever
//! interprets is the bare package name; the version constraint is carried
//! for display but never validated against what is installed.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Grammar for a requirement specifier: a package name, optional bracketed
/// extras, and an optional version constraint introduced by a comparison
/// operator. Anything that does not match this shape is malformed.
const SPEC_PATTERN: &str = r"^([A-Za-z0-9][A-Za-z0-9-]*)(\[[A-Za-z0-9_,-]+\])?((==|!=|~=|>=|<=|>|<).*)?$";

fn spec_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SPEC_PATTERN).expect("spec pattern is valid"))
}

/// Extract the bare package name from a requirement specifier.
///
/// Returns `None` when the input does not match the requirement grammar.
///
/// # Example
///
/// ```
/// use packtrain::catalog::package_name;
///
/// assert_eq!(package_name("boto3==1.16.62"), Some("boto3"));
/// assert_eq!(package_name("apache-beam[gcp]==2.28.0"), Some("apache-beam"));
/// assert_eq!(package_name("torch>=1.7.0"), Some("torch"));
/// assert_eq!(package_name("==1.0"), None);
/// ```
pub fn package_name(spec: &str) -> Option<&str> {
    spec_regex()
        .captures(spec.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// A single package requirement as declared in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    spec: String,
}

impl Requirement {
    /// Create a requirement from a specifier string.
    pub fn new(spec: impl Into<String>) -> Self {
        Self { spec: spec.into() }
    }

    /// The full specifier string, including extras and version constraint.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// The bare package name, or `None` if the specifier is malformed.
    pub fn package_name(&self) -> Option<&str> {
        package_name(&self.spec)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

impl From<&str> for Requirement {
    fn from(spec: &str) -> Self {
        Self::new(spec)
    }
}
