//! Target specifications: which method identifiers a hook applies to.

use crate::method::MethodId;
use regex::Regex;

/// A rule selecting method identifiers.
///
/// Matching is pure and total: every identifier yields a definite yes or
/// no for any target, with no side effects and no panics. `Any` matches
/// every identifier, including methods defined after the hook was
/// registered - matching is re-evaluated at attach time, not at
/// registration time.
#[derive(Clone, Debug, Default)]
pub enum Target {
    /// Matches every method identifier.
    #[default]
    Any,
    /// Matches one exact identifier.
    Name(String),
    /// Matches identifiers accepted by a regular expression.
    Pattern(Regex),
    /// Matches if any nested target matches. Empty matches nothing.
    AnyOf(Vec<Target>),
}

impl Target {
    /// Whether this target selects the given identifier.
    pub fn matches(&self, id: &MethodId) -> bool {
        match self {
            Target::Any => true,
            Target::Name(name) => id.as_str() == name,
            Target::Pattern(pattern) => pattern.is_match(id.as_str()),
            Target::AnyOf(targets) => targets.iter().any(|t| t.matches(id)),
        }
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Name(name.to_owned())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Name(name)
    }
}

impl From<Regex> for Target {
    fn from(pattern: Regex) -> Self {
        Target::Pattern(pattern)
    }
}

impl From<Vec<Target>> for Target {
    fn from(targets: Vec<Target>) -> Self {
        Target::AnyOf(targets)
    }
}

impl<const N: usize> From<[Target; N]> for Target {
    fn from(targets: [Target; N]) -> Self {
        Target::AnyOf(targets.into())
    }
}
