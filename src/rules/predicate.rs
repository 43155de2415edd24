//! Rule predicates - single tests against an asset path

use serde::{Deserialize, Serialize};
use std::fmt;

/// What part of the asset path a predicate looks at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PredicateKind {
    /// File name (extension included) contains the pattern
    NameContains,
    /// Containing directory contains the pattern
    PathContains,
    /// File extension contains the pattern, dots stripped
    ExtensionEquals,
    /// Anything else found in a rule file
    Unknown(String),
}

impl PredicateKind {
    pub fn as_str(&self) -> &str {
        match self {
            PredicateKind::NameContains => "name_contains",
            PredicateKind::PathContains => "path_contains",
            PredicateKind::ExtensionEquals => "extension_equals",
            PredicateKind::Unknown(kind) => kind,
        }
    }
}

impl From<String> for PredicateKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "name_contains" => PredicateKind::NameContains,
            "path_contains" => PredicateKind::PathContains,
            "extension_equals" => PredicateKind::ExtensionEquals,
            _ => PredicateKind::Unknown(kind),
        }
    }
}

impl From<PredicateKind> for String {
    fn from(kind: PredicateKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filter test with an optional negation flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    /// Negation flag (see [`Predicate::contribution`])
    #[serde(default)]
    pub negate: bool,

    pub kind: PredicateKind,

    /// Case-insensitive substring to look for
    #[serde(default)]
    pub pattern: String,
}

impl Predicate {
    pub fn new(kind: PredicateKind, pattern: impl Into<String>) -> Self {
        Self {
            negate: false,
            kind,
            pattern: pattern.into(),
        }
    }

    pub fn name_contains(pattern: impl Into<String>) -> Self {
        Self::new(PredicateKind::NameContains, pattern)
    }

    pub fn path_contains(pattern: impl Into<String>) -> Self {
        Self::new(PredicateKind::PathContains, pattern)
    }

    pub fn extension_equals(pattern: impl Into<String>) -> Self {
        Self::new(PredicateKind::ExtensionEquals, pattern)
    }

    /// Return a negated copy of this predicate
    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Run the test itself, ignoring `negate`.
    ///
    /// Returns `None` when the kind is not recognized.
    pub fn raw_test(&self, path: &str) -> Option<bool> {
        let pattern = self.pattern.to_lowercase();
        let matched = match self.kind {
            PredicateKind::NameContains => file_name(path).to_lowercase().contains(&pattern),
            PredicateKind::PathContains => directory(path).to_lowercase().contains(&pattern),
            PredicateKind::ExtensionEquals => extension(path)
                .to_lowercase()
                .contains(&pattern.replace('.', "")),
            PredicateKind::Unknown(_) => return None,
        };
        Some(matched)
    }

    /// What this predicate contributes to its rule's conjunction.
    ///
    /// A negated predicate contributes `false` whatever the raw test says, so a
    /// rule holding one never matches. Existing rule files depend on this, so it
    /// is kept rather than turned into `!raw`.
    pub fn contribution(&self, path: &str) -> Option<bool> {
        self.raw_test(path).map(|raw| raw && !self.negate)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negate {
            write!(f, "not ")?;
        }
        write!(f, "{} \"{}\"", self.kind, self.pattern)
    }
}

fn split_at_separator(path: &str) -> (&str, &str) {
    match path.rfind(['/', '\\']) {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// Final path segment, extension included
pub fn file_name(path: &str) -> &str {
    split_at_separator(path).1
}

/// Everything before the final path segment, empty for a bare file name
pub fn directory(path: &str) -> &str {
    split_at_separator(path).0
}

/// Extension of the file name without its dot, empty when there is none
pub fn extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => "",
    }
}
