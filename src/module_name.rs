//! Namespaced module identifiers (`Foo::Bar`).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors produced when validating a module name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModuleNameError {
    #[error("'{0}' is not a valid module namespace")]
    InvalidNamespace(String),
}

fn namespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\w+(::\w+)*$").expect("namespace regex"))
}

/// A validated Perl module name: word-character segments joined by `::`.
///
/// Equality is exact string match; ordering is lexicographic, which drives
/// the deterministic ordering of every verdict block.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleName(String);

impl ModuleName {
    /// Validate a raw string against the namespace grammar.
    pub fn parse(raw: &str) -> Result<Self, ModuleNameError> {
        if namespace_re().is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ModuleNameError::InvalidNamespace(raw.to_string()))
        }
    }

    /// Translate the interpreter's path form (`Foo/Bar.pm`) back into a
    /// namespaced name (`Foo::Bar`).
    pub fn from_path_form(raw: &str) -> Option<Self> {
        let stem = raw.strip_suffix(".pm").unwrap_or(raw);
        Self::parse(&stem.replace('/', "::")).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this name equals `prefix` or lives beneath it
    /// (`prefix::anything`).
    pub fn is_within(&self, prefix: &ModuleName) -> bool {
        self == prefix
            || self
                .0
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with("::"))
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ModuleName {
    type Error = ModuleNameError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<ModuleName> for String {
    fn from(name: ModuleName) -> String {
        name.0
    }
}
