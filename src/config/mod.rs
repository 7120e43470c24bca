mod loader;

pub use loader::{Config, ReportConfig};

use crate::module_name::ModuleName;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the configured extraction style.
pub const STYLE_ENV_VAR: &str = "DEPAUDIT_STYLE";

/// Configuration errors, all fatal before any scanning begins
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid exclusion namespace '{0}': must match Word::Word::...")]
    InvalidExclusion(String),
    #[error("invalid baseline perl release '{0}'")]
    InvalidBaseline(String),
}

/// Extraction strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Light,
    #[default]
    Heavy,
}

impl Style {
    /// Recognize a style name. Unknown names return `None` so the caller can
    /// warn and keep whatever was previously selected.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "light" => Some(Style::Light),
            "heavy" => Some(Style::Heavy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Light => "light",
            Style::Heavy => "heavy",
        }
    }
}

/// Validated namespace prefixes to leave out of reconciliation.
///
/// A module matches if it equals a prefix exactly or sits anywhere beneath
/// it (`prefix::...`).
#[derive(Debug, Clone, Default)]
pub struct ExclusionSpec {
    prefixes: Vec<ModuleName>,
}

impl ExclusionSpec {
    /// Build a spec from raw namespace strings, rejecting anything that does
    /// not satisfy the namespace grammar.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut prefixes = Vec::new();
        for raw in patterns {
            let raw = raw.as_ref();
            let prefix = ModuleName::parse(raw)
                .map_err(|_| ConfigError::InvalidExclusion(raw.to_string()))?;
            prefixes.push(prefix);
        }
        Ok(Self { prefixes })
    }

    pub fn matches(&self, name: &ModuleName) -> bool {
        self.prefixes.iter().any(|prefix| name.is_within(prefix))
    }
}
