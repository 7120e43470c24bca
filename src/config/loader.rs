use super::{ConfigError, ExclusionSpec, Style, STYLE_ENV_VAR};
use crate::corelist::PerlRelease;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Configuration for a depaudit run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directories holding runtime code, relative to the project path
    pub runtime_roots: Vec<String>,

    /// Root directories holding build/test-only code
    pub build_roots: Vec<String>,

    /// Namespace prefixes to leave out of reconciliation
    pub exclude: Vec<String>,

    /// Extraction style name: "light" or "heavy"
    pub style: String,

    /// Modules first bundled with perl at or before this release need no
    /// declaration
    pub baseline: String,

    /// Interpreter command used by the heavy strategy
    pub perl_command: String,

    /// Seconds to wait for one heavy-strategy subprocess
    pub heavy_timeout_secs: u64,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json
    pub format: String,

    /// List Pass verdicts individually in terminal output
    pub show_passes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime_roots: vec!["lib".to_string(), "bin".to_string()],
            build_roots: vec!["t".to_string()],
            exclude: vec![],
            style: "heavy".to_string(),
            baseline: "5.008".to_string(),
            perl_command: "perl".to_string(),
            heavy_timeout_secs: 30,
            report: ReportConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
            show_passes: false,
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".depaudit.yml",
            ".depaudit.yaml",
            ".depaudit.toml",
            "depaudit.yml",
            "depaudit.yaml",
            "depaudit.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Resolve the extraction style, letting the environment override the
    /// configured value. An unrecognized name from either source is a
    /// warning, not an error; the previously selected style stays in effect.
    pub fn resolved_style(&self) -> Style {
        let mut style = Style::default();

        match Style::from_name(&self.style) {
            Some(s) => style = s,
            None => warn!(
                "Unknown extraction style '{}', keeping '{}'",
                self.style,
                style.as_str()
            ),
        }

        if let Ok(from_env) = std::env::var(STYLE_ENV_VAR) {
            match Style::from_name(&from_env) {
                Some(s) => style = s,
                None => warn!(
                    "Unknown extraction style '{}' in {}, keeping '{}'",
                    from_env,
                    STYLE_ENV_VAR,
                    style.as_str()
                ),
            }
        }

        style
    }

    /// Validate the exclusion namespaces into a matcher. Invalid entries are
    /// a fatal configuration error.
    pub fn exclusion_spec(&self) -> Result<ExclusionSpec, ConfigError> {
        ExclusionSpec::from_patterns(&self.exclude)
    }

    /// Validate and parse the baseline threshold release.
    pub fn baseline_release(&self) -> Result<PerlRelease, ConfigError> {
        PerlRelease::parse(&self.baseline)
            .ok_or_else(|| ConfigError::InvalidBaseline(self.baseline.clone()))
    }
}
