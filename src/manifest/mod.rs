//! Declared-dependency manifest (`META.yml` / `META.json`).

use crate::module_name::ModuleName;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Why no manifest could be produced. Absence is a distinguished state the
/// reconciliation engine reports as its own failure, never an empty
/// manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("no META.yml or META.json found in project root")]
    NotFound,
    #[error("failed to read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// The declared dependency sets: module name to optional minimum version.
///
/// A declared version of `0` means "any version" and carries no minimum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub required: BTreeMap<ModuleName, Option<String>>,
    pub build_required: BTreeMap<ModuleName, Option<String>>,
}

#[derive(serde::Deserialize, Default)]
struct RawManifest {
    #[serde(default)]
    requires: BTreeMap<String, serde_yaml::Value>,
    #[serde(default)]
    build_requires: BTreeMap<String, serde_yaml::Value>,
}

impl Manifest {
    /// Load the manifest from its conventional location under
    /// `project_root`, trying `META.yml` first and `META.json` second.
    pub fn load(project_root: &Path) -> Result<Self, ManifestError> {
        let yml = project_root.join("META.yml");
        if yml.exists() {
            return Self::load_file(&yml);
        }
        let json = project_root.join("META.json");
        if json.exists() {
            return Self::load_file(&json);
        }
        Err(ManifestError::NotFound)
    }

    fn load_file(path: &Path) -> Result<Self, ManifestError> {
        let shown = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| {
            ManifestError::Unreadable {
                path: shown.clone(),
                source,
            }
        })?;

        let raw: RawManifest = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&contents).map_err(|e| ManifestError::Parse {
                path: shown.clone(),
                message: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ManifestError::Parse {
                path: shown.clone(),
                message: e.to_string(),
            })?
        };

        debug!(
            "Loaded manifest {}: {} required, {} build-required",
            shown,
            raw.requires.len(),
            raw.build_requires.len()
        );

        Ok(Self {
            required: convert_section(raw.requires),
            build_required: convert_section(raw.build_requires),
        })
    }
}

fn convert_section(raw: BTreeMap<String, serde_yaml::Value>) -> BTreeMap<ModuleName, Option<String>> {
    let mut section = BTreeMap::new();
    for (key, value) in raw {
        // "perl" declares an interpreter floor, not a module dependency
        if key == "perl" {
            continue;
        }
        match ModuleName::parse(&key) {
            Ok(name) => {
                section.insert(name, version_string(value));
            }
            Err(_) => warn!("Ignoring invalid module name '{key}' in manifest"),
        }
    }
    section
}

fn version_string(value: serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;
    match value {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim().to_string();
            if s.is_empty() || s == "0" {
                None
            } else {
                Some(s)
            }
        }
        Value::Number(n) => {
            let s = n.to_string();
            if s == "0" || s == "0.0" {
                None
            } else {
                Some(s)
            }
        }
        other => {
            warn!("Ignoring unexpected version value {other:?} in manifest");
            None
        }
    }
}
