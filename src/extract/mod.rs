//! Pluggable usage extraction.
//!
//! Both strategies answer the same question for one file: which external
//! modules does it reference, and how many times? The reconciliation engine
//! never knows which strategy produced its input.

mod heavy;
mod light;

pub use heavy::HeavyExtractor;
pub use light::LightExtractor;

use crate::config::{Config, Style};
use crate::discovery::{Role, SourceFile};
use crate::module_name::ModuleName;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Module name to non-zero reference count
pub type UsedModules = BTreeMap<ModuleName, usize>;

/// Hard extraction failures. Any of these abort the whole run: an
/// unanalyzable file makes the dependency set unreliable.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to run '{command}' on {path}: {source}")]
    Spawn {
        command: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{command}' timed out after {seconds}s analyzing {path}")]
    Timeout {
        command: String,
        path: String,
        seconds: u64,
    },
    #[error("could not analyze {path}: compile-and-report produced no module list")]
    NoOutput { path: String },
}

/// One extraction strategy
pub trait Extractor: Sync {
    fn extract(&self, file: &Path) -> Result<UsedModules, ExtractError>;
}

/// Build the selected strategy from configuration.
pub fn extractor_for(style: Style, config: &Config) -> Box<dyn Extractor> {
    match style {
        Style::Light => Box::new(LightExtractor::new()),
        Style::Heavy => Box::new(HeavyExtractor::new(
            config.perl_command.clone(),
            config.heavy_timeout_secs,
        )),
    }
}

/// Run the extractor over every discovered file and merge the results into
/// one used-set per role.
///
/// A module seen under both roles is attributed to `Runtime` only: a hard
/// runtime dependency subsumes a build-only need. That de-duplication
/// happens here, once, before reconciliation.
pub fn collect_usage(
    extractor: &dyn Extractor,
    files: &[SourceFile],
    parallel: bool,
    show_progress: bool,
) -> Result<(UsedModules, UsedModules), ExtractError> {
    let per_file: Vec<(Role, UsedModules)> = if parallel {
        files
            .par_iter()
            .map(|file| Ok((file.role, extractor.extract(&file.path)?)))
            .collect::<Result<_, ExtractError>>()?
    } else {
        let pb = if show_progress && !files.is_empty() {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut results = Vec::with_capacity(files.len());
        for file in files {
            results.push((file.role, extractor.extract(&file.path)?));
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        results
    };

    let mut runtime = UsedModules::new();
    let mut build = UsedModules::new();
    for (role, modules) in per_file {
        let target = match role {
            Role::Runtime => &mut runtime,
            Role::BuildOnly => &mut build,
        };
        for (name, count) in modules {
            *target.entry(name).or_insert(0) += count;
        }
    }

    // Hard-dep precedence
    build.retain(|name, _| !runtime.contains_key(name));

    debug!(
        "Usage: {} runtime modules, {} build-only modules",
        runtime.len(),
        build.len()
    );
    Ok((runtime, build))
}
