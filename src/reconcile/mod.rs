//! Set reconciliation between used, declared, bundled, and excluded modules.
//!
//! The engine is a pure function of its inputs: it consumes nothing and
//! mutates nothing outside the verdict list it returns. Verdict order is
//! fixed (runtime pass, build pass, required residual, build-required
//! residual, already-bundled), each block sorted by module name, so two runs
//! over the same tree diff cleanly.

use crate::config::ExclusionSpec;
use crate::corelist::CoreBaseline;
use crate::discovery::Role;
use crate::extract::UsedModules;
use crate::manifest::Manifest;
use crate::module_name::ModuleName;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

/// Why a verdict was emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Used and declared under the right key
    Declared,
    /// Used but absent from the manifest
    Undeclared,
    /// Declared under `requires` but never used anywhere
    UnusedRequirement,
    /// Declared under `build_requires` but never used
    UnusedBuildRequirement,
    /// Declared although the baseline runtime already bundles it
    AlreadyBundled,
    /// No manifest could be read at all
    ManifestMissing,
}

impl Reason {
    pub fn code(&self) -> &'static str {
        match self {
            Reason::Declared => "declared",
            Reason::Undeclared => "undeclared",
            Reason::UnusedRequirement => "unused-requirement",
            Reason::UnusedBuildRequirement => "unused-build-requirement",
            Reason::AlreadyBundled => "already-bundled",
            Reason::ManifestMissing => "manifest-missing",
        }
    }
}

/// One reconciliation outcome for one module/role pair
#[derive(Debug, Clone)]
pub struct Verdict {
    pub outcome: Outcome,
    pub reason: Reason,
    pub module: Option<ModuleName>,
    pub role: Option<Role>,
    pub message: String,
}

impl Verdict {
    fn manifest_missing() -> Self {
        Self {
            outcome: Outcome::Fail,
            reason: Reason::ManifestMissing,
            module: None,
            role: None,
            message: "no manifest (META.yml or META.json) could be read; nothing to reconcile"
                .to_string(),
        }
    }

    fn pass(module: ModuleName, role: Role) -> Self {
        let message = format!("{module} is declared in the manifest");
        Self {
            outcome: Outcome::Pass,
            reason: Reason::Declared,
            module: Some(module),
            role: Some(role),
            message,
        }
    }

    fn undeclared(module: ModuleName, role: Role) -> Self {
        let message = match role {
            Role::Runtime => format!("requires module {module} in manifest"),
            Role::BuildOnly => format!("requires build module {module} in manifest"),
        };
        Self {
            outcome: Outcome::Fail,
            reason: Reason::Undeclared,
            module: Some(module),
            role: Some(role),
            message,
        }
    }

    fn unused(module: ModuleName, role: Role) -> Self {
        let (reason, message) = match role {
            Role::Runtime => (
                Reason::UnusedRequirement,
                format!("{module} is not a runtime dependency"),
            ),
            Role::BuildOnly => (
                Reason::UnusedBuildRequirement,
                format!("{module} is declared as a build dependency but never used"),
            ),
        };
        Self {
            outcome: Outcome::Fail,
            reason,
            module: Some(module),
            role: Some(role),
            message,
        }
    }

    fn already_bundled(module: ModuleName, role: Role, baseline: &CoreBaseline) -> Self {
        let message = format!(
            "{module} is already bundled with perl since before {}",
            baseline.threshold()
        );
        Self {
            outcome: Outcome::Fail,
            reason: Reason::AlreadyBundled,
            module: Some(module),
            role: Some(role),
            message,
        }
    }

    pub fn is_fail(&self) -> bool {
        self.outcome == Outcome::Fail
    }
}

/// Reconcile the used sets against the declared manifest.
///
/// With no manifest at all there is nothing to reconcile: the single
/// manifest-missing failure is the whole output.
pub fn reconcile(
    used_runtime: &UsedModules,
    used_build: &UsedModules,
    manifest: Option<&Manifest>,
    exclusions: &ExclusionSpec,
    baseline: &CoreBaseline,
) -> Vec<Verdict> {
    let Some(manifest) = manifest else {
        return vec![Verdict::manifest_missing()];
    };

    let mut verdicts = Vec::new();

    let consumed_required = role_pass(
        used_runtime,
        Role::Runtime,
        &manifest.required,
        exclusions,
        baseline,
        &mut verdicts,
    );
    let consumed_build = role_pass(
        used_build,
        Role::BuildOnly,
        &manifest.build_required,
        exclusions,
        baseline,
        &mut verdicts,
    );

    // Residuals: declared entries no used-set pass consumed
    for module in manifest.required.keys() {
        if !consumed_required.contains(module) {
            verdicts.push(Verdict::unused(module.clone(), Role::Runtime));
        }
    }
    for module in manifest.build_required.keys() {
        if !consumed_build.contains(module) {
            verdicts.push(Verdict::unused(module.clone(), Role::BuildOnly));
        }
    }

    // Independent of usage: a declared minimum the baseline runtime already
    // satisfies should not be in the manifest at all. This check covers
    // excluded entries too; exclusion only silences usage verdicts.
    for (declared, role) in [
        (&manifest.required, Role::Runtime),
        (&manifest.build_required, Role::BuildOnly),
    ] {
        for (module, min_version) in declared {
            if baseline.is_bundled(module, min_version.as_deref()) {
                verdicts.push(Verdict::already_bundled(module.clone(), role, baseline));
            }
        }
    }

    verdicts
}

/// One symmetric pass over a role's used set, in module sort order.
///
/// Returns the declared names the pass consumed; the caller computes
/// residuals from that instead of mutating the manifest.
fn role_pass(
    used: &UsedModules,
    role: Role,
    declared: &BTreeMap<ModuleName, Option<String>>,
    exclusions: &ExclusionSpec,
    baseline: &CoreBaseline,
    verdicts: &mut Vec<Verdict>,
) -> BTreeSet<ModuleName> {
    let mut consumed = BTreeSet::new();
    for module in used.keys() {
        // Bundled since before the baseline: silently satisfied. The
        // declared entry, if any, is deliberately left for the
        // already-bundled check.
        if baseline.is_bundled(module, None) {
            continue;
        }
        if exclusions.matches(module) {
            continue;
        }
        if declared.contains_key(module) {
            verdicts.push(Verdict::pass(module.clone(), role));
        } else {
            verdicts.push(Verdict::undeclared(module.clone(), role));
        }
        consumed.insert(module.clone());
    }
    consumed
}
