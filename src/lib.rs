//! depaudit - dependency manifest auditing for Perl projects
//!
//! This library checks that a project's declared dependency manifest
//! (`META.yml`) matches what its source code actually imports.
//!
//! # Architecture
//!
//! The audit pipeline consists of:
//! 1. **File Discovery** - Walk the runtime roots (`lib/`, `bin/`) and
//!    build roots (`t/`)
//! 2. **Usage Extraction** - Collect referenced module names per file,
//!    via a light regex scan or the interpreter's own compile-and-report
//!    backend
//! 3. **Baseline Classification** - Drop modules bundled with perl since
//!    before the configured baseline release
//! 4. **Reconciliation** - Match used modules against declared ones and
//!    emit one verdict per module
//! 5. **Reporting** - Output the verdict stream (terminal or JSON)

pub mod config;
pub mod corelist;
pub mod discovery;
pub mod extract;
pub mod manifest;
pub mod module_name;
pub mod reconcile;
pub mod report;

pub use config::{Config, ExclusionSpec, Style};
pub use corelist::{CoreBaseline, PerlRelease};
pub use discovery::{FileFinder, Role, SourceFile};
pub use extract::{
    collect_usage, extractor_for, ExtractError, Extractor, HeavyExtractor, LightExtractor,
    UsedModules,
};
pub use manifest::{Manifest, ManifestError};
pub use module_name::ModuleName;
pub use reconcile::{reconcile, Outcome, Reason, Verdict};
pub use report::{Reporter, ReportFormat};
