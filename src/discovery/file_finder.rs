use crate::config::Config;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Version-control metadata directories, pruned during traversal so they are
/// never descended into.
const VCS_DIRS: &[&str] = &[".git", ".svn", ".hg", ".bzr", "CVS", "_darcs"];

/// Whether a file was found under a runtime root or a build/test root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Runtime,
    BuildOnly,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Runtime => "runtime",
            Role::BuildOnly => "build",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered source file, tagged by the root set it came from
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub role: Role,
}

impl SourceFile {
    pub fn new(path: PathBuf, role: Role) -> Self {
        Self { path, role }
    }
}

/// Walks the project's conventional root directories for auditable files.
///
/// Backup files (`name~`) and standalone documentation (`*.pod`) are
/// discarded; symlinks are not followed; roots that do not exist are
/// silently skipped. Output is sorted lexicographic by path within each
/// role so repeated runs produce identical sequences.
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Find every auditable file under the runtime roots, then the build
    /// roots.
    pub fn discover(&self, project_root: &Path) -> Vec<SourceFile> {
        let mut files = self.scan_roots(project_root, &self.config.runtime_roots, Role::Runtime);
        files.extend(self.scan_roots(project_root, &self.config.build_roots, Role::BuildOnly));
        debug!("Discovered {} files", files.len());
        files
    }

    fn scan_roots(&self, project_root: &Path, roots: &[String], role: Role) -> Vec<SourceFile> {
        let mut files: Vec<SourceFile> = roots
            .iter()
            .flat_map(|root| self.scan_directory(&project_root.join(root), role))
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }

    fn scan_directory(&self, dir: &Path, role: Role) -> Vec<SourceFile> {
        if !dir.is_dir() {
            trace!("Root does not exist, skipping: {}", dir.display());
            return Vec::new();
        }

        let walker = WalkBuilder::new(dir)
            .standard_filters(false) // keep dotfiles; we do our own pruning
            .follow_links(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| VCS_DIRS.contains(&name)))
            })
            .build();

        walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .filter_map(|entry| {
                let path = entry.path();
                if !is_auditable(path) {
                    trace!("Skipping: {}", path.display());
                    return None;
                }
                trace!("Found {} file: {}", role, path.display());
                Some(SourceFile::new(path.to_path_buf(), role))
            })
            .collect()
    }
}

/// Regular files minus backup copies and standalone documentation.
fn is_auditable(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    !name.ends_with('~') && path.extension().map_or(true, |ext| ext != "pod")
}
