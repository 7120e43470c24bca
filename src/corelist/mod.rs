//! Which modules ship with perl itself, and since when.
//!
//! A module whose first bundled release is at or before the configured
//! baseline needs no entry in the manifest; declaring one anyway is itself
//! reportable.

use crate::module_name::ModuleName;
use std::cmp::Ordering;

mod table;

use table::CORE_MODULES;

/// A perl interpreter release, comparable across the historical spellings.
///
/// Accepts both the decimal form (`5.008001`, `5.00503`) and the dotted form
/// (`5.8.1`), normalizing to (revision, version, subversion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PerlRelease {
    pub revision: u32,
    pub version: u32,
    pub subversion: u32,
}

impl PerlRelease {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().trim_start_matches('v').replace('_', "");
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return None;
        }

        let parts: Vec<&str> = raw.split('.').collect();
        match parts.len() {
            1 => Some(Self {
                revision: parts[0].parse().ok()?,
                version: 0,
                subversion: 0,
            }),
            2 => {
                // Decimal form: the fraction packs version and subversion
                // into three digits each (5.008001 -> 5.8.1).
                let revision = parts[0].parse().ok()?;
                let mut frac = parts[1].to_string();
                while frac.len() < 6 {
                    frac.push('0');
                }
                let version = frac[..3].parse().ok()?;
                let subversion = frac[3..6].parse().ok()?;
                Some(Self {
                    revision,
                    version,
                    subversion,
                })
            }
            3 => Some(Self {
                revision: parts[0].parse().ok()?,
                version: parts[1].parse().ok()?,
                subversion: parts[2].parse().ok()?,
            }),
            _ => None,
        }
    }
}

impl std::fmt::Display for PerlRelease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.revision, self.version, self.subversion)
    }
}

/// Lenient comparison of module version strings ("1.23" vs "0.9901").
///
/// The integer part compares numerically; the fractional part compares as a
/// decimal, so `2.36` outranks `2.121` and `1.1` equals `1.10`. Unparseable
/// input compares as zero rather than failing, since manifest version
/// strings are free-form.
fn compare_module_versions(a: &str, b: &str) -> Ordering {
    fn split(s: &str) -> (u64, String) {
        let s = s.trim().trim_start_matches('v').replace('_', "");
        let (int, frac) = match s.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (s.as_str(), ""),
        };
        let digits = |part: &str| -> String {
            part.chars().filter(|c| c.is_ascii_digit()).collect()
        };
        (digits(int).parse().unwrap_or(0), digits(frac))
    }

    let (a_int, a_frac) = split(a);
    let (b_int, b_frac) = split(b);
    a_int.cmp(&b_int).then_with(|| {
        let width = a_frac.len().max(b_frac.len());
        // Right-padded equal-width digit strings order lexicographically.
        let pad = |frac: &str| format!("{frac:0<width$}");
        pad(&a_frac).cmp(&pad(&b_frac))
    })
}

/// Classifier answering "was this module already bundled at the baseline?"
#[derive(Debug, Clone, Copy)]
pub struct CoreBaseline {
    threshold: PerlRelease,
}

impl CoreBaseline {
    pub fn new(threshold: PerlRelease) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> PerlRelease {
        self.threshold
    }

    /// First perl release bundling `name`, at `min_version` or later when a
    /// minimum is given. `None` means never bundled (or never at that
    /// version).
    pub fn first_release(&self, name: &ModuleName, min_version: Option<&str>) -> Option<PerlRelease> {
        let entries = CORE_MODULES
            .iter()
            .find(|(module, _)| *module == name.as_str())
            .map(|(_, entries)| *entries)?;

        let entry = match min_version {
            None => entries.first()?,
            Some(min) => entries.iter().find(|(module_version, _)| {
                compare_module_versions(module_version, min) != Ordering::Less
            })?,
        };

        PerlRelease::parse(entry.1)
    }

    /// True iff the module has been part of the base runtime since before
    /// (or at) the baseline threshold.
    pub fn is_bundled(&self, name: &ModuleName, min_version: Option<&str>) -> bool {
        self.first_release(name, min_version)
            .is_some_and(|release| release <= self.threshold)
    }
}
