use super::{ExtractError, Extractor, UsedModules};
use crate::module_name::ModuleName;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `use Foo::Bar;`, `use Foo::Bar qw(baz);` -- one module per statement
    RE.get_or_init(|| Regex::new(r"^\s*use\s+([A-Za-z_]\w*(?:::\w+)*)").expect("import regex"))
}

fn inherit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `use base qw(A B);`, `use parent 'C';` -- several modules per statement
    RE.get_or_init(|| Regex::new(r"^\s*use\s+(?:base|parent)\b(.*)$").expect("inherit regex"))
}

fn qw_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"qw\s*[(\[{<]([^)\]}>]*)[)\]}>]").expect("qw regex"))
}

fn quoted_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"['"]([\w:]+)['"]"#).expect("quoted regex"))
}

/// The fast, approximate strategy: strip documentation markup, then scan
/// line-by-line for leading import and inherit-from statements.
///
/// Imports hidden inside heredocs or string literals are invisible to it,
/// and it never fails on file content -- it just returns what it saw.
#[derive(Debug, Default)]
pub struct LightExtractor;

impl LightExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for LightExtractor {
    fn extract(&self, file: &Path) -> Result<UsedModules, ExtractError> {
        let contents = std::fs::read_to_string(file).map_err(|source| ExtractError::Read {
            path: file.display().to_string(),
            source,
        })?;

        let mut used = UsedModules::new();
        for line in strip_pod(&contents) {
            if let Some(cap) = inherit_re().captures(line) {
                for name in inherit_modules(cap.get(1).map_or("", |m| m.as_str())) {
                    *used.entry(name).or_insert(0) += 1;
                }
            }
            if let Some(cap) = import_re().captures(line) {
                // `use v5.10;` is an interpreter floor, not a module
                if is_version_floor(&cap[1]) {
                    continue;
                }
                if let Ok(name) = ModuleName::parse(&cap[1]) {
                    *used.entry(name).or_insert(0) += 1;
                }
            }
        }
        Ok(used)
    }
}

fn is_version_floor(name: &str) -> bool {
    name.strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Iterate code lines, dropping POD blocks (`=word` .. `=cut`) and
/// everything after `__END__` / `__DATA__`.
fn strip_pod(contents: &str) -> impl Iterator<Item = &str> {
    let mut in_pod = false;
    let mut in_data = false;
    contents.lines().filter(move |line| {
        if in_data {
            return false;
        }
        if *line == "__END__" || *line == "__DATA__" {
            in_data = true;
            return false;
        }
        if in_pod {
            if line.starts_with("=cut") {
                in_pod = false;
            }
            return false;
        }
        if line.starts_with('=') && line[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            in_pod = true;
            return false;
        }
        true
    })
}

/// Pull module names out of the tail of a `use base`/`use parent` statement.
fn inherit_modules(tail: &str) -> Vec<ModuleName> {
    let mut names = Vec::new();
    if let Some(cap) = qw_re().captures(tail) {
        for token in cap[1].split_whitespace() {
            // `-norequire` and friends are options, not parents
            if token.starts_with('-') {
                continue;
            }
            if let Ok(name) = ModuleName::parse(token) {
                names.push(name);
            }
        }
    } else {
        for cap in quoted_re().captures_iter(tail) {
            if let Ok(name) = ModuleName::parse(&cap[1]) {
                names.push(name);
            }
        }
    }
    names
}
