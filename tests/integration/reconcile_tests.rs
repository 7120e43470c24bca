//! End-to-end reconciliation properties, driven through the library API
//! over real throwaway project trees.

use depaudit::{
    collect_usage, reconcile, Config, CoreBaseline, ExclusionSpec, FileFinder, LightExtractor,
    Manifest, PerlRelease, Verdict,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn audit(root: &Path, exclude: &[&str]) -> Vec<Verdict> {
    let config = Config::default();
    let files = FileFinder::new(&config).discover(root);
    let (used_runtime, used_build) =
        collect_usage(&LightExtractor::new(), &files, false, false).unwrap();
    let manifest = Manifest::load(root).ok();
    let exclusions = ExclusionSpec::from_patterns(exclude.iter().copied()).unwrap();
    let baseline = CoreBaseline::new(PerlRelease::parse("5.008").unwrap());
    reconcile(
        &used_runtime,
        &used_build,
        manifest.as_ref(),
        &exclusions,
        &baseline,
    )
}

fn messages(verdicts: &[Verdict]) -> Vec<String> {
    verdicts.iter().map(|v| v.message.clone()).collect()
}

fn fixture_tree(root: &Path) {
    write(
        root,
        "lib/My/App.pm",
        "use strict;\nuse Foo::Bar;\nuse Undeclared::Thing;\nuse Vendor::Gadget;\n",
    );
    write(root, "lib/My/Util.pm", "use Foo::Bar;\nuse Carp;\n");
    write(root, "t/basic.t", "use Test::Deep;\nuse Foo::Bar;\n");
    write(
        root,
        "META.yml",
        concat!(
            "requires:\n",
            "  Foo::Bar: 1.0\n",
            "  Never::Used: 0\n",
            "build_requires:\n",
            "  Test::Deep: 0\n",
        ),
    );
}

#[test]
fn test_two_runs_are_identical() {
    let tmp = TempDir::new().unwrap();
    fixture_tree(tmp.path());

    let first = messages(&audit(tmp.path(), &[]));
    let second = messages(&audit(tmp.path(), &[]));
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_exclusion_removes_exactly_its_verdicts() {
    let tmp = TempDir::new().unwrap();
    fixture_tree(tmp.path());

    let without = messages(&audit(tmp.path(), &[]));
    let with = messages(&audit(tmp.path(), &["Vendor"]));

    let dropped: Vec<&String> = without.iter().filter(|m| !with.contains(m)).collect();
    assert_eq!(dropped.len(), 1);
    assert!(dropped[0].contains("Vendor::Gadget"));
    // Nothing new appears
    assert!(with.iter().all(|m| without.contains(m)));
}

#[test]
fn test_bundled_modules_get_no_usage_verdict() {
    let tmp = TempDir::new().unwrap();
    fixture_tree(tmp.path());

    let verdicts = audit(tmp.path(), &[]);
    // strict and Carp predate the 5.8 baseline
    assert!(verdicts
        .iter()
        .all(|v| v.module.as_ref().map_or(true, |m| {
            m.as_str() != "strict" && m.as_str() != "Carp"
        })));
}

#[test]
fn test_residual_completeness() {
    let tmp = TempDir::new().unwrap();
    fixture_tree(tmp.path());

    let verdicts = audit(tmp.path(), &[]);
    let unused: Vec<&Verdict> = verdicts
        .iter()
        .filter(|v| v.reason == depaudit::Reason::UnusedRequirement)
        .collect();
    assert_eq!(unused.len(), 1);
    assert_eq!(unused[0].module.as_ref().unwrap().as_str(), "Never::Used");
}

#[test]
fn test_runtime_subsumes_build_usage() {
    let tmp = TempDir::new().unwrap();
    fixture_tree(tmp.path());

    let verdicts = audit(tmp.path(), &[]);
    // Foo::Bar is used in both lib/ and t/ but appears once, as runtime
    let foo_verdicts: Vec<&Verdict> = verdicts
        .iter()
        .filter(|v| v.module.as_ref().is_some_and(|m| m.as_str() == "Foo::Bar"))
        .collect();
    assert_eq!(foo_verdicts.len(), 1);
    assert_eq!(foo_verdicts[0].role, Some(depaudit::Role::Runtime));
}

#[test]
fn test_empty_project_reports_manifest_missing() {
    let tmp = TempDir::new().unwrap();
    let verdicts = audit(tmp.path(), &[]);
    assert_eq!(verdicts.len(), 1);
    assert_eq!(verdicts[0].reason, depaudit::Reason::ManifestMissing);
}
