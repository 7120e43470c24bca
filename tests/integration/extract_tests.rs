//! Strategy-switching behaviour: the heavy strategy's hard failure mode
//! against the light strategy's best-effort scan of the same tree.
//!
//! The heavy strategy talks to an interpreter backend through a subprocess;
//! these tests substitute a small shell stub for it via `--perl`, the same
//! seam the real interpreter plugs into.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn depaudit() -> Command {
    Command::cargo_bin("depaudit").expect("binary builds")
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A stand-in compile-and-report backend: it emits the `perl(...)` lines
/// the audited file asks for in `#OUT` comments, and fails on `#FAIL`.
fn write_stub(dir: &Path) -> PathBuf {
    let stub = dir.join("fake-perl.sh");
    fs::write(
        &stub,
        "#!/bin/sh\nfor last; do :; done\ngrep '^#OUT ' \"$last\" | sed 's/^#OUT //'\ngrep -q '^#FAIL' \"$last\" && exit 2\nexit 0\n",
    )
    .unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();
    stub
}

#[test]
fn test_heavy_strategy_reconciles_backend_output() {
    let tmp = TempDir::new().unwrap();
    let stub = write_stub(tmp.path());
    write(
        tmp.path(),
        "lib/My/App.pm",
        "#OUT perl(Foo/Bar.pm)\n#OUT perl(strict.pm)\n",
    );
    write(tmp.path(), "META.yml", "requires:\n  Foo::Bar: 0\n");

    depaudit()
        .arg(tmp.path())
        .args(["--style", "heavy", "-q", "--perl"])
        .arg(&stub)
        .assert()
        .success();
}

#[test]
fn test_unanalyzable_file_aborts_the_run() {
    let tmp = TempDir::new().unwrap();
    let stub = write_stub(tmp.path());
    write(tmp.path(), "lib/My/Good.pm", "#OUT perl(Foo/Bar.pm)\n");
    write(tmp.path(), "lib/My/Broken.pm", "#FAIL syntax error\n");
    write(tmp.path(), "META.yml", "requires:\n  Foo::Bar: 0\n");

    depaudit()
        .arg(tmp.path())
        .args(["--style", "heavy", "-q", "--perl"])
        .arg(&stub)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Broken.pm"));
}

#[test]
fn test_light_strategy_tolerates_the_same_tree() {
    let tmp = TempDir::new().unwrap();
    // Same tree as above, but the light scan never hard-fails; the stub
    // comment lines are invisible to it, so only real `use` lines count.
    write(tmp.path(), "lib/My/Good.pm", "use Foo::Bar;\n");
    write(tmp.path(), "lib/My/Broken.pm", "#FAIL this is not perl {{{\n");
    write(tmp.path(), "META.yml", "requires:\n  Foo::Bar: 0\n");

    depaudit()
        .arg(tmp.path())
        .args(["--style", "light", "-q"])
        .assert()
        .success();
}

#[test]
fn test_parallel_extraction_keeps_verdict_order() {
    let tmp = TempDir::new().unwrap();
    for i in 0..20 {
        write(
            tmp.path(),
            &format!("lib/Mod{i:02}.pm"),
            &format!("use Dep::Number{i:02};\n"),
        );
    }
    write(tmp.path(), "META.yml", "requires: {}\n");

    let run = |parallel: bool| {
        let mut cmd = depaudit();
        cmd.arg(tmp.path()).args(["--style", "light", "-q", "--format", "json"]);
        if parallel {
            cmd.arg("--parallel");
        }
        String::from_utf8(cmd.assert().failure().get_output().stdout.clone()).unwrap()
    };

    assert_eq!(run(false), run(true));
}

#[test]
fn test_taint_shebang_is_forwarded() {
    let tmp = TempDir::new().unwrap();
    // A stub that refuses to answer unless -T came through.
    let stub = tmp.path().join("taint-checking-perl.sh");
    fs::write(
        &stub,
        "#!/bin/sh\ncase \"$1\" in -T) echo 'perl(Foo/Bar.pm)'; exit 0;; esac\nexit 2\n",
    )
    .unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    write(tmp.path(), "bin/tool", "#!/usr/bin/perl -wT\nuse Foo::Bar;\n");
    write(tmp.path(), "META.yml", "requires:\n  Foo::Bar: 0\n");

    depaudit()
        .arg(tmp.path())
        .args(["--style", "heavy", "-q", "--perl"])
        .arg(&stub)
        .assert()
        .success();
}
