//! End-to-end tests for the flatten-imports binary

use assert_cmd::Command;
use pretty_assertions::assert_eq;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (relative, content) in files {
        let path = dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn read(dir: &TempDir, relative: &str) -> String {
    fs::read_to_string(dir.path().join(relative)).unwrap()
}

fn flatten(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("flatten-imports").unwrap();
    cmd.arg("--root").arg(root).env_remove("RUST_LOG");
    cmd
}

#[test]
fn rewrites_barrel_imports_in_place() {
    let dir = project(&[
        ("src/App.tsx", "import { Button, Card } from \"@/components\";\n"),
        ("src/Other.tsx", "import Components from \"@/components\";\n"),
    ]);

    flatten(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✔ Updated:"))
        .stdout(predicate::str::contains("App.tsx"))
        .stdout(predicate::str::contains("Other.tsx").not())
        .stdout(predicate::str::contains("Done. 1 file(s) updated."));

    assert_eq!(
        read(&dir, "src/App.tsx"),
        "import Button from \"@/components/Button\";\nimport Card from \"@/components/Card\";\n"
    );
    assert_eq!(read(&dir, "src/Other.tsx"), "import Components from \"@/components\";\n");
}

#[test]
fn dry_run_leaves_files_untouched() {
    let original = "import { useAuth } from \"../hooks\";\n";
    let dir = project(&[("src/pages/Login.tsx", original)]);

    flatten(dir.path())
        .args(["--paths", "src/hooks", "--dry"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Dry Run] ✔ Updated:"))
        .stdout(predicate::str::contains("[Dry Run] Done. 1 file(s) updated."));

    assert_eq!(read(&dir, "src/pages/Login.tsx"), original);
}

#[test]
fn second_run_changes_nothing() {
    let dir = project(&[("src/App.tsx", "import { useAuth } from \"../hooks\";\n")]);

    flatten(dir.path()).args(["-p", "src/hooks"]).assert().success();
    let after_first = read(&dir, "src/App.tsx");
    assert_eq!(after_first, "import useAuth from \"../hooks/useAuth\";\n");

    flatten(dir.path())
        .args(["-p", "src/hooks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done. 0 file(s) updated."));
    assert_eq!(read(&dir, "src/App.tsx"), after_first);
}

#[test]
fn empty_paths_fail_before_touching_files() {
    let original = "import { Button } from \"@/components\";\n";
    let dir = project(&[("src/App.tsx", original)]);

    flatten(dir.path())
        .args(["--paths", " , "])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("At least one barrel directory"));

    assert_eq!(read(&dir, "src/App.tsx"), original);
}

#[test]
fn parse_failures_are_reported_and_others_processed() {
    let dir = project(&[
        ("src/a.ts", "const = ;\n"),
        ("src/b.ts", "import { Card } from '@/components';\n"),
    ]);

    flatten(dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Done. 1 file(s) updated."))
        .stderr(predicate::str::contains("✖ Failed:"));

    assert_eq!(read(&dir, "src/b.ts"), "import Card from '@/components/Card';\n");
}

#[test]
fn config_file_supplies_directories_and_alias() {
    let dir = project(&[
        ("flatten.toml", "barrelDirectories = [\"src/ui\"]\naliasPrefix = \"~/\"\n"),
        ("src/App.tsx", "import { Stack } from '~/ui';\n"),
    ]);

    flatten(dir.path()).assert().success();
    assert_eq!(read(&dir, "src/App.tsx"), "import Stack from '~/ui/Stack';\n");
}

#[test]
fn json_format_reports_touched_files() {
    let dir = project(&[("src/App.tsx", "import { Button } from '@/components';\n")]);

    let output = flatten(dir.path())
        .args(["--format", "json", "--dry"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["touchedFiles"], 1);
    assert_eq!(report["dryRun"], true);
}
