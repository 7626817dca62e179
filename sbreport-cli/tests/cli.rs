//! End-to-end tests for the sbreport binary.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn sbreport() -> Command {
    Command::cargo_bin("sbreport").expect("sbreport binary")
}

/// A config tree:
/// config/A.bset = [B.bset, pkg1.cfg], config/B.bset = [pkg2.cfg]
fn create_config_tree() -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    let config = td.path().join("config");
    fs::create_dir_all(config.join("tools")).unwrap();

    fs::write(
        config.join("A.bset"),
        "# top level\n%define tag 1.0\nB.bset\npkg1.cfg\n",
    )
    .unwrap();
    fs::write(config.join("B.bset"), "pkg2.cfg\n").unwrap();
    fs::write(
        config.join("pkg1.cfg"),
        "Name: pkg1\nSummary: First package\nVersion: %{tag}\nSource0: pkg1-%{version}.tar.gz\n\n%build\nmake\n",
    )
    .unwrap();
    fs::write(
        config.join("pkg2.cfg"),
        "Name: pkg2\nVersion: 2.0\nSource0: pkg2-%{version}.tar.xz\nPatch0: pkg2-fix.diff\n",
    )
    .unwrap();
    fs::write(config.join("tools").join("gdb.cfg"), "Name: gdb\n").unwrap();

    td
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).expect("read report")
}

#[test]
fn test_banner_and_list_bsets() {
    let temp = create_config_tree();

    sbreport()
        .current_dir(temp.path())
        .arg("--list-bsets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Source Builder, Reporter v"))
        .stdout(predicate::str::contains("A.bset"))
        .stdout(predicate::str::contains("B.bset"))
        .stdout(predicate::str::contains("pkg1.cfg").not());
}

#[test]
fn test_list_configs_json() {
    let temp = create_config_tree();

    let output = sbreport()
        .current_dir(temp.path())
        .args(["--list-configs", "--json"])
        .output()
        .expect("run sbreport");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('[').expect("json array");
    let listed: Vec<String> = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(listed, vec!["pkg1.cfg", "pkg2.cfg", "tools/gdb.cfg"]);
}

#[test]
fn test_text_report_written_next_to_invocation() {
    let temp = create_config_tree();

    sbreport()
        .current_dir(temp.path())
        .args(["--repo-root", "config", "A.bset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report: A.txt"));

    let report = read(temp.path().join("A.txt"));
    let a = report.find("Build Set: A.bset").expect("A heading");
    let b = report.find("Build Set: B.bset").expect("B heading");
    let pkg2 = report.find("Package: pkg2").expect("pkg2");
    let pkg1 = report.find("Package: pkg1").expect("pkg1");
    assert!(a < b && b < pkg2 && pkg2 < pkg1);
    assert!(report.contains("    1: pkg1-1.0.tar.gz"));
    assert!(report.contains("    1: pkg2-fix.diff"));
}

#[test]
fn test_name_without_suffix_is_found_on_search_path() {
    let temp = create_config_tree();

    sbreport()
        .current_dir(temp.path())
        .arg("B")
        .assert()
        .success();

    assert!(read(temp.path().join("B.txt")).contains("Package: pkg2"));
}

#[test]
fn test_package_config_reports_as_its_own_build_set() {
    let temp = create_config_tree();

    sbreport()
        .current_dir(temp.path())
        .arg("pkg2.cfg")
        .assert()
        .success()
        .stdout(predicate::str::contains("Report: pkg2.txt"));

    let report = read(temp.path().join("pkg2.txt"));
    let heading = report.find("Build Set: pkg2.cfg").expect("heading");
    let package = report.find("Package: pkg2").expect("package");
    assert!(heading < package);
    assert!(report.contains("    1: pkg2-2.0.tar.xz"));
}

#[test]
fn test_asciidoc_report_with_output_path() {
    let temp = create_config_tree();

    sbreport()
        .current_dir(temp.path())
        .args(["--format", "asciidoc", "--output", "out/report.adoc", "A.bset"])
        .assert()
        .success();

    let report = read(temp.path().join("out").join("report.adoc"));
    assert!(report.starts_with("Source Builder Report\n"));
    assert!(report.contains("\n== A.bset\n"));
    assert!(report.contains("\n=== B.bset\n"));
    assert!(report.contains("*Package*: _pkg1_ +"));
}

#[test]
fn test_config_file_sets_title_and_macros() {
    let temp = create_config_tree();
    fs::write(
        temp.path().join("sbreport.toml"),
        "title = \"Tools Report\"\n\n[macros]\ntag = \"9.9\"\n",
    )
    .unwrap();
    fs::write(temp.path().join("config").join("C.bset"), "pkg1.cfg\n").unwrap();

    sbreport()
        .current_dir(temp.path())
        .arg("C.bset")
        .assert()
        .success();

    let report = read(temp.path().join("C.txt"));
    assert!(report.contains("Tools Report "));
    assert!(report.contains("pkg1-9.9.tar.gz"));
}

#[test]
fn test_define_overrides_config_file() {
    let temp = create_config_tree();
    fs::write(
        temp.path().join("sbreport.toml"),
        "[macros]\ntag = \"9.9\"\n",
    )
    .unwrap();
    fs::write(temp.path().join("config").join("C.bset"), "pkg1.cfg\n").unwrap();

    sbreport()
        .current_dir(temp.path())
        .args(["--define", "tag=3.1", "C.bset"])
        .assert()
        .success();

    assert!(read(temp.path().join("C.txt")).contains("pkg1-3.1.tar.gz"));
}

#[test]
fn test_output_with_multiple_names_fails() {
    let temp = create_config_tree();

    sbreport()
        .current_dir(temp.path())
        .args(["--output", "x.txt", "A.bset", "B.bset"])
        .assert()
        .failure()
        .code(1);

    assert!(!temp.path().join("x.txt").exists());
}

#[test]
fn test_invalid_member_fails_without_output() {
    let temp = create_config_tree();
    fs::write(
        temp.path().join("config").join("bad.bset"),
        "pkg1.cfg\nREADME.txt\n",
    )
    .unwrap();

    sbreport()
        .current_dir(temp.path())
        .arg("bad.bset")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid config type: README.txt"));

    assert!(!temp.path().join("bad.txt").exists());
}

#[test]
fn test_unknown_name_fails() {
    let temp = create_config_tree();

    sbreport()
        .current_dir(temp.path())
        .arg("nope.bset")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("config file not found: nope.bset"));
}

#[test]
fn test_html_with_missing_converter_fails() {
    let temp = create_config_tree();
    fs::write(
        temp.path().join("sbreport.toml"),
        "asciidoctor = \"sbreport-no-such-converter\"\n",
    )
    .unwrap();

    sbreport()
        .current_dir(temp.path())
        .args(["--format", "html", "A.bset"])
        .assert()
        .failure()
        .code(1);

    assert!(!temp.path().join("A.html").exists());
}

#[test]
fn test_bad_format_is_rejected() {
    let temp = create_config_tree();

    sbreport()
        .current_dir(temp.path())
        .args(["--format", "pdf", "A.bset"])
        .assert()
        .failure();
}

#[test]
fn test_no_names_fails() {
    let temp = create_config_tree();

    sbreport()
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1);
}
