//! Integration tests for unboxer-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use flate2::Compression;
use flate2::write::GzEncoder;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn unboxer_cmd() -> Command {
    cargo_bin_cmd!("unboxer")
}

fn tar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, *data).unwrap();
    }
    builder.into_inner().unwrap()
}

fn gzip_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (path, data) in entries {
        zip.start_file(*path, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn write(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

/// Input directory with one flattened zip, one top-level tar.gz and one
/// non-archive that matches a pattern.
fn sample_input(temp: &TempDir) -> PathBuf {
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();
    write(
        &input,
        "release-1.0.zip",
        &zip_bytes(&[("release-1.0/a.txt", b"a"), ("release-1.0/b/c.txt", b"c")]),
    );
    write(
        &input,
        "bundle.tar.gz",
        &gzip_bytes(&tar_bytes(&[("readme.md", b"# hi"), ("src/main.c", b"int main;")])),
    );
    write(&input, "notes.zip", b"just some text");
    input
}

#[test]
fn test_version_flag() {
    unboxer_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("unboxer"));
}

#[test]
fn test_help_lists_subcommands() {
    unboxer_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_run_extracts_directory() {
    let temp = TempDir::new().unwrap();
    let input = sample_input(&temp);
    let output = temp.path().join("output");

    unboxer_cmd()
        .arg("run")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 extracted, 1 skipped, 0 failed"));

    assert!(output.join("release-1.0/a.txt").is_file());
    assert!(output.join("release-1.0/b/c.txt").is_file());
    assert!(!output.join("release-1.0/release-1.0").exists());
    assert!(output.join("bundle/readme.md").is_file());
    assert!(output.join("bundle/src/main.c").is_file());
    assert!(!output.join("notes").exists());
}

#[test]
fn test_run_twice_is_stable() {
    let temp = TempDir::new().unwrap();
    let input = sample_input(&temp);
    let output = temp.path().join("output");

    for _ in 0..2 {
        unboxer_cmd()
            .args(["run", "-w", "2"])
            .arg(&input)
            .arg(&output)
            .assert()
            .success();
    }

    let mut top: Vec<_> = fs::read_dir(&output)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    top.sort();
    assert_eq!(top, ["bundle", "release-1.0"]);
}

#[test]
fn test_run_pattern_replaces_defaults() {
    let temp = TempDir::new().unwrap();
    let input = sample_input(&temp);
    let output = temp.path().join("output");

    unboxer_cmd()
        .args(["run", "--pattern", "*.tar.gz"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    assert!(output.join("bundle").is_dir());
    assert!(!output.join("release-1.0").exists());
}

#[test]
fn test_run_failure_sets_exit_status() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    fs::create_dir(&input).unwrap();
    let mut evil = tar::Builder::new(Vec::new());
    let mut header = tar::Header::new_gnu();
    let name = b"../escape.txt";
    header.as_old_mut().name[..name.len()].copy_from_slice(name);
    header.set_size(4);
    header.set_mode(0o644);
    header.set_cksum();
    evil.append(&header, &b"evil"[..]).unwrap();
    write(&input, "evil.tar", &evil.into_inner().unwrap());
    write(&input, "ok.zip", &zip_bytes(&[("ok.txt", b"ok")]));

    unboxer_cmd()
        .arg("run")
        .arg(&input)
        .arg(temp.path().join("output"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 archives failed"));

    assert!(temp.path().join("output/ok/ok.txt").is_file());
    assert!(!temp.path().join("escape.txt").exists());
}

#[test]
fn test_run_missing_input_dir() {
    let temp = TempDir::new().unwrap();

    unboxer_cmd()
        .arg("run")
        .arg(temp.path().join("absent"))
        .arg(temp.path().join("output"))
        .assert()
        .failure();
}

#[test]
fn test_run_json_output() {
    let temp = TempDir::new().unwrap();
    let input = sample_input(&temp);

    let assert = unboxer_cmd()
        .args(["--json", "run"])
        .arg(&input)
        .arg(temp.path().join("output"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["operation"], "run");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["extracted"], 2);
    assert_eq!(json["data"]["skipped"], 1);
    assert_eq!(json["data"]["archives"].as_array().unwrap().len(), 3);
}

#[test]
fn test_extract_single_archive() {
    let temp = TempDir::new().unwrap();
    let archive = write(
        temp.path(),
        "pkg.zip",
        &zip_bytes(&[("pkg/lib.rs", b"pub fn f() {}")]),
    );
    let output = temp.path().join("out");

    unboxer_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("flattened"));

    assert!(output.join("pkg/lib.rs").is_file());
}

#[test]
fn test_extract_unknown_format_hint() {
    let temp = TempDir::new().unwrap();
    let archive = write(temp.path(), "notes.tar.gz", b"not gzip at all");

    unboxer_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a supported archive"))
        .stderr(predicate::str::contains("HINT"));

    assert!(!temp.path().join("out/notes").exists());
}

#[test]
fn test_inspect_reports_layout() {
    let temp = TempDir::new().unwrap();
    let archive = write(
        temp.path(),
        "bundle.tar.gz",
        &gzip_bytes(&tar_bytes(&[("readme.md", b"r"), ("src/main.c", b"m")])),
    );

    unboxer_cmd()
        .arg("inspect")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("tar.gz"))
        .stdout(predicate::str::contains("bundle/"))
        .stdout(predicate::str::contains("top-level"))
        .stdout(predicate::str::contains("src"));

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn test_inspect_json() {
    let temp = TempDir::new().unwrap();
    let archive = write(
        temp.path(),
        "tool.zip",
        &zip_bytes(&[("tool/bin", b"x"), ("tool/doc", b"y")]),
    );

    unboxer_cmd()
        .args(["-j", "inspect"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"layout\": \"flattened\""))
        .stdout(predicate::str::contains("\"base_name\": \"tool\""));
}

#[test]
fn test_quiet_suppresses_summary() {
    let temp = TempDir::new().unwrap();
    let input = sample_input(&temp);

    unboxer_cmd()
        .args(["-q", "run"])
        .arg(&input)
        .arg(temp.path().join("output"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_completion_bash() {
    unboxer_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unboxer"));
}
