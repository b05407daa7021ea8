use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn bin() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("pagelock"))
}

fn write_site(dir: &Path) {
    fs::write(
        dir.join("index.html"),
        concat!(
            "<html><head>\n",
            r#"<link rel="stylesheet" href="styles.css">"#,
            "\n</head><body>report\n",
            r#"<script src="data.js"></script>"#,
            "\n</body></html>"
        ),
    )
    .unwrap();
    fs::write(dir.join("styles.css"), "body { margin: 0; }").unwrap();
    fs::write(dir.join("data.js"), "const DATA = [1, 2, 3];").unwrap();
    fs::write(dir.join("favicon.ico"), b"\x00\x01").unwrap();
    fs::write(dir.join("notes.txt"), "internal notes").unwrap();
}

#[test]
fn build_writes_wrapper_and_assets() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("public");
    fs::create_dir(&src).unwrap();
    write_site(&src);

    bin()
        .env("PAGELOCK_PASSWORD", "test123")
        .arg("build")
        .arg("--source")
        .arg(&src)
        .arg("--output")
        .arg(&out)
        .arg("--iterations")
        .arg("100")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrapper written to"))
        .stdout(predicate::str::contains("Copied favicon.ico"));

    assert!(out.join("index.html").exists());
    assert!(out.join("favicon.ico").exists());
    assert!(!out.join("notes.txt").exists());
    assert!(!out.join("styles.css").exists());
}

#[test]
fn build_then_verify_roundtrip() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("public");
    fs::create_dir(&src).unwrap();
    write_site(&src);

    bin()
        .env("PAGELOCK_PASSWORD", "test123")
        .arg("build")
        .arg("--source")
        .arg(&src)
        .arg("--output")
        .arg(&out)
        .arg("--iterations")
        .arg("100")
        .assert()
        .success();

    bin()
        .env("PAGELOCK_PASSWORD", "test123")
        .arg("verify")
        .arg(out.join("index.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("unlocked"));
}

#[test]
fn verify_with_wrong_password_fails() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("public");
    fs::create_dir(&src).unwrap();
    write_site(&src);

    bin()
        .env("PAGELOCK_PASSWORD", "test123")
        .arg("build")
        .arg("--source")
        .arg(&src)
        .arg("--output")
        .arg(&out)
        .arg("--iterations")
        .arg("100")
        .assert()
        .success();

    bin()
        .env("PAGELOCK_PASSWORD", "wrong")
        .arg("verify")
        .arg(out.join("index.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong password or corrupted data"));
}

#[test]
fn wrapper_does_not_leak_source_text() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("public");
    fs::create_dir(&src).unwrap();
    write_site(&src);

    bin()
        .env("PAGELOCK_PASSWORD", "test123")
        .arg("build")
        .arg("--source")
        .arg(&src)
        .arg("--output")
        .arg(&out)
        .arg("--iterations")
        .arg("100")
        .assert()
        .success();

    let page = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(!page.contains("const DATA"));
    assert!(!page.contains("margin: 0"));
    assert!(page.contains("const ITERATIONS = 100;"));
}

#[test]
fn strict_build_fails_on_missing_tag() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("public");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("index.html"), "<html><body></body></html>").unwrap();
    fs::write(src.join("styles.css"), "body {}").unwrap();

    bin()
        .env("PAGELOCK_PASSWORD", "test123")
        .arg("build")
        .arg("--source")
        .arg(&src)
        .arg("--output")
        .arg(&out)
        .arg("--iterations")
        .arg("100")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected tag"));
}

#[test]
fn manifest_supplies_defaults() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("public");
    fs::create_dir(&src).unwrap();
    write_site(&src);
    fs::write(
        src.join("pagelock.json"),
        r#"{ "title": "Field Study", "iterations": 150 }"#,
    )
    .unwrap();

    bin()
        .env("PAGELOCK_PASSWORD", "test123")
        .arg("build")
        .arg("--source")
        .arg(&src)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let page = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(page.contains("<title>Field Study</title>"));
    assert!(page.contains("const ITERATIONS = 150;"));
}

#[test]
fn cli_flag_overrides_manifest() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("public");
    fs::create_dir(&src).unwrap();
    write_site(&src);
    fs::write(src.join("pagelock.json"), r#"{ "iterations": 150 }"#).unwrap();

    bin()
        .env("PAGELOCK_PASSWORD", "test123")
        .arg("build")
        .arg("--source")
        .arg(&src)
        .arg("--output")
        .arg(&out)
        .arg("--iterations")
        .arg("200")
        .assert()
        .success();

    let page = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(page.contains("const ITERATIONS = 200;"));
}

#[test]
fn build_fails_without_shell() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("public");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("styles.css"), "body {}").unwrap();

    bin()
        .env("PAGELOCK_PASSWORD", "test123")
        .arg("build")
        .arg("--source")
        .arg(&src)
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn verify_missing_wrapper_fails() {
    let dir = tempdir().unwrap();

    bin()
        .env("PAGELOCK_PASSWORD", "test123")
        .arg("verify")
        .arg(dir.path().join("nope.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
