use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const STREAMS: &str = r#"package streams

type Writer interface {
	Write(r Reader) error
	Close() error
}

type Reader interface {
	Read(p []byte) (n int, err error)
}

type buffer struct {
	data []byte
}
"#;

fn declorder() -> Command {
    Command::cargo_bin("declorder").unwrap()
}

#[test]
fn analyze_orders_interfaces_and_writes_stubs() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let src = temp.path().join("src");
    fs::create_dir_all(&src)?;
    fs::write(src.join("streams.go"), STREAMS)?;
    let noop_dir = temp.path().join("noop");

    declorder()
        .arg("analyze")
        .arg("--dirs")
        .arg(&src)
        .arg("--interfaces")
        .arg("--noop")
        .arg("--noop-dir")
        .arg(&noop_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Using Topological sorting with NoOp generation enabled"))
        .stdout(predicate::str::contains("=== Analyzing directory:"))
        .stdout(predicate::str::contains("--- Interfaces (Dependency Order) ---"))
        .stdout(predicate::str::contains("[Level 0] Interface: Reader (Package: streams)"))
        .stdout(predicate::str::contains("[Level 1] Interface: Writer (Package: streams)"))
        .stdout(predicate::str::contains("--- Structs").not())
        .stdout(predicate::str::contains("Generated NoOp implementations:"));

    let generated = fs::read_to_string(noop_dir.join("noop_streams_interfaces.go"))?;
    assert!(generated.starts_with("// Code generated by declorder; DO NOT EDIT.\n\npackage main\n"));
    assert!(generated.contains("type NoOpWriter struct {"));
    assert!(generated.contains("func (n *NoOpWriter) Close() error {"));
    Ok(())
}

#[test]
fn alphabetical_sorting_is_announced() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    fs::write(temp.path().join("streams.go"), STREAMS)?;

    declorder()
        .args(["analyze", "--alpha", "--structs", "--dirs"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Using Alphabetical sorting\n"))
        .stdout(predicate::str::contains("[Level 0] Struct: buffer (Package: streams)"));
    Ok(())
}

#[test]
fn broken_file_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    fs::write(temp.path().join("a_broken.go"), "package broken\n\nfunc {\n")?;
    fs::write(temp.path().join("streams.go"), STREAMS)?;

    declorder()
        .args(["analyze", "--dirs"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("streams.go ==="))
        .stdout(predicate::str::contains("a_broken.go").not());
    Ok(())
}

#[test]
fn missing_directory_fails() {
    declorder()
        .args(["analyze", "--dirs", "/definitely/not/here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing input directories"));
}

#[test]
fn invalid_package_name_fails() {
    declorder()
        .args(["analyze", "--package", "not valid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn manifest_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let manifest = temp.path().join("streams.json");
    fs::write(
        &manifest,
        r#"{
            "package": "streams",
            "interfaces": [
                { "name": "Writer", "methods": ["Write(Reader) error"] },
                { "name": "Reader", "methods": ["Read([]byte) (int, error)"] }
            ]
        }"#,
    )?;
    let noop_dir = temp.path().join("out");

    declorder()
        .arg("manifest")
        .arg(&manifest)
        .arg("--noop")
        .arg("--noop-dir")
        .arg(&noop_dir)
        .args(["--package", "streams"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Level 0] Interface: Reader (Package: streams)"))
        .stdout(predicate::str::contains("--- NoOp Implementation ---"));

    let generated = fs::read_to_string(noop_dir.join("noop_streams_interfaces.go"))?;
    assert!(generated.contains("package streams\n"));
    assert!(generated.contains("\treturn 0, nil\n"));
    Ok(())
}
