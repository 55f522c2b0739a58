use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ytdigest(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ytdigest").unwrap();
    cmd.arg("--config")
        .arg(config_dir.path().join("config.yaml"))
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn id_prints_the_video_identifier() {
    let dir = TempDir::new().unwrap();
    ytdigest(&dir)
        .args(["id", "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"])
        .assert()
        .success()
        .stdout("dQw4w9WgXcQ\n");
}

#[test]
fn id_rejects_unrecognized_urls() {
    let dir = TempDir::new().unwrap();
    ytdigest(&dir)
        .args(["id", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid URL"));
}

#[test]
fn summarize_with_invalid_url_fails_before_any_request() {
    let dir = TempDir::new().unwrap();
    ytdigest(&dir)
        .args(["--quiet", "summarize", "not a url", "--api-key", "test-key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid URL"));
}

#[test]
fn summarize_requires_an_api_key() {
    let dir = TempDir::new().unwrap();
    ytdigest(&dir)
        .args(["summarize", "https://youtu.be/dQw4w9WgXcQ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--api-key"));
}

#[test]
fn config_show_writes_and_displays_defaults() {
    let dir = TempDir::new().unwrap();
    ytdigest(&dir)
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transcript Language: ja"))
        .stdout(predicate::str::contains("generativelanguage.googleapis.com"));

    assert!(dir.path().join("config.yaml").exists());
}
