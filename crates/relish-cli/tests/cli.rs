use assert_cmd::Command;
use predicates::prelude::*;

fn relish_notifier() -> Command {
    Command::cargo_bin("relish-notifier").unwrap()
}

#[test]
fn test_help_lists_all_flags() {
    relish_notifier()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--headless"))
        .stdout(predicate::str::contains("--extensions"))
        .stdout(predicate::str::contains("--check-interval"))
        .stdout(predicate::str::contains("--once"))
        .stdout(predicate::str::contains("--page-timeout"))
        .stdout(predicate::str::contains("--command"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_help_documents_credential_sources() {
    relish_notifier()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("RELISH_USERNAME"))
        .stdout(predicate::str::contains("RELISH_PASSWORD"));
}

#[test]
fn test_version_flag() {
    relish_notifier()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("relish-notifier"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_credentials_name_the_fallback_variable() {
    // This test assumes no relish-notifier entry exists in the system
    // keychain; with both environment variables unset, resolution must
    // fail before any browser is launched.
    relish_notifier()
        .arg("--once")
        .env_remove("RELISH_USERNAME")
        .env_remove("RELISH_PASSWORD")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("RELISH_USERNAME"));
}

#[test]
fn test_zero_check_interval_is_rejected() {
    relish_notifier()
        .args(["--check-interval", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_zero_page_timeout_is_rejected() {
    relish_notifier()
        .args(["--page-timeout", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    relish_notifier().arg("--frobnicate").assert().failure();
}
