use assert_cmd::Command;
use predicates::prelude::*;

fn errs_cli() -> Command {
    let mut cmd = Command::cargo_bin("errs-cli").unwrap();
    cmd.env_remove("ERRS_FALLBACK_MESSAGE")
        .env_remove("ERRS_WORD_SEPARATOR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn create_record_without_message() {
    errs_cli()
        .args(["create", r#"{"foo":"bar","status":404}"#])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""name":"Error""#)
                .and(predicate::str::contains(r#""message":"Unspecified error""#))
                .and(predicate::str::contains(r#""foo":"bar""#))
                .and(predicate::str::contains(r#""status":404"#)),
        );
}

#[test]
fn create_registered_kind() {
    errs_cli()
        .args([
            "--register",
            "named=NamedError",
            "create",
            "--kind",
            "named",
            r#"{"testing":true,"message":"This is an error."}"#,
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""name":"NamedError""#)
                .and(predicate::str::contains(r#""message":"This is an error.""#))
                .and(predicate::str::contains(r#""testing":true"#)),
        );
}

#[test]
fn create_kind_registered_by_declared_name() {
    errs_cli()
        .args(["--register", "AnError", "create", "--kind", "anerror", "boom"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"AnError""#));
}

#[test]
fn handle_joins_words() {
    errs_cli()
        .args(["handle", "disk", "is", "full"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""message":"disk is full""#))
        .stdout(predicate::str::contains(r#""stack":"Error: disk is full\n    at "#));
}

#[test]
fn fallback_message_from_env() {
    errs_cli()
        .env("ERRS_FALLBACK_MESSAGE", "Something went wrong")
        .args(["create"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""message":"Something went wrong""#));
}

#[test]
fn broken_json_fails() {
    errs_cli().args(["create", "{oops"]).assert().failure();
}
