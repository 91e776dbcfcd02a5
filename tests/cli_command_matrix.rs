use assert_cmd::Command;
use tempfile::TempDir;

fn run_help(home: &TempDir, args: &[&str]) {
    let mut cmd = Command::cargo_bin("modaudit").expect("binary under test");
    cmd.env("HOME", home.path())
        .args(args)
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn every_cli_command_has_help_path() {
    let home = TempDir::new().expect("temp home");

    // top-level
    run_help(&home, &[]);

    // check commands
    run_help(&home, &["check"]);
    run_help(&home, &["check", "authorized"]);
    run_help(&home, &["check", "min-version"]);
    run_help(&home, &["check", "unused"]);
    run_help(&home, &["check", "all"]);

    // registry commands
    run_help(&home, &["registry"]);
    run_help(&home, &["registry", "list"]);
    run_help(&home, &["registry", "show"]);
    run_help(&home, &["registry", "refresh"]);

    // project commands
    run_help(&home, &["project"]);
    run_help(&home, &["project", "set"]);
    run_help(&home, &["project", "show"]);
    run_help(&home, &["project", "clear"]);
}
