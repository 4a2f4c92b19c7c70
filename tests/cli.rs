use assert_cmd::Command;
use tempfile::tempdir;

fn trainer(log_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("metric-trainer").unwrap();
    cmd.arg("--log-file").arg(log_dir.path().join("trainer.log"));
    cmd
}

#[test]
fn help_lists_difficulty_flags() {
    let dir = tempdir().unwrap();
    let output = trainer(&dir).arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--whole-numbers", "--easy", "--categories", "--questions", "--seed"] {
        assert!(stdout.contains(flag), "help is missing {flag}");
    }
}

#[test]
fn refuses_to_run_without_a_tty() {
    let dir = tempdir().unwrap();
    let output = trainer(&dir).write_stdin("").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("stdin must be a tty"));
}

#[test]
fn invalid_categories_are_a_usage_error() {
    let dir = tempdir().unwrap();
    let output = trainer(&dir)
        .args(["--categories", "xyz"])
        .write_stdin("")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown category 'x'"));
}

#[test]
fn zero_questions_is_rejected() {
    let dir = tempdir().unwrap();
    let output = trainer(&dir)
        .args(["--questions", "0"])
        .write_stdin("")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}
