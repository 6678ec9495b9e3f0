use assert_cmd::Command;

// Argument handling happens before the terminal is touched, so these run
// without a TTY.

#[test]
fn help_lists_session_flags() {
    let output = Command::cargo_bin("pomo").unwrap().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--pomodoro"));
    assert!(stdout.contains("--short"));
    assert!(stdout.contains("--long"));
    assert!(stdout.contains("--color"));
    assert!(stdout.contains("--font"));
}

#[test]
fn out_of_range_duration_is_rejected() {
    let assert = Command::cargo_bin("pomo")
        .unwrap()
        .args(["--pomodoro", "101"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("101"));
}

#[test]
fn unknown_color_is_rejected() {
    Command::cargo_bin("pomo")
        .unwrap()
        .args(["--color", "green"])
        .assert()
        .failure();
}

#[test]
fn non_tty_stdin_is_refused() {
    let assert = Command::cargo_bin("pomo")
        .unwrap()
        .write_stdin("")
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("stdin must be a tty"));
}
