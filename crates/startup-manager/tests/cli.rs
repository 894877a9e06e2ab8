use std::process::Command;

fn startup_manager() -> Command {
    Command::new(env!("CARGO_BIN_EXE_startup-manager"))
}

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = startup_manager();
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute startup-manager");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("launch at Windows logon"));
    assert!(stdout.contains("remove"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = startup_manager();
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute startup-manager");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("startup-manager"));
}

#[test]
fn add_without_arguments_is_a_usage_error() {
    // Arrange
    let mut cmd = startup_manager();
    cmd.arg("add");

    // Act
    let output = cmd.output().expect("failed to execute startup-manager");

    // Assert
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("<NAME>"));
}

#[cfg(not(windows))]
#[test]
fn store_commands_fail_off_windows() {
    // Arrange
    let mut cmd = startup_manager();
    cmd.args(["check", "MyApp"]);

    // Act
    let output = cmd.output().expect("failed to execute startup-manager");

    // Assert
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("only supported on Windows"));
}
