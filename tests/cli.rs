/// Binary-level tests for pg-posts-migrate
///
/// These only exercise paths that never reach a live database: argument
/// parsing, configuration errors, and an unreachable server.
use std::path::Path;
use std::process::{Command, Output};

// Helper to run the binary with a clean PG_* environment
fn run_migrate(args: &[&str], envs: &[(&str, &str)], cwd: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pg-posts-migrate"));
    cmd.args(args).current_dir(cwd);
    for key in ["PG_HOST", "PG_PORT", "PG_DBNAME", "PG_USER", "PG_PASSWORD", "FORCE"] {
        cmd.env_remove(key);
    }
    cmd.envs(envs.iter().copied());
    cmd.output().unwrap_or_else(|e| panic!("Failed to run pg-posts-migrate {}: {}", args.join(" "), e))
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_unreachable_server_aborts_before_writing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_migrate(&[], &[("PG_HOST", "127.0.0.1"), ("PG_PORT", "1")], dir.path());

    assert!(!output.status.success(), "connection failure must exit non-zero");
    let stdout = stdout_of(&output);
    assert!(stdout.contains("failed to connect"), "stdout: {}", stdout);
    assert!(stdout.contains("railway@127.0.0.1"), "stdout: {}", stdout);
    assert!(!dir.path().join("ko/_posts").exists(), "no output directory on a fatal error");
}

#[test]
fn test_invalid_port_is_a_configuration_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_migrate(&[], &[("PG_PORT", "not-a-port")], dir.path());

    assert!(!output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Configuration error"), "stdout: {}", stdout);
    assert!(stdout.contains("PG_PORT"), "stdout: {}", stdout);
    assert!(!dir.path().join("ko").exists());
}

#[test]
fn test_unknown_flag_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_migrate(&["--overwrite-everything"], &[], dir.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--overwrite-everything"), "stderr: {}", stderr);
}

#[test]
fn test_help_mentions_force() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_migrate(&["--help"], &[], dir.path());

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("--force"));
}
