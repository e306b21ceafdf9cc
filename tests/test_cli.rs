//! Integration tests for the pcalc binary

use assert_cmd::Command;
use predicates::prelude::*;

fn pcalc(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pcalc").unwrap();
    cmd.env("HOME", home.path())
        .env("PCALC_ENV", "test")
        .env("PCALC_HISTORY_FILE", home.path().join("history.csv"))
        .env_remove("PCALC_PLUGIN_DIR")
        .env_remove("PCALC_LOG_FILE")
        .env_remove("PCALC_BANNER")
        .env("PCALC_LOG", "off")
        .current_dir(home.path());
    cmd
}

#[test]
fn test_single_command() {
    let home = tempfile::tempdir().unwrap();
    pcalc(&home)
        .args(["-c", "add(5, 3)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: 8"));
}

#[test]
fn test_decimal_output() {
    let home = tempfile::tempdir().unwrap();
    pcalc(&home)
        .args(["-c", "add(0.1, 0.2)"])
        .assert()
        .success()
        .stdout("Result: 0.3\n");
}

#[test]
fn test_numeric_looking_path_kept() {
    let home = tempfile::tempdir().unwrap();
    let script = home.path().join("save.calc");
    std::fs::write(&script, "add(1, 2)\nsave_history(2024.10)\nsave_history 1e3\n").unwrap();

    pcalc(&home)
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("History saved to 2024.10 (1 entry)"))
        .stdout(predicate::str::contains("History saved to 1e3 (1 entry)"));

    assert!(home.path().join("2024.10").is_file());
    assert!(home.path().join("1e3").is_file());
    assert!(!home.path().join("2024.1").exists());
    assert!(!home.path().join("1000").exists());
}

#[test]
fn test_env_file_for_environment() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join(".env.staging"),
        "PCALC_HISTORY_FILE=ignored.csv\nPCALC_BANNER=1\n",
    )
    .unwrap();

    // The process environment already names a history file, so only the banner comes from the file
    pcalc(&home)
        .env("PCALC_ENV", "staging")
        .write_stdin("add(1, 2)\nsave_history\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("interactive calculator"));

    assert!(home.path().join("history.csv").is_file());
    assert!(!home.path().join("ignored.csv").exists());
    assert!(!home.path().join("logs").exists());
}

#[test]
fn test_development_logs_to_file() {
    let home = tempfile::tempdir().unwrap();
    pcalc(&home)
        .env("PCALC_ENV", "development")
        .env("PCALC_LOG", "info")
        .args(["-c", "add(1, 2)"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let log = std::fs::read_to_string(home.path().join("logs").join("development_calculator.log")).unwrap();
    assert!(log.contains("added to history"), "{}", log);
}

#[test]
fn test_command_failure() {
    let home = tempfile::tempdir().unwrap();
    pcalc(&home)
        .args(["-c", "divide(10, 0)"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Cannot divide by zero"));

    pcalc(&home)
        .args(["-c", "unknown_cmd"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown command: unknown_cmd"));
}

#[test]
fn test_usage_error() {
    let home = tempfile::tempdir().unwrap();
    pcalc(&home).arg("--bogus").assert().code(2);
}

#[test]
fn test_version() {
    let home = tempfile::tempdir().unwrap();
    pcalc(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_script() {
    let home = tempfile::tempdir().unwrap();
    let script = home.path().join("run.calc");
    std::fs::write(&script, "# totals\nadd(1, 2)\n\nmultiply 3 4\nsave_history\n").unwrap();

    pcalc(&home)
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: 3").and(predicate::str::contains("Result: 12")));

    let saved = std::fs::read_to_string(home.path().join("history.csv")).unwrap();
    assert_eq!(saved.lines().count(), 3);
}

#[test]
fn test_script_stops_at_failure() {
    let home = tempfile::tempdir().unwrap();
    let script = home.path().join("bad.calc");
    std::fs::write(&script, "sqrt(-4)\nadd(1, 2)\n").unwrap();

    pcalc(&home)
        .arg(&script)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Result: 3").not())
        .stderr(predicate::str::contains(":1:"));
}

#[test]
fn test_repl_from_stdin() {
    let home = tempfile::tempdir().unwrap();
    pcalc(&home)
        .write_stdin("add(5, 3)\nsqrt(-1)\nlast_calculation\nexit\nadd(1, 1)\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: 8"))
        .stdout(predicate::str::contains("Last calculation: add(5, 3) = 8"))
        .stdout(predicate::str::contains("Result: 2").not())
        .stderr(predicate::str::contains("Error: Cannot take the square root of a negative number"));
}

#[cfg(feature = "plugins")]
#[test]
fn test_plugins_flag() {
    let home = tempfile::tempdir().unwrap();
    let plugins = home.path().join("plugins");
    std::fs::create_dir(&plugins).unwrap();
    std::fs::write(plugins.join("double.toml"), "[command]\noperation = \"multiply\"\noperand = 2\n").unwrap();

    pcalc(&home)
        .arg("--plugins")
        .arg(&plugins)
        .args(["-c", "double(21)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: 42"));

    pcalc(&home)
        .arg("--plugins")
        .arg(&plugins)
        .args(["--no-plugins", "-c", "double(21)"])
        .assert()
        .code(1);
}
