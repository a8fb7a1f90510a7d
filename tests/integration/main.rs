//! Integration tests for ci-once

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    fn ci_once() -> Command {
        let mut cmd = cargo_bin_cmd!("ci-once");
        cmd.env_remove("CI_ONCE_CONFIG");
        cmd
    }

    #[test]
    fn help_displays() {
        ci_once()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--verbose"));
    }

    #[test]
    fn version_displays() {
        ci_once()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn unknown_argument_fails() {
        ci_once()
            .arg("--frobnicate")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--frobnicate"));
    }

    #[test]
    fn missing_manifest_fails() {
        let dir = tempfile::TempDir::new().unwrap();

        ci_once()
            .current_dir(dir.path())
            .args(["--no-local", "--command", "touch spawned"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("ci-once: ERROR:"))
            .stderr(predicate::str::contains("package-lock.json can't be read"));

        assert!(!dir.path().join("spawned").exists());
        assert!(!dir.path().join("node_modules").exists());
    }
}

#[cfg(unix)]
mod guard_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use sha2::{Digest, Sha256};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const CACHE: &str = "node_modules/.package-lock-sha256";

    fn ci_once(dir: &Path, command: &str) -> Command {
        let mut cmd = cargo_bin_cmd!("ci-once");
        cmd.env_remove("CI_ONCE_CONFIG")
            .current_dir(dir)
            .args(["--no-local", "--command", command]);
        cmd
    }

    fn sha256(s: &str) -> String {
        hex::encode(Sha256::digest(s.as_bytes()))
    }

    fn count_runs(dir: &Path) -> usize {
        fs::read_to_string(dir.join("runs"))
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }

    #[test]
    fn installs_then_skips() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package-lock.json"), "lockfile-v1").unwrap();

        ci_once(dir.path(), "echo run >> runs").assert().success();
        assert_eq!(
            fs::read_to_string(dir.path().join(CACHE)).unwrap(),
            sha256("lockfile-v1")
        );

        ci_once(dir.path(), "echo run >> runs").assert().success();
        assert_eq!(count_runs(dir.path()), 1);
    }

    #[test]
    fn changed_manifest_reinstalls() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package-lock.json"), "lockfile-v1").unwrap();
        ci_once(dir.path(), "echo run >> runs").assert().success();

        fs::write(dir.path().join("package-lock.json"), "lockfile-v2").unwrap();
        ci_once(dir.path(), "echo run >> runs").assert().success();

        assert_eq!(count_runs(dir.path()), 2);
        assert_eq!(
            fs::read_to_string(dir.path().join(CACHE)).unwrap(),
            sha256("lockfile-v2")
        );
    }

    #[test]
    fn failed_install_keeps_record() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package-lock.json"), "lockfile-v2").unwrap();
        fs::create_dir_all(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join(CACHE), sha256("lockfile-v1")).unwrap();

        ci_once(dir.path(), "exit 1")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("exited with non-zero code: 1"));

        assert_eq!(
            fs::read_to_string(dir.path().join(CACHE)).unwrap(),
            sha256("lockfile-v1")
        );
    }

    #[test]
    fn installer_output_passes_through() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package-lock.json"), "{}").unwrap();

        ci_once(dir.path(), "echo hello-from-installer")
            .assert()
            .success()
            .stdout(predicate::str::contains("hello-from-installer"));
    }

    #[test]
    fn verbose_logs_hashes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package-lock.json"), "lockfile-v1").unwrap();

        ci_once(dir.path(), "true")
            .arg("-v")
            .assert()
            .success()
            .stdout(predicate::str::contains(sha256("lockfile-v1")));
    }

    #[test]
    fn missing_explicit_config_is_logged() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package-lock.json"), "lockfile-v1").unwrap();

        ci_once(dir.path(), "true")
            .args(["-v", "--config", "missing.toml"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Config file"))
            .stdout(predicate::str::contains("missing.toml not found"));
    }

    #[test]
    fn local_config_discovery_is_logged() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package-lock.json"), "lockfile-v1").unwrap();
        fs::write(dir.path().join(".ci-once.toml"), "[guard]\ncommand = \"true\"\n").unwrap();

        let mut cmd = cargo_bin_cmd!("ci-once");
        cmd.env_remove("CI_ONCE_CONFIG")
            .current_dir(dir.path())
            .arg("-v")
            .assert()
            .success()
            .stdout(predicate::str::contains("Found local config"));
    }

    #[test]
    fn json_log_format_from_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package-lock.json"), "lockfile-v1").unwrap();
        fs::write(
            dir.path().join(".ci-once.toml"),
            "[general]\nlog_format = \"json\"\n\n[guard]\ncommand = \"true\"\n",
        )
        .unwrap();

        let mut cmd = cargo_bin_cmd!("ci-once");
        cmd.env_remove("CI_ONCE_CONFIG")
            .current_dir(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""message":"Running true...""#));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package-lock.json"), "lockfile-v1").unwrap();
        fs::write(dir.path().join(".ci-once.toml"), "[general]\nlog_format = \"xml\"\n").unwrap();

        let mut cmd = cargo_bin_cmd!("ci-once");
        cmd.env_remove("CI_ONCE_CONFIG")
            .current_dir(dir.path())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn local_config_is_used() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("yarn.lock"), "lockfile-v1").unwrap();
        fs::write(
            dir.path().join(".ci-once.toml"),
            "[guard]\nmanifest = \"yarn.lock\"\ncache_path = \".cache/yarn-lock-sha256\"\ncommand = \"true\"\n",
        )
        .unwrap();

        let mut cmd = cargo_bin_cmd!("ci-once");
        cmd.env_remove("CI_ONCE_CONFIG")
            .current_dir(dir.path())
            .assert()
            .success();

        assert_eq!(
            fs::read_to_string(dir.path().join(".cache/yarn-lock-sha256")).unwrap(),
            sha256("lockfile-v1")
        );
    }
}
