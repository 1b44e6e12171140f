//! Integration tests for numake

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    fn numake() -> Command {
        let mut cmd = cargo_bin_cmd!("numake");
        cmd.env_remove("NUMAKE_DEBUG").env_remove("NUMAKE_LOG");
        cmd
    }

    #[test]
    fn help_displays() {
        numake()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("make.nu"));
    }

    #[test]
    fn version_displays() {
        let meta = numake::meta::PackageMeta::current().unwrap();
        for flag in ["--version", "-v"] {
            numake()
                .arg(flag)
                .assert()
                .success()
                .stdout(predicate::str::contains(format!(
                    "numake {}",
                    meta.numake_version
                )))
                .stdout(predicate::str::contains(format!(
                    "nushell {}",
                    meta.nu_version
                )));
        }
    }

    #[test]
    fn conflicting_flags_fail_quietly() {
        numake()
            .args(["--version", "--list"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn conflicting_flags_are_reported_in_debug_mode() {
        numake()
            .env("NUMAKE_DEBUG", "1")
            .args(["--version", "--list"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("cannot be used"));
    }
}

/// Runs against a data directory pre-populated with a fake `nu`, so the
/// provisioning fast path is taken and nothing is downloaded.
#[cfg(unix)]
mod project_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        data_dir: PathBuf,
        project: PathBuf,
        nu_version: String,
    }

    impl Fixture {
        /// `reported_version` is what the fake `nu --version` prints
        fn new(reported_version: Option<&str>) -> Self {
            let temp = TempDir::new().unwrap();
            let nu_version = numake::meta::PackageMeta::current().unwrap().nu_version;
            let reported = reported_version.unwrap_or(&nu_version).to_string();

            let data_dir = temp.path().join("data");
            let bin_dir = data_dir.join("versions").join(&nu_version).join("bin");
            fs::create_dir_all(&bin_dir).unwrap();
            write_script(
                &bin_dir.join("nu"),
                &format!(
                    r#"if [ "$1" = "--version" ]; then echo {reported}; exit 0; fi
case "$4" in
  *"help commands"*) echo "    build # Build the project"; exit 0 ;;
  fail*) echo "task failed" >&2; exit 7 ;;
esac
echo "nu $*"
touch .ran"#
                ),
            );

            let project = temp.path().join("project");
            fs::create_dir_all(project.join("src").join("deep")).unwrap();
            fs::write(project.join("make.nu"), "def build [] {}\n").unwrap();

            Self {
                _temp: temp,
                data_dir,
                project,
                nu_version,
            }
        }

        fn numake(&self, cwd: &Path) -> Command {
            let mut cmd = cargo_bin_cmd!("numake");
            cmd.env_remove("NUMAKE_DEBUG")
                .env_remove("NUMAKE_LOG")
                .env("NUMAKE_DATA_DIR", &self.data_dir)
                .current_dir(cwd);
            cmd
        }

        fn ran(&self) -> bool {
            self.project.join(".ran").exists()
        }
    }

    fn write_script(path: &Path, body: &str) {
        fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn command_is_forwarded_from_nested_directory() {
        let fixture = Fixture::new(None);

        fixture
            .numake(&fixture.project.join("src").join("deep"))
            .args(["build", "--release"])
            .assert()
            .success()
            .stdout(predicate::str::contains("-c build --release"))
            .stdout(predicate::str::contains("make.nu"));

        assert!(fixture.ran(), "nu should run in the project root");
    }

    #[test]
    fn failing_command_exits_with_one() {
        let fixture = Fixture::new(None);

        fixture
            .numake(&fixture.project)
            .arg("fail")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("task failed"));
    }

    #[test]
    fn list_prints_commands() {
        let fixture = Fixture::new(None);

        fixture
            .numake(&fixture.project)
            .arg("--list")
            .assert()
            .success()
            .stdout(predicate::str::contains("Commands:"))
            .stdout(predicate::str::contains("build # Build the project"));
    }

    #[test]
    fn no_arguments_lists_commands() {
        let fixture = Fixture::new(None);

        fixture
            .numake(&fixture.project)
            .assert()
            .success()
            .stdout(predicate::str::contains("Commands:"));
    }

    #[test]
    fn install_prints_binary_path() {
        let fixture = Fixture::new(None);
        let expected = Path::new("versions")
            .join(&fixture.nu_version)
            .join("bin")
            .join("nu");

        fixture
            .numake(&fixture.project)
            .arg("--install")
            .assert()
            .success()
            .stdout(predicate::str::contains(expected.to_str().unwrap()));
    }

    #[test]
    fn missing_makefile_fails_quietly() {
        let fixture = Fixture::new(None);
        let elsewhere = TempDir::new().unwrap();

        fixture
            .numake(elsewhere.path())
            .arg("build")
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn missing_makefile_is_reported_in_debug_mode() {
        let fixture = Fixture::new(None);
        let elsewhere = TempDir::new().unwrap();

        fixture
            .numake(elsewhere.path())
            .env("NUMAKE_DEBUG", "1")
            .arg("build")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Could not find make.nu"));
    }

    #[test]
    fn version_mismatch_stops_before_running() {
        let fixture = Fixture::new(Some("0.0.1"));

        fixture
            .numake(&fixture.project)
            .env("NUMAKE_DEBUG", "1")
            .arg("build")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("reported version 0.0.1"));

        assert!(!fixture.ran());
    }

    #[test]
    fn version_mismatch_ignored_outside_debug_mode() {
        let fixture = Fixture::new(Some("0.0.1"));

        fixture
            .numake(&fixture.project)
            .arg("build")
            .assert()
            .success();

        assert!(fixture.ran());
    }
}
