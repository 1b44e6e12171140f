//! Driving the Nushell interpreter
//!
//! Every invocation loads the project's make.nu as the env config, so the
//! commands it defines are in scope.

use crate::error::{NumakeError, NumakeResult};
use crate::log::Logger;
use crate::project::Project;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Lists the custom commands of make.nu with the first line of their usage
const LIST_COMMANDS_SCRIPT: &str = r#"
help commands
| where command_type == "custom"
| each {|row|
    let usage = ($row.usage | lines | get -i 0 | default "")
    if $usage == "" {
        $"    ($row.name)"
    } else {
        $"    ($row.name)(ansi dark_gray) # ($usage)(ansi reset)"
    }
}
| str join "\n"
"#;

/// A Nushell executable
pub struct Nushell<'a> {
    bin: PathBuf,
    logger: &'a Logger,
}

impl<'a> Nushell<'a> {
    pub fn new(bin: impl Into<PathBuf>, logger: &'a Logger) -> Self {
        Self {
            bin: bin.into(),
            logger,
        }
    }

    /// Version reported by `nu --version`
    pub async fn version(&self) -> NumakeResult<String> {
        let label = format!("{} --version", self.bin.display());
        self.logger.debug(format_args!("Executing: {}", label));

        let output = Command::new(&self.bin)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| NumakeError::command_failed(&label, e))?;

        if !output.status.success() {
            return Err(NumakeError::command_exec(
                label,
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run `command` against make.nu with inherited stdio
    pub async fn run(&self, project: &Project, command: &str) -> NumakeResult<()> {
        self.logger.info(format_args!("running command: {}", command));

        let status = self
            .project_command(project)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| NumakeError::command_failed(command, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(NumakeError::CommandExit {
                command: command.to_string(),
                code: status.code().unwrap_or(-1),
            })
        }
    }

    /// Formatted listing of the commands defined in make.nu
    pub async fn list(&self, project: &Project) -> NumakeResult<String> {
        self.logger.debug("listing make.nu commands");

        let output = self
            .project_command(project)
            .arg("-c")
            .arg(LIST_COMMANDS_SCRIPT)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| NumakeError::command_failed("help commands", e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() || !stderr.trim().is_empty() {
            return Err(NumakeError::command_exec("help commands", stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Start an interactive shell with make.nu loaded and a project prompt
    pub async fn interactive(&self, project: &Project) -> NumakeResult<()> {
        let temp_dir = tempfile::Builder::new()
            .prefix("numake")
            .tempdir()
            .map_err(|e| NumakeError::io("creating temporary directory", e))?;
        let env_path = temp_dir.path().join("env.nu");

        let makefile = tokio::fs::read_to_string(&project.makefile)
            .await
            .map_err(|e| {
                NumakeError::io(format!("reading {}", project.makefile.display()), e)
            })?;
        let env = interactive_env(project, &makefile);
        tokio::fs::write(&env_path, env)
            .await
            .map_err(|e| NumakeError::io(format!("writing {}", env_path.display()), e))?;

        self.logger
            .info(format_args!("starting interactive shell in {}", project.root.display()));

        let status = Command::new(&self.bin)
            .arg("--env-config")
            .arg(&env_path)
            .current_dir(&project.root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| NumakeError::command_failed("nu (interactive)", e))?;

        temp_dir
            .close()
            .map_err(|e| NumakeError::io("removing temporary directory", e))?;

        if status.success() {
            Ok(())
        } else {
            Err(NumakeError::CommandExit {
                command: "nu (interactive)".to_string(),
                code: status.code().unwrap_or(-1),
            })
        }
    }

    fn project_command(&self, project: &Project) -> Command {
        self.logger.debug(format_args!(
            "Executing: {} --env-config {}",
            self.bin.display(),
            project.makefile.display()
        ));

        let mut cmd = Command::new(&self.bin);
        cmd.arg("--env-config")
            .arg(&project.makefile)
            .current_dir(&project.root);
        cmd
    }
}

/// Env config for interactive sessions: prompt setup followed by make.nu
fn interactive_env(project: &Project, makefile: &str) -> String {
    let mut env = String::new();
    let _ = write!(
        env,
        r##"$env.PROMPT_COMMAND_RIGHT = {{|| "" }}
$env.PROMPT_COMMAND = {{||
    let relative = (try {{ $env.PWD | path relative-to r#'{root}'# }} catch {{ $env.PWD }})
    let location = ([r#'{name}'# $relative] | where {{|it| $it != "" }} | str join "/")
    $"(ansi green)\(numake\)(ansi reset) (ansi blue)($location)(ansi reset) "
}}

"##,
        root = project.root.display(),
        name = project.name(),
    );
    env.push_str(makefile);
    env
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            root: PathBuf::from("/work/site"),
            makefile: PathBuf::from("/work/site/make.nu"),
        }
    }

    #[test]
    fn interactive_env_prepends_prompt() {
        let env = interactive_env(&project(), "def build [] { cargo build }\n");

        assert!(env.starts_with("$env.PROMPT_COMMAND_RIGHT"));
        assert!(env.contains("path relative-to r#'/work/site'#"));
        assert!(env.contains("r#'site'#"));
        assert!(env.ends_with("def build [] { cargo build }\n"));
    }

    #[test]
    fn list_script_filters_custom_commands() {
        assert!(LIST_COMMANDS_SCRIPT.contains(r#"where command_type == "custom""#));
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::Path;
        use tempfile::TempDir;

        /// Shell script standing in for nu
        fn fake_nu(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("nu");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn temp_project(dir: &Path) -> Project {
            let root = dir.join("project");
            std::fs::create_dir_all(&root).unwrap();
            std::fs::write(root.join("make.nu"), "def build [] {}\n").unwrap();
            Project::find(&root).unwrap()
        }

        #[tokio::test]
        async fn version_is_trimmed_stdout() {
            let temp = TempDir::new().unwrap();
            let logger = Logger::silent();
            let nu = Nushell::new(fake_nu(temp.path(), "echo '  0.94.2  '"), &logger);

            assert_eq!(nu.version().await.unwrap(), "0.94.2");
        }

        #[tokio::test]
        async fn failing_version_carries_stderr() {
            let temp = TempDir::new().unwrap();
            let logger = Logger::silent();
            let nu = Nushell::new(fake_nu(temp.path(), "echo broken >&2; exit 3"), &logger);

            match nu.version().await.unwrap_err() {
                NumakeError::CommandExecution { stderr, .. } => assert_eq!(stderr, "broken"),
                other => panic!("expected CommandExecution, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn run_reports_exit_code() {
            let temp = TempDir::new().unwrap();
            let logger = Logger::silent();
            let project = temp_project(temp.path());
            let nu = Nushell::new(fake_nu(temp.path(), "exit 4"), &logger);

            match nu.run(&project, "build").await.unwrap_err() {
                NumakeError::CommandExit { command, code } => {
                    assert_eq!(command, "build");
                    assert_eq!(code, 4);
                }
                other => panic!("expected CommandExit, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn run_passes_makefile_and_command() {
            let temp = TempDir::new().unwrap();
            let logger = Logger::silent();
            let project = temp_project(temp.path());
            let record = temp.path().join("args");
            let nu = Nushell::new(
                fake_nu(temp.path(), &format!("echo \"$@\" > '{}'", record.display())),
                &logger,
            );

            nu.run(&project, "build --release").await.unwrap();

            let args = std::fs::read_to_string(&record).unwrap();
            assert_eq!(
                args.trim(),
                format!("--env-config {} -c build --release", project.makefile.display())
            );
        }

        #[tokio::test]
        async fn list_returns_stdout() {
            let temp = TempDir::new().unwrap();
            let logger = Logger::silent();
            let project = temp_project(temp.path());
            let nu = Nushell::new(fake_nu(temp.path(), "echo '    build'"), &logger);

            assert_eq!(nu.list(&project).await.unwrap(), "    build\n");
        }

        #[tokio::test]
        async fn list_fails_on_stderr_output() {
            let temp = TempDir::new().unwrap();
            let logger = Logger::silent();
            let project = temp_project(temp.path());
            let nu = Nushell::new(fake_nu(temp.path(), "echo 'parse error' >&2"), &logger);

            assert!(matches!(
                nu.list(&project).await.unwrap_err(),
                NumakeError::CommandExecution { .. }
            ));
        }
    }
}
