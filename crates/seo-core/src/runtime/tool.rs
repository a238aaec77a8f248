//! Running external tools (pip, git, flask) on behalf of the user
//!
//! Output is either streamed line by line, indented under the current
//! step, or handed straight to the terminal for interactive commands.

use crate::error::ScaffoldError;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Grace period for a child to exit once its output is closed
const EXIT_GRACE: Duration = Duration::from_secs(5);

/// An external program invocation
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    envs: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            envs: Vec::new(),
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Kill the child if its output has not closed within `limit`
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Shell-like rendering for messages. Environment values are not shown.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn build(&self) -> TokioCommand {
        let mut cmd = TokioCommand::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    fn failure(&self, message: impl Into<String>) -> ScaffoldError {
        ScaffoldError::ExternalTool {
            tool: self.display(),
            message: message.into(),
        }
    }

    fn check_status(&self, status: ExitStatus) -> Result<(), ScaffoldError> {
        if status.success() {
            Ok(())
        } else {
            Err(self.failure(format!(
                "exited with code {}",
                status.code().unwrap_or(-1)
            )))
        }
    }

    /// Run with stdout and stderr streamed, indented, to the terminal
    pub async fn run_streaming(&self) -> Result<(), ScaffoldError> {
        tracing::info!(command = %self.display(), "running external tool");
        println!();
        println!("{} {}", "Running:".dimmed(), self.display().yellow());
        println!();

        let mut child = self
            .build()
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(format!("could not start: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| self.failure("stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| self.failure("stderr was not captured"))?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        let output_task = async {
            let mut stdout_open = true;
            let mut stderr_open = true;
            while stdout_open || stderr_open {
                tokio::select! {
                    line = stdout_reader.next_line(), if stdout_open => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line),
                            Ok(None) => stdout_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                stdout_open = false;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if stderr_open => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_open = false;
                            }
                        }
                    }
                }
            }
        };

        if let Some(limit) = self.timeout {
            if timeout(limit, output_task).await.is_err() {
                let _ = child.kill().await;
                println!();
                return Err(self.failure(format!("timed out after {} seconds", limit.as_secs())));
            }
        } else {
            output_task.await;
        }

        match timeout(EXIT_GRACE, child.wait()).await {
            Ok(Ok(status)) => {
                println!();
                self.check_status(status)
            }
            Ok(Err(e)) => Err(self.failure(format!("could not wait for process: {}", e))),
            Err(_) => {
                let _ = child.kill().await;
                Err(self.failure("process hung after closing its output"))
            }
        }
    }

    /// Run attached to the terminal (interactive or long-running commands)
    pub async fn run_attached(&self) -> Result<(), ScaffoldError> {
        tracing::info!(command = %self.display(), "running external tool attached");
        let status = self
            .build()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.failure(format!("could not start: {}", e)))?;
        self.check_status(status)
    }
}
