//! Post-generation test run
//!
//! Runs the project's test command against the generated test file on a
//! tokio task. The outcome is returned as a [`VerificationReport`]; a failing
//! test is a report with `success == false`, not an error.

use crate::config::VerifySettings;
use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tokio::task::JoinHandle;

/// Outcome of one test run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    /// Command line that was executed
    pub command: String,
    /// Exit code, `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Whether the process exited successfully
    pub success: bool,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

/// Runs the configured test command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRunner {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl TestRunner {
    /// Create a runner for `program args... <test file>` in `working_dir`
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
        }
    }

    /// Build a runner from configuration
    ///
    /// Returns `None` when verification is disabled or no command is set.
    #[must_use]
    pub fn from_settings(settings: &VerifySettings, working_dir: &Path) -> Option<Self> {
        if !settings.enabled {
            return None;
        }
        let (program, args) = settings.command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec(), working_dir))
    }

    /// Full command line for a test file
    #[must_use]
    pub fn command_line(&self, test_file: &Path) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .chain(std::iter::once(test_file.display().to_string()))
            .collect()
    }

    /// Run the test command and wait for it
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TestRunner`] if the process cannot be started.
    pub async fn run(&self, test_file: &Path) -> Result<VerificationReport> {
        let command = self.command_line(test_file).join(" ");
        tracing::info!(%command, dir = %self.working_dir.display(), "running generated test");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(test_file)
            .current_dir(&self.working_dir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ScaffoldError::TestRunner {
                command: command.clone(),
                source,
            })?;

        let report = VerificationReport {
            command,
            exit_code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if report.success {
            tracing::info!(command = %report.command, "generated test passed");
        } else {
            tracing::warn!(
                command = %report.command,
                exit_code = ?report.exit_code,
                "generated test failed"
            );
        }

        Ok(report)
    }

    /// Run the test command on its own task
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(&self, test_file: impl Into<PathBuf>) -> JoinHandle<Result<VerificationReport>> {
        let runner = self.clone();
        let test_file = test_file.into();
        tokio::spawn(async move { runner.run(&test_file).await })
    }
}
