//! Command executor for running the Pulumi CLI
//!
//! Builds the final argument list and runs the CLI as a child process with
//! the runner's stdio attached, so prompts and colored output pass through
//! untouched. Spawning goes through [`ProcessSpawner`] so the argument
//! handling can be exercised without a real `pulumi` binary.

use std::ffi::OsString;
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

use super::types::{Invocation, ResolvedConfig};
use crate::config::Config;
use crate::error::RunnerError;
use crate::startup::PreflightChecks;
use crate::ui;

const FLAG_STACK: &str = "--stack";
const FLAG_POLICY_PACK: &str = "--policy-pack";

/// Exit code used for failures of the runner itself
pub const EXIT_FAILURE: i32 = 1;

/// Spawns a process and waits for its exit code
pub trait ProcessSpawner {
    async fn spawn(&self, invocation: &Invocation) -> io::Result<i32>;
}

/// Spawner backed by `tokio::process` with inherited stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSpawner;

impl ProcessSpawner for TokioSpawner {
    async fn spawn(&self, invocation: &Invocation) -> io::Result<i32> {
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        // The terminal delivers Ctrl+C to the child as well; keep waiting so
        // its exit status still comes back to us.
        loop {
            tokio::select! {
                status = child.wait() => return Ok(exit_code(status?)),
                signal = tokio::signal::ctrl_c() => match signal {
                    Ok(()) => {
                        log::warn!("Interrupt received, waiting for {} to exit", invocation.program);
                        ui::print_warning("Interrupt received, waiting for pulumi to finish");
                    }
                    Err(e) => {
                        log::warn!("Cannot listen for interrupts: {}", e);
                        return Ok(exit_code(child.wait().await?));
                    }
                },
            }
        }
    }
}

/// Map a child's exit status to the code we exit with
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    EXIT_FAILURE
}

/// Build the Pulumi CLI invocation for a resolved configuration
pub fn build_invocation(config: &ResolvedConfig, settings: &Config) -> Invocation {
    let mut args = vec![OsString::from(config.command.name())];

    if let Some(stack) = &config.stack {
        // An explicit --stack further down wins over the resolved one
        if !config
            .passthrough_args
            .iter()
            .any(|arg| arg.as_os_str() == FLAG_STACK)
        {
            args.push(OsString::from(FLAG_STACK));
            args.push(stack.clone());
        }
    }

    args.extend(config.passthrough_args.iter().cloned());

    args.push(OsString::from(FLAG_POLICY_PACK));
    args.push(config.policy_dir.clone().into_os_string());

    let mut env = Vec::new();
    if settings.skip_update_check {
        env.push(("PULUMI_SKIP_UPDATE_CHECK".to_string(), "true".to_string()));
    }

    Invocation {
        program: settings.pulumi_binary.clone(),
        args,
        cwd: config.project_dir.clone(),
        env,
    }
}

/// Final result of a delegated command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The CLI exited with status 0
    Succeeded,
    /// The CLI exited with a nonzero status
    Failed { exit_code: i32 },
}

impl Outcome {
    pub fn from_exit_code(exit_code: i32) -> Self {
        if exit_code == 0 {
            Outcome::Succeeded
        } else {
            Outcome::Failed { exit_code }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Succeeded => 0,
            Outcome::Failed { exit_code } => *exit_code,
        }
    }

    /// Human-readable status line
    pub fn summary(&self) -> String {
        match self {
            Outcome::Succeeded => "Pulumi command completed successfully".to_string(),
            Outcome::Failed { exit_code } => {
                format!("Pulumi command failed with exit code {}", exit_code)
            }
        }
    }
}

/// Runs resolved configurations through a spawner
pub struct Runner<S> {
    spawner: S,
    settings: Config,
}

impl<S: ProcessSpawner> Runner<S> {
    pub fn new(spawner: S, settings: Config) -> Self {
        Self { spawner, settings }
    }

    /// Run the command and return the exit code for the runner process
    pub async fn run(&self, config: &ResolvedConfig) -> i32 {
        match self.execute(config).await {
            Ok(outcome) => {
                ui::print_outcome(&outcome);
                outcome.exit_code()
            }
            Err(err) => {
                log::error!("{}", err);
                ui::print_error(&err.to_string());
                EXIT_FAILURE
            }
        }
    }

    /// Check directories, then spawn the CLI and wait for it
    pub async fn execute(&self, config: &ResolvedConfig) -> Result<Outcome, RunnerError> {
        let checks = PreflightChecks::run(config);
        for check in checks.checks() {
            log::debug!("{}: {}", check.name, check.status.message());
        }
        checks.into_result()?;

        let invocation = build_invocation(config, &self.settings);

        ui::print_banner(config);
        log::info!("Executing: {}", invocation.display());

        let exit_code = self
            .spawner
            .spawn(&invocation)
            .await
            .map_err(|e| RunnerError::spawn(&invocation.program, e))?;

        log::info!("Command completed with exit code: {}", exit_code);
        Ok(Outcome::from_exit_code(exit_code))
    }
}
