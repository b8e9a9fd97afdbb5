//! Preflight checks module
//!
//! Performs validation checks before the Pulumi CLI is launched:
//! - Policy pack directory exists
//! - Project directory exists
//!
//! Both checks always run so every missing path is reported at once.

use std::path::{Path, PathBuf};

use crate::commands::ResolvedConfig;
use crate::error::{MissingDirectory, RunnerError};

/// Status of a preflight check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully
    Passed(String),
    /// Check failed with an error message
    Failed(String),
}

impl CheckStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }

    pub fn message(&self) -> &str {
        match self {
            CheckStatus::Passed(msg) | CheckStatus::Failed(msg) => msg,
        }
    }
}

/// Directory check item
#[derive(Debug, Clone)]
pub struct DirectoryCheck {
    pub name: &'static str,
    pub path: PathBuf,
    pub status: CheckStatus,
}

impl DirectoryCheck {
    /// Run the check against the filesystem
    pub fn run(name: &'static str, path: &Path) -> Self {
        Self {
            name,
            path: path.to_path_buf(),
            status: check_directory(path),
        }
    }
}

/// All preflight checks
#[derive(Debug, Clone)]
pub struct PreflightChecks {
    pub policy_check: DirectoryCheck,
    pub project_check: DirectoryCheck,
}

impl PreflightChecks {
    /// Run every check for a resolved configuration
    pub fn run(config: &ResolvedConfig) -> Self {
        Self {
            policy_check: DirectoryCheck::run("Policy directory", &config.policy_dir),
            project_check: DirectoryCheck::run("Project directory", &config.project_dir),
        }
    }

    /// Checks in reporting order
    pub fn checks(&self) -> [&DirectoryCheck; 2] {
        [&self.policy_check, &self.project_check]
    }

    /// Turn failed checks into an error, policy first
    pub fn into_result(self) -> Result<(), RunnerError> {
        let missing: Vec<MissingDirectory> = self
            .checks()
            .iter()
            .filter(|c| c.status.is_failed())
            .map(|c| MissingDirectory {
                label: c.name,
                path: c.path.clone(),
            })
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RunnerError::MissingDirectories(missing))
        }
    }
}

/// Check that a path exists and is a directory
pub fn check_directory(path: &Path) -> CheckStatus {
    if path.is_dir() {
        CheckStatus::Passed(format!("Found: {}", path.display()))
    } else if path.exists() {
        CheckStatus::Failed(format!("Not a directory: {}", path.display()))
    } else {
        CheckStatus::Failed(format!("Not found: {}", path.display()))
    }
}
