//! Runner errors

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A required directory that was not found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDirectory {
    /// What the directory is for ("Policy directory", "Project directory")
    pub label: &'static str,
    pub path: PathBuf,
}

impl fmt::Display for MissingDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} not found: {}", self.label, self.path.display())
    }
}

/// Runner errors
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("{}", join_missing(.0))]
    MissingDirectories(Vec<MissingDirectory>),

    #[error("Pulumi CLI not found: '{program}' is not on PATH")]
    CliNotFound { program: String },

    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to determine runner locations: {0}")]
    Locations(#[source] io::Error),
}

impl RunnerError {
    /// Classify a spawn failure
    pub fn spawn(program: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            RunnerError::CliNotFound {
                program: program.to_string(),
            }
        } else {
            RunnerError::Spawn {
                program: program.to_string(),
                source,
            }
        }
    }
}

fn join_missing(missing: &[MissingDirectory]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
