//! Pulumi command and invocation types
//!
//! Defines the stack operations the runner accepts and the values that flow
//! from argument resolution into process execution.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

/// Stack operation delegated to the Pulumi CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PulumiCommand {
    /// Show a preview of updates without applying them
    #[default]
    Preview,
    /// Create or update resources
    Up,
    /// Sync state with the real cloud resources
    Refresh,
    /// Delete all resources in the stack
    Destroy,
}

impl PulumiCommand {
    pub fn all() -> &'static [PulumiCommand] {
        &[
            PulumiCommand::Preview,
            PulumiCommand::Up,
            PulumiCommand::Refresh,
            PulumiCommand::Destroy,
        ]
    }

    /// Match a command-line token against the command literals
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all().iter().copied().find(|cmd| cmd.name() == token)
    }

    /// CLI subcommand name
    pub fn name(&self) -> &'static str {
        match self {
            PulumiCommand::Preview => "preview",
            PulumiCommand::Up => "up",
            PulumiCommand::Refresh => "refresh",
            PulumiCommand::Destroy => "destroy",
        }
    }

    /// Brief description
    pub fn description(&self) -> &'static str {
        match self {
            PulumiCommand::Preview => "Preview changes with policy checks (default)",
            PulumiCommand::Up => "Deploy changes with policy enforcement",
            PulumiCommand::Refresh => "Refresh stack state with policy checks",
            PulumiCommand::Destroy => "Destroy stack resources",
        }
    }
}

impl fmt::Display for PulumiCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Filesystem anchors used to compute defaults and absolute paths
#[derive(Debug, Clone)]
pub struct Locations {
    /// Current working directory of the runner
    pub cwd: PathBuf,
    /// Directory holding the runner executable
    pub install_dir: PathBuf,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Absolute path to the policy pack
    pub policy_dir: PathBuf,
    /// Absolute path to the Pulumi project
    pub project_dir: PathBuf,
    /// Target stack, if any
    pub stack: Option<OsString>,
    /// Stack operation to run
    pub command: PulumiCommand,
    /// Tokens forwarded verbatim to the CLI
    pub passthrough_args: Vec<OsString>,
}

/// Result of argument resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `--help` or `-h` was given
    Help,
    /// Run the delegated command
    Run(ResolvedConfig),
}

/// A fully built process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to spawn
    pub program: String,
    /// Arguments, starting with the subcommand
    pub args: Vec<OsString>,
    /// Working directory for the child
    pub cwd: PathBuf,
    /// Extra environment variables on top of the inherited environment
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// Get the display command string
    pub fn display(&self) -> String {
        let args: Vec<String> = self.args.iter().map(|arg| display_arg(arg)).collect();
        format!("(in {}) {} {}", self.cwd.display(), self.program, args.join(" "))
    }
}

/// Quote arguments that would otherwise read as several words
fn display_arg(arg: &OsStr) -> String {
    let text = arg.to_string_lossy();
    if text.is_empty() || text.chars().any(|c| c.is_whitespace() || c == '"') {
        format!("{:?}", text)
    } else {
        text.into_owned()
    }
}
