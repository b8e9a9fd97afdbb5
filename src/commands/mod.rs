//! Pulumi CLI commands module
//!
//! Resolves the runner's arguments into a command for the Pulumi CLI and
//! handles its execution with the policy pack attached.

mod executor;
mod resolver;
mod types;

pub use executor::*;
pub use resolver::*;
pub use types::*;
