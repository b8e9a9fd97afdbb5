//! Operator-facing output
//!
//! Status lines go to stdout next to the Pulumi CLI output; errors go to stderr.

use crate::commands::{Outcome, ResolvedConfig};
use crate::theme::Theme;

/// Print what is about to run
pub fn print_banner(config: &ResolvedConfig) {
    let theme = Theme::for_stdout();

    println!(
        "{} {}",
        theme.title("Running pulumi"),
        theme.command(config.command)
    );
    if let Some(stack) = &config.stack {
        println!(
            "  {}{}",
            theme.text_muted(label("Stack")),
            theme.info(stack.to_string_lossy())
        );
    }
    println!(
        "  {}{}",
        theme.text_muted(label("Policy pack")),
        theme.info(config.policy_dir.display())
    );
    println!(
        "  {}{}",
        theme.text_muted(label("Project")),
        theme.info(config.project_dir.display())
    );
    println!();
}

fn label(name: &str) -> String {
    format!("{:14}", name)
}

/// Print the final status line
pub fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Succeeded => {
            let theme = Theme::for_stdout();
            println!("\n{} {}", theme.success("✓"), theme.success(outcome.summary()))
        }
        Outcome::Failed { .. } => {
            let theme = Theme::for_stderr();
            eprintln!("\n{} {}", theme.error("✗"), theme.error(outcome.summary()))
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    let theme = Theme::for_stderr();
    eprintln!("{} {}", theme.error("Error:"), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    let theme = Theme::for_stderr();
    eprintln!("{} {}", theme.warning("Warning:"), message);
}
