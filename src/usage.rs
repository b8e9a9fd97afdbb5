//! Usage text for `--help`

use std::fmt::Write;

use crate::commands::{
    PulumiCommand, DEFAULT_POLICY_DIR, DEFAULT_PROJECT_DIR, ENV_POLICY_DIR, ENV_PROJECT_DIR,
    ENV_STACK,
};
use crate::theme::Theme;

/// Application version - uses the build-injected version if available, otherwise Cargo.toml's
pub const VERSION: &str = match option_env!("APP_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

const BIN_NAME: &str = "pulumi-policy-runner";

/// Render the usage text
pub fn render_usage(theme: &Theme) -> String {
    let sections: Vec<(&str, Vec<(String, String)>)> = vec![
        (
            "Options",
            vec![
                (
                    "--policy-dir <dir>".to_string(),
                    format!("Policy pack directory (default: ./{DEFAULT_POLICY_DIR})"),
                ),
                (
                    "--project-dir <dir>".to_string(),
                    format!("Pulumi project directory (default: {DEFAULT_PROJECT_DIR})"),
                ),
                ("--stack <name>".to_string(), "Stack to operate on".to_string()),
                ("-h, --help".to_string(), "Show this help".to_string()),
            ],
        ),
        (
            "Commands",
            PulumiCommand::all()
                .iter()
                .map(|cmd| (cmd.name().to_string(), cmd.description().to_string()))
                .collect(),
        ),
        (
            "Environment",
            vec![
                (ENV_POLICY_DIR.to_string(), "Policy pack directory".to_string()),
                (ENV_PROJECT_DIR.to_string(), "Pulumi project directory".to_string()),
                (ENV_STACK.to_string(), "Stack to operate on".to_string()),
            ],
        ),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", theme.title(BIN_NAME), theme.text_muted(VERSION));
    let _ = writeln!(
        out,
        "Run Pulumi with a policy pack enforced.\n\n{} {} [options] [command] [pulumi args...]",
        theme.title("Usage:"),
        BIN_NAME
    );

    for (section_title, entries) in sections {
        let _ = writeln!(out, "\n{}", theme.title(section_title));
        for (key, desc) in entries {
            let _ = writeln!(out, "  {}{}", theme.key_hint(format!("{:22}", key)), desc);
        }
    }

    let _ = writeln!(
        out,
        "\nFlags take precedence over environment variables. Arguments the runner\n\
         does not recognise are passed to pulumi unchanged."
    );

    out
}

/// Print the usage text to stdout
pub fn print_usage() {
    print!("{}", render_usage(&Theme::for_stdout()));
}
