//! Pulumi Policy Runner - run Pulumi stack operations with a policy pack
//!
//! Resolves the policy pack, project directory and stack from flags and
//! environment variables, then hands off to the `pulumi` CLI with
//! `--policy-pack` attached.

mod app;
mod commands;
mod config;
mod error;
mod logging;
mod startup;
mod theme;
mod ui;
mod usage;

use color_eyre::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    logging::init_logging()?;

    let code = match app::run().await {
        Ok(code) => code,
        Err(err) => {
            log::error!("{:#}", err);
            ui::print_error(&format!("{:#}", err));
            1
        }
    };

    std::process::exit(code);
}
