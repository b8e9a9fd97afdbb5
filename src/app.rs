//! Application entry flow
//!
//! Gathers argv, environment and filesystem locations, resolves them and
//! either prints usage or runs the Pulumi CLI.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use crate::commands::{resolve, Locations, ProcessSpawner, Resolution, Runner, TokioSpawner};
use crate::config::Config;
use crate::error::RunnerError;
use crate::usage;

/// Run the application against the real process and return the exit code
pub async fn run() -> Result<i32> {
    let args: Vec<OsString> = env::args_os().skip(1).collect();
    let env: HashMap<OsString, OsString> = env::vars_os().collect();

    run_with(&args, &env, current_locations(), TokioSpawner, Config::load()).await
}

/// Resolve the given inputs and either print usage or run the CLI
pub async fn run_with<S: ProcessSpawner>(
    args: &[OsString],
    env: &HashMap<OsString, OsString>,
    locations: io::Result<Locations>,
    spawner: S,
    settings: Config,
) -> Result<i32> {
    let locations = locations
        .map_err(RunnerError::Locations)
        .wrap_err("Failed to resolve configuration")?;

    match resolve(args, env, &locations) {
        Resolution::Help => {
            usage::print_usage();
            Ok(0)
        }
        Resolution::Run(config) => {
            let runner = Runner::new(spawner, settings);
            Ok(runner.run(&config).await)
        }
    }
}

fn current_locations() -> io::Result<Locations> {
    let cwd = env::current_dir()?;
    let exe = env::current_exe()?;
    let install_dir = exe
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd.clone());

    Ok(Locations { cwd, install_dir })
}
