//! Argument and environment resolution
//!
//! Turns the runner's argv and environment into a [`ResolvedConfig`].
//! Precedence for every setting is flag, then environment variable, then
//! computed default. Resolution does not touch process-global state, so
//! callers pass the environment and filesystem anchors in explicitly.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

use super::types::{Locations, PulumiCommand, ResolvedConfig, Resolution};

/// Environment variable naming the policy pack directory
pub const ENV_POLICY_DIR: &str = "POLICY_DIR";
/// Environment variable naming the Pulumi project directory
pub const ENV_PROJECT_DIR: &str = "PULUMI_PROJECT_DIR";
/// Environment variable naming the target stack
pub const ENV_STACK: &str = "PULUMI_STACK";

/// Default policy pack directory name
pub const DEFAULT_POLICY_DIR: &str = "pulumiPolicy";
/// Default project directory name
pub const DEFAULT_PROJECT_DIR: &str = "pulumiTemplate";

const FLAG_POLICY_DIR: &str = "--policy-dir";
const FLAG_PROJECT_DIR: &str = "--project-dir";
const FLAG_STACK: &str = "--stack";

fn is_help_flag(token: &OsStr) -> bool {
    token == "--help" || token == "-h"
}

/// Resolve argv (without the program name) and environment into a config
///
/// Arguments and environment values stay as `OsString` so paths and
/// passthrough tokens that are not valid UTF-8 survive unchanged.
pub fn resolve(
    args: &[OsString],
    env: &HashMap<OsString, OsString>,
    locations: &Locations,
) -> Resolution {
    if args.iter().any(|arg| is_help_flag(arg)) {
        return Resolution::Help;
    }

    let mut policy_dir: Option<OsString> = None;
    let mut project_dir: Option<OsString> = None;
    let mut stack: Option<OsString> = None;
    let mut command = PulumiCommand::default();
    let mut passthrough_args = Vec::new();

    let mut tokens = args.iter();
    while let Some(token) = tokens.next() {
        match token.to_str() {
            Some(FLAG_POLICY_DIR) => {
                policy_dir = flag_value(FLAG_POLICY_DIR, tokens.next()).or(policy_dir);
            }
            Some(FLAG_PROJECT_DIR) => {
                project_dir = flag_value(FLAG_PROJECT_DIR, tokens.next()).or(project_dir);
            }
            Some(FLAG_STACK) => {
                stack = flag_value(FLAG_STACK, tokens.next()).or(stack);
            }
            other => match other.and_then(PulumiCommand::from_token) {
                Some(cmd) => {
                    command = cmd;
                    passthrough_args.extend(tokens.by_ref().cloned());
                    break;
                }
                None => passthrough_args.push(token.clone()),
            },
        }
    }

    let cwd = &locations.cwd;

    let policy_dir = policy_dir
        .or_else(|| env_value(env, ENV_POLICY_DIR))
        .map(PathBuf::from)
        .unwrap_or_else(|| default_policy_dir(locations));

    let project_dir = project_dir
        .or_else(|| env_value(env, ENV_PROJECT_DIR))
        .map(PathBuf::from)
        .unwrap_or_else(|| locations.install_dir.join(DEFAULT_PROJECT_DIR));

    let stack = stack.or_else(|| env_value(env, ENV_STACK));

    let config = ResolvedConfig {
        policy_dir: absolutize(cwd, &policy_dir),
        project_dir: absolutize(cwd, &project_dir),
        stack,
        command,
        passthrough_args,
    };

    log::debug!("Resolved configuration: {:?}", config);

    Resolution::Run(config)
}

/// Value following a wrapper flag; a dangling flag leaves the setting untouched
fn flag_value(flag: &str, value: Option<&OsString>) -> Option<OsString> {
    if value.is_none() {
        log::warn!("{} given without a value, ignoring it", flag);
    }
    value.cloned()
}

/// Environment lookup where an empty value counts as unset
fn env_value(env: &HashMap<OsString, OsString>, key: &str) -> Option<OsString> {
    env.get(OsStr::new(key)).filter(|v| !v.is_empty()).cloned()
}

/// `./pulumiPolicy` when present, otherwise the copy next to the executable
fn default_policy_dir(locations: &Locations) -> PathBuf {
    let local = locations.cwd.join(DEFAULT_POLICY_DIR);
    if local.is_dir() {
        local
    } else {
        locations.install_dir.join(DEFAULT_POLICY_DIR)
    }
}

/// Make `path` absolute against `base`, dropping `.` components
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _cwd: TempDir,
        _install: TempDir,
        locations: Locations,
    }

    impl Fixture {
        fn new() -> Self {
            let cwd = TempDir::new().unwrap();
            let install = TempDir::new().unwrap();
            let locations = Locations {
                cwd: cwd.path().to_path_buf(),
                install_dir: install.path().to_path_buf(),
            };
            Self {
                _cwd: cwd,
                _install: install,
                locations,
            }
        }
    }

    fn args(tokens: &[&str]) -> Vec<OsString> {
        tokens.iter().map(OsString::from).collect()
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<OsString, OsString> {
        pairs
            .iter()
            .map(|(k, v)| (OsString::from(k), OsString::from(v)))
            .collect()
    }

    fn resolve_run(
        tokens: &[&str],
        vars: &[(&str, &str)],
        locations: &Locations,
    ) -> ResolvedConfig {
        match resolve(&args(tokens), &env(vars), locations) {
            Resolution::Run(config) => config,
            Resolution::Help => panic!("expected a run resolution"),
        }
    }

    #[test]
    fn policy_dir_flag_overrides_environment() {
        let fx = Fixture::new();
        let config = resolve_run(
            &["--policy-dir", "/srv/policies", "up"],
            &[(ENV_POLICY_DIR, "/from/env")],
            &fx.locations,
        );
        assert_eq!(config.policy_dir, PathBuf::from("/srv/policies"));
        assert_eq!(config.command, PulumiCommand::Up);
    }

    #[test]
    fn relative_flag_is_made_absolute_against_cwd() {
        let fx = Fixture::new();
        let config = resolve_run(&["--policy-dir", "./policies/pack"], &[], &fx.locations);
        assert_eq!(config.policy_dir, fx.locations.cwd.join("policies").join("pack"));
        assert!(config.policy_dir.is_absolute());
    }

    #[test]
    fn local_policy_dir_is_preferred_when_present() {
        let fx = Fixture::new();
        fs::create_dir(fx.locations.cwd.join(DEFAULT_POLICY_DIR)).unwrap();

        let config = resolve_run(&[], &[], &fx.locations);
        assert_eq!(config.policy_dir, fx.locations.cwd.join(DEFAULT_POLICY_DIR));
    }

    #[test]
    fn policy_dir_falls_back_to_install_location() {
        let fx = Fixture::new();
        let config = resolve_run(&[], &[], &fx.locations);
        assert_eq!(
            config.policy_dir,
            fx.locations.install_dir.join(DEFAULT_POLICY_DIR)
        );
    }

    #[test]
    fn local_policy_file_is_not_a_directory() {
        let fx = Fixture::new();
        fs::write(fx.locations.cwd.join(DEFAULT_POLICY_DIR), "not a dir").unwrap();

        let config = resolve_run(&[], &[], &fx.locations);
        assert_eq!(
            config.policy_dir,
            fx.locations.install_dir.join(DEFAULT_POLICY_DIR)
        );
    }

    #[test]
    fn project_dir_defaults_to_install_location() {
        let fx = Fixture::new();
        let config = resolve_run(&[], &[], &fx.locations);
        assert_eq!(
            config.project_dir,
            fx.locations.install_dir.join(DEFAULT_PROJECT_DIR)
        );
        assert_eq!(config.command, PulumiCommand::Preview);
        assert_eq!(config.stack, None);
        assert!(config.passthrough_args.is_empty());
    }

    #[test]
    fn environment_fills_unset_fields() {
        let fx = Fixture::new();
        let config = resolve_run(
            &[],
            &[
                (ENV_POLICY_DIR, "/env/policy"),
                (ENV_PROJECT_DIR, "/env/project"),
                (ENV_STACK, "dev"),
            ],
            &fx.locations,
        );
        assert_eq!(config.policy_dir, PathBuf::from("/env/policy"));
        assert_eq!(config.project_dir, PathBuf::from("/env/project"));
        assert_eq!(config.stack.as_deref(), Some(OsStr::new("dev")));
    }

    #[test]
    fn flags_override_project_and_stack_environment() {
        let fx = Fixture::new();
        let config = resolve_run(
            &["--project-dir", "/flag/project", "--stack", "prod"],
            &[(ENV_PROJECT_DIR, "/env/project"), (ENV_STACK, "dev")],
            &fx.locations,
        );
        assert_eq!(config.project_dir, PathBuf::from("/flag/project"));
        assert_eq!(config.stack.as_deref(), Some(OsStr::new("prod")));
    }

    #[test]
    fn empty_environment_values_count_as_unset() {
        let fx = Fixture::new();
        let config = resolve_run(
            &[],
            &[(ENV_POLICY_DIR, ""), (ENV_STACK, "")],
            &fx.locations,
        );
        assert_eq!(
            config.policy_dir,
            fx.locations.install_dir.join(DEFAULT_POLICY_DIR)
        );
        assert_eq!(config.stack, None);
    }

    #[test]
    fn command_ends_scan_and_keeps_remaining_tokens() {
        let fx = Fixture::new();
        let config = resolve_run(&["up", "--diff"], &[], &fx.locations);
        assert_eq!(config.command, PulumiCommand::Up);
        assert_eq!(config.passthrough_args, args(&["--diff"]));
    }

    #[test]
    fn wrapper_flags_after_command_are_passed_through() {
        let fx = Fixture::new();
        let config = resolve_run(
            &["destroy", "--stack", "prod-explicit", "--policy-dir", "x"],
            &[],
            &fx.locations,
        );
        assert_eq!(config.command, PulumiCommand::Destroy);
        assert_eq!(config.stack, None);
        assert_eq!(
            config.passthrough_args,
            args(&["--stack", "prod-explicit", "--policy-dir", "x"])
        );
        assert_eq!(
            config.policy_dir,
            fx.locations.install_dir.join(DEFAULT_POLICY_DIR)
        );
    }

    #[test]
    fn unknown_tokens_before_command_are_kept_in_order() {
        let fx = Fixture::new();
        let config = resolve_run(
            &["--yes", "--stack", "dev", "-v=3", "refresh", "--skip-preview"],
            &[],
            &fx.locations,
        );
        assert_eq!(config.command, PulumiCommand::Refresh);
        assert_eq!(config.stack.as_deref(), Some(OsStr::new("dev")));
        assert_eq!(
            config.passthrough_args,
            args(&["--yes", "-v=3", "--skip-preview"])
        );
    }

    #[test]
    fn second_command_literal_is_a_passthrough_argument() {
        let fx = Fixture::new();
        let config = resolve_run(&["up", "preview"], &[], &fx.locations);
        assert_eq!(config.command, PulumiCommand::Up);
        assert_eq!(config.passthrough_args, args(&["preview"]));
    }

    #[test]
    fn dangling_flag_falls_back_to_environment() {
        let fx = Fixture::new();
        let config = resolve_run(&["--stack"], &[(ENV_STACK, "dev")], &fx.locations);
        assert_eq!(config.stack.as_deref(), Some(OsStr::new("dev")));
        assert!(config.passthrough_args.is_empty());
    }

    #[test]
    fn help_anywhere_short_circuits() {
        let fx = Fixture::new();
        for tokens in [
            vec!["--help"],
            vec!["-h"],
            vec!["up", "--yes", "--help"],
            vec!["--policy-dir", "/missing", "-h", "destroy"],
        ] {
            assert_eq!(
                resolve(&args(&tokens), &HashMap::new(), &fx.locations),
                Resolution::Help
            );
        }
    }

    #[test]
    fn absolutize_keeps_absolute_paths() {
        let base = Path::new("/work");
        assert_eq!(
            absolutize(base, Path::new("/etc/./policies")),
            PathBuf::from("/etc/policies")
        );
        assert_eq!(
            absolutize(base, Path::new("./infra")),
            PathBuf::from("/work/infra")
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_values_are_kept_verbatim() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let fx = Fixture::new();
        let policy = fx.locations.cwd.join(OsStr::from_bytes(b"pol\xffcy"));
        let stack = OsString::from_vec(b"st\xfeck".to_vec());
        let extra = OsString::from_vec(b"--message=caf\xe9".to_vec());

        let mut env = HashMap::new();
        env.insert(OsString::from(ENV_POLICY_DIR), policy.clone().into_os_string());
        env.insert(OsString::from(ENV_STACK), stack.clone());

        let argv = vec![OsString::from("up"), extra.clone()];
        let config = match resolve(&argv, &env, &fx.locations) {
            Resolution::Run(config) => config,
            Resolution::Help => panic!("expected a run resolution"),
        };

        assert_eq!(config.policy_dir, policy);
        assert_eq!(config.stack, Some(stack));
        assert_eq!(config.passthrough_args, vec![extra]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_flag_value_is_used_as_path() {
        use std::os::unix::ffi::OsStrExt;

        let fx = Fixture::new();
        let project = OsStr::from_bytes(b"/srv/pro\xffject").to_os_string();
        let argv = vec![OsString::from("--project-dir"), project.clone()];

        match resolve(&argv, &HashMap::new(), &fx.locations) {
            Resolution::Run(config) => assert_eq!(config.project_dir, PathBuf::from(project)),
            Resolution::Help => panic!("expected a run resolution"),
        }
    }
}
