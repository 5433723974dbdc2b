//! Use Case Factory
//!
//! Creates the activate use case with infrastructure wired up and turns
//! CLI flags plus configuration into [`ActivateOptions`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::application::{ActivateOptions, ActivateUseCase, MIN_POLL_INTERVAL};
use crate::config::Config;
use crate::domain::ports::ActivateEventSink;
use crate::domain::value_objects::{DomainTarget, ServiceDirectory};
use crate::error::{ActivateError, ActivateResult};
use crate::infrastructure::fs::home_dir;
use crate::infrastructure::session::current_gui_domain;
use crate::infrastructure::{Launchctl, LocalFs, SystemClock};

use super::cli::{Cli, Scope};

/// The activate use case against the real system
pub type ConcreteActivateUseCase = ActivateUseCase<LocalFs, Launchctl, SystemClock>;

pub fn create_activate_use_case(events: Arc<dyn ActivateEventSink>) -> ConcreteActivateUseCase {
    ActivateUseCase::new(LocalFs::new(), Launchctl::new(), SystemClock).with_events(events)
}

/// Domain and service directory for `scope`.
///
/// `gui_domain` is only called for the per-user scopes.
pub fn resolve_scope(
    scope: Scope,
    home: Option<PathBuf>,
    gui_domain: impl FnOnce() -> DomainTarget,
) -> ActivateResult<(DomainTarget, ServiceDirectory)> {
    match scope {
        Scope::System => Ok((DomainTarget::System, ServiceDirectory::System)),
        Scope::UserAll => Ok((gui_domain(), ServiceDirectory::AllUsers)),
        Scope::User => {
            let home = home.ok_or(ActivateError::NoHomeDirectory)?;
            Ok((gui_domain(), ServiceDirectory::User(home)))
        }
    }
}

/// Existing directory, with symlinks resolved
pub fn canonical_dir(path: &Path) -> ActivateResult<PathBuf> {
    path.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ActivateError::PathNotFound {
            path: path.to_path_buf(),
        },
        _ => ActivateError::Io(e),
    })
}

/// Options for this invocation: CLI flags over config over defaults
pub fn activate_options(cli: &Cli, config: &Config) -> ActivateResult<ActivateOptions> {
    let new_source = canonical_dir(&cli.new)?;
    let old_source = cli.old.as_deref().map(canonical_dir).transpose()?;
    let (domain, directory) = resolve_scope(cli.scope(), home_dir(), current_gui_domain)?;

    if config.poll_interval() < MIN_POLL_INTERVAL {
        log::warn!(
            "poll_interval_ms = {} is below the minimum, using {}ms",
            config.activate.poll_interval_ms,
            MIN_POLL_INTERVAL.as_millis()
        );
    }

    let mut options = ActivateOptions::new(domain, directory, new_source)
        .with_old_source(old_source)
        .with_dry_run(cli.dry_run)
        .with_timeout(cli.timeout.map(Duration::from_secs).unwrap_or(config.timeout()))
        .with_poll_interval(config.poll_interval());

    let bootstrap_timeout = cli
        .bootstrap_timeout
        .or(config.activate.bootstrap_timeout)
        .or(cli.timeout)
        .map(Duration::from_secs)
        .unwrap_or(config.bootstrap_timeout());
    options = options.with_bootstrap_timeout(bootstrap_timeout);

    if let Some(method) = cli.install_method().or(config.activate.install_method) {
        options = options.with_install_method(method);
    }

    log::debug!(
        "activating {} into {} ({}, timeouts {}s/{}s)",
        options.new_source.display(),
        options.directory,
        options.install_method,
        options.bootout_timeout.as_secs(),
        options.bootstrap_timeout.as_secs()
    );
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::InstallMethod;
    use clap::Parser;
    use tempfile::tempdir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("launchd-activate").chain(args.iter().copied()))
    }

    #[test]
    fn system_scope_ignores_home_and_session() {
        let (domain, directory) =
            resolve_scope(Scope::System, None, || unreachable!("no session lookup")).unwrap();
        assert_eq!(domain, DomainTarget::System);
        assert_eq!(directory, ServiceDirectory::System);
    }

    #[test]
    fn user_scope_needs_home() {
        let err = resolve_scope(Scope::User, None, || DomainTarget::Gui(501)).unwrap_err();
        assert!(matches!(err, ActivateError::NoHomeDirectory));

        let (domain, directory) = resolve_scope(
            Scope::User,
            Some(PathBuf::from("/Users/me")),
            || DomainTarget::Gui(501),
        )
        .unwrap();
        assert_eq!(domain, DomainTarget::Gui(501));
        assert_eq!(directory, ServiceDirectory::User(PathBuf::from("/Users/me")));
    }

    #[test]
    fn user_all_scope_uses_console_domain() {
        let (domain, directory) =
            resolve_scope(Scope::UserAll, None, || DomainTarget::Gui(502)).unwrap();
        assert_eq!(domain, DomainTarget::Gui(502));
        assert_eq!(directory, ServiceDirectory::AllUsers);
    }

    #[test]
    fn missing_directory_is_path_not_found() {
        let dir = tempdir().unwrap();
        let err = canonical_dir(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ActivateError::PathNotFound { .. }));
    }

    #[test]
    fn options_follow_precedence() {
        let dir = tempdir().unwrap();
        let new = dir.path().to_str().unwrap();
        let mut config = Config::default();
        config.activate.install_method = Some(InstallMethod::Copy);
        config.activate.timeout = 10;
        config.activate.bootstrap_timeout = Some(20);

        let from_config = activate_options(&cli(&["--system", new]), &config).unwrap();
        assert_eq!(from_config.install_method, InstallMethod::Copy);
        assert_eq!(from_config.bootout_timeout, Duration::from_secs(10));
        assert_eq!(from_config.bootstrap_timeout, Duration::from_secs(20));
        assert_eq!(from_config.new_source, dir.path().canonicalize().unwrap());

        let from_cli = activate_options(
            &cli(&["--system", "--symlink", "--timeout", "3", "--bootstrap-timeout", "4", new]),
            &config,
        )
        .unwrap();
        assert_eq!(from_cli.install_method, InstallMethod::Symlink);
        assert_eq!(from_cli.bootout_timeout, Duration::from_secs(3));
        assert_eq!(from_cli.bootstrap_timeout, Duration::from_secs(4));
    }

    #[test]
    fn config_bootstrap_timeout_wins_over_cli_timeout() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.activate.bootstrap_timeout = Some(20);

        let options = activate_options(
            &cli(&["--system", "--timeout", "3", dir.path().to_str().unwrap()]),
            &config,
        )
        .unwrap();

        assert_eq!(options.bootout_timeout, Duration::from_secs(3));
        assert_eq!(options.bootstrap_timeout, Duration::from_secs(20));
    }

    #[test]
    fn cli_timeout_covers_start_without_bootstrap_timeout() {
        let dir = tempdir().unwrap();
        let options = activate_options(
            &cli(&["--system", "--timeout", "3", dir.path().to_str().unwrap()]),
            &Config::default(),
        )
        .unwrap();

        assert_eq!(options.bootstrap_timeout, Duration::from_secs(3));
    }

    #[test]
    fn zero_poll_interval_is_raised() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.activate.poll_interval_ms = 0;

        let options =
            activate_options(&cli(&["--system", dir.path().to_str().unwrap()]), &config).unwrap();

        assert_eq!(options.poll_interval, MIN_POLL_INTERVAL);
    }

    #[test]
    fn scope_default_method_applies_without_overrides() {
        let dir = tempdir().unwrap();
        let options = activate_options(
            &cli(&["--system", dir.path().to_str().unwrap()]),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(options.install_method, InstallMethod::Copy);
        assert_eq!(options.bootstrap_timeout, Duration::from_secs(30));
    }
}
