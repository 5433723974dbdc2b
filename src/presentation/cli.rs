//! CLI Argument Parsing
//!
//! `launchd-activate [SCOPE] [METHOD] [OPTIONS] NEW [OLD]`
//!
//! Scope flags pick the domain and service directory; method flags
//! override the scope's default install method.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::config::ColorMode;
use crate::domain::value_objects::InstallMethod;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorMode {
    fn from(when: ColorWhen) -> Self {
        match when {
            ColorWhen::Auto => ColorMode::Auto,
            ColorWhen::Always => ColorMode::Always,
            ColorWhen::Never => ColorMode::Never,
        }
    }
}

/// Which services are being activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// System daemons in the system domain
    System,
    /// Agents of the console user, installed in their home directory
    User,
    /// Agents of the console user, installed for all users
    UserAll,
}

/// launchd-activate - reconcile launchd services with a directory of definitions
#[derive(Parser, Debug)]
#[command(name = "launchd-activate")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("scope").args(["system", "user", "user_all"])))]
#[command(group(ArgGroup::new("method").args(["copy", "symlink"])))]
pub struct Cli {
    /// Activate system daemons (/Library/LaunchDaemons, copies by default)
    #[arg(long)]
    pub system: bool,

    /// Activate agents of the current user (~/Library/LaunchAgents, symlinks by default) [default]
    #[arg(long)]
    pub user: bool,

    /// Activate agents for all users (/Library/LaunchAgents, copies by default)
    #[arg(long)]
    pub user_all: bool,

    /// Install definitions as copies
    #[arg(long)]
    pub copy: bool,

    /// Install definitions as symlinks
    #[arg(long)]
    pub symlink: bool,

    /// Show what would be done without changing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Seconds to wait for each service to stop. Also bounds starting unless a
    /// bootstrap timeout comes from --bootstrap-timeout, the config file or
    /// LAUNCHD_ACTIVATE_BOOTSTRAP_TIMEOUT
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Seconds to wait for each service to start
    #[arg(long, value_name = "SECS")]
    pub bootstrap_timeout: Option<u64>,

    /// Config file (default: <config dir>/launchd-activate/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit NDJSON events on stdout
    #[arg(long)]
    pub json: bool,

    /// Color output mode
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory of service definitions to activate
    pub new: PathBuf,

    /// Directory of previously activated definitions
    pub old: Option<PathBuf>,
}

impl Cli {
    pub fn scope(&self) -> Scope {
        if self.system {
            Scope::System
        } else if self.user_all {
            Scope::UserAll
        } else {
            Scope::User
        }
    }

    /// Method forced on the command line, if any
    pub fn install_method(&self) -> Option<InstallMethod> {
        if self.copy {
            Some(InstallMethod::Copy)
        } else if self.symlink {
            Some(InstallMethod::Symlink)
        } else {
            None
        }
    }
}
