//! Domain Value Objects
//!
//! Immutable value types identifying service definitions, running services
//! and the places they are installed to.

pub mod command_line;
mod domain_target;
mod install_method;
mod load_state;
mod service_directory;
mod service_path;
mod service_target;

pub use command_line::{shell_escape, CommandLine};
pub use domain_target::DomainTarget;
pub use install_method::InstallMethod;
pub use load_state::LoadState;
pub use service_directory::{
    ServiceDirectory, ALL_USERS_AGENTS_DIR, SYSTEM_DAEMONS_DIR, USER_AGENTS_SUBDIR,
};
pub use service_path::{is_valid_service_name, ServicePath, DEFINITION_EXTENSION};
pub use service_target::ServiceTarget;
