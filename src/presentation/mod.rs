//! Presentation Layer
//!
//! - `cli` - argument parsing (via clap)
//! - `factory` - use case wiring and option resolution
//! - `output` - color and event sink selection
//!
//! ```ignore
//! use launchd_activate::presentation::{factory, output::OutputMode};
//!
//! let options = factory::activate_options(&cli, &config)?;
//! let use_case = factory::create_activate_use_case(OutputMode::Quiet.event_sink());
//! let report = use_case.execute(&options)?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, ColorWhen, Scope};
pub use factory::{activate_options, create_activate_use_case, ConcreteActivateUseCase};
pub use output::OutputMode;
