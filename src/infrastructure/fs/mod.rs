//! File System Implementations
//!
//! Concrete implementation of the FileSystem port and home directory
//! lookup.

mod home;
mod local;

pub use home::{home_dir, HOME_OVERRIDE_VAR};
pub use local::LocalFs;
