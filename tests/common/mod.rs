//! Common test utilities for launchd-activate CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated environment with temp source, home and config dirs
//! - Fixtures: Service definition content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
