//! Load state of a service as reported by the service manager

use std::fmt;

/// Whether a service is currently loaded in its domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadState {
    Loaded,
    Unloaded,
}

impl LoadState {
    pub fn from_loaded(loaded: bool) -> Self {
        if loaded {
            LoadState::Loaded
        } else {
            LoadState::Unloaded
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded)
    }

    /// Verb used in progress and timeout messages ("load" / "unload")
    pub fn verb(&self) -> &'static str {
        match self {
            LoadState::Loaded => "load",
            LoadState::Unloaded => "unload",
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Loaded => write!(f, "loaded"),
            LoadState::Unloaded => write!(f, "unloaded"),
        }
    }
}
