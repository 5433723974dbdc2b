//! Output selection
//!
//! Decides whether stderr gets color and which event sink renders the run.

use std::sync::Arc;

use is_terminal::IsTerminal;

use crate::config::ColorMode;
use crate::domain::ports::{ActivateEventSink, NoopEventSink};
use crate::infrastructure::{ConsoleEventSink, JsonEventSink};

/// How the run is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// NDJSON events on stdout
    Json,
    /// Plan on stdout, progress on stderr
    Human { color: bool, verbose: bool },
    /// Nothing beyond warnings and errors from the logger
    Quiet,
}

impl OutputMode {
    pub fn select(json: bool, quiet: bool, color: bool, verbose: bool) -> Self {
        if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Human { color, verbose }
        }
    }

    /// Whether the plan text goes to stdout before execution
    pub fn prints_plan(&self) -> bool {
        matches!(self, OutputMode::Human { .. })
    }

    pub fn event_sink(&self) -> Arc<dyn ActivateEventSink> {
        match *self {
            OutputMode::Json => Arc::new(JsonEventSink::stdout()),
            OutputMode::Human { color, verbose } => {
                Arc::new(ConsoleEventSink::stderr(color).verbose(verbose))
            }
            OutputMode::Quiet => Arc::new(NoopEventSink),
        }
    }
}

pub fn use_color(mode: ColorMode) -> bool {
    use_color_impl(mode, std::io::stderr().is_terminal(), |key| {
        std::env::var(key).ok()
    })
}

fn use_color_impl(
    mode: ColorMode,
    is_tty: bool,
    get_env: impl Fn(&str) -> Option<String>,
) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            let dumb = get_env("TERM").is_some_and(|t| t.eq_ignore_ascii_case("dumb"));
            is_tty && !dumb && get_env("NO_COLOR").is_none()
        }
    }
}
