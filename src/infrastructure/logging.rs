//! Diagnostic logging setup
//!
//! `log` facade dispatched by `fern` to stderr as `[LEVEL] message`.

use log::LevelFilter;

/// Level for the `-q` / `-v` flags: quiet wins, then each `-v` adds detail
pub fn level_for(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::Warn;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. Fails if one is already installed.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}
