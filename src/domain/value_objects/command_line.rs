//! Command line value object - an external command and how it is shown
//!
//! Used both to spawn commands and to print them (xtrace and dry-run), so
//! what is shown is exactly what runs.

use std::fmt;
use std::path::Path;

pub const LAUNCHCTL: &str = "/bin/launchctl";
pub const LN: &str = "/bin/ln";
pub const CP: &str = "/bin/cp";
pub const RM: &str = "/bin/rm";
pub const SUDO: &str = "/usr/bin/sudo";

const UNSAFE_CHARS: &str = "\"'`$&()|[]{}*?!<>;#~%\\";

/// An external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    sudo: bool,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            sudo: false,
        }
    }

    /// Run through `sudo --` when `sudo` is true
    pub fn with_sudo(mut self, sudo: bool) -> Self {
        self.sudo = sudo;
        self
    }

    pub fn is_sudo(&self) -> bool {
        self.sudo
    }

    /// Executable actually spawned
    pub fn executable(&self) -> &str {
        if self.sudo {
            SUDO
        } else {
            &self.program
        }
    }

    /// Arguments passed to [`executable`](Self::executable)
    pub fn arguments(&self) -> Vec<&str> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        if self.sudo {
            argv.push("--");
            argv.push(self.program.as_str());
        }
        argv.extend(self.args.iter().map(String::as_str));
        argv
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words: Vec<&str> = Vec::with_capacity(self.args.len() + 2);
        if self.sudo {
            words.push("sudo");
        }
        words.push(display_name(&self.program));
        words.extend(self.args.iter().map(String::as_str));
        write!(f, "{}", shell_escape(&words))
    }
}

fn display_name(program: &str) -> &str {
    Path::new(program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program)
}

/// Join words into a string that a POSIX shell splits back into the same words
pub fn shell_escape(words: &[&str]) -> String {
    words
        .iter()
        .map(|word| {
            let unsafe_word = word.is_empty()
                || word
                    .chars()
                    .any(|c| c.is_whitespace() || UNSAFE_CHARS.contains(c));
            if unsafe_word {
                format!("'{}'", word.replace('\'', r"'\''"))
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
