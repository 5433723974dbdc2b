//! Console session lookup
//!
//! Per-user services are loaded into the GUI domain of whoever owns the
//! console, which is not necessarily the user running the command (e.g.
//! under `sudo`).

use std::os::unix::fs::MetadataExt;
use std::path::Path;

use crate::domain::value_objects::DomainTarget;

const CONSOLE_DEVICE: &str = "/dev/console";

/// GUI domain of the current console user.
///
/// Falls back to `gui/0` when no user is logged in (console owned by root
/// at the login window) or the console cannot be inspected.
pub fn current_gui_domain() -> DomainTarget {
    gui_domain_of(Path::new(CONSOLE_DEVICE))
}

fn gui_domain_of(console: &Path) -> DomainTarget {
    match std::fs::metadata(console) {
        Ok(metadata) => DomainTarget::Gui(metadata.uid()),
        Err(e) => {
            log::debug!("cannot stat {}: {}", console.display(), e);
            DomainTarget::Gui(0)
        }
    }
}
