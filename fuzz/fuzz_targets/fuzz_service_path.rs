#![no_main]

use libfuzzer_sys::fuzz_target;

use launchd_activate::{DomainTarget, ServicePath};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(path) = ServicePath::from_path(s) {
            let _ = path.service_target(DomainTarget::Gui(501)).to_string();
            let _ = path.needs_privilege();
        }
    }
});
