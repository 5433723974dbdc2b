#![no_main]

use libfuzzer_sys::fuzz_target;

use launchd_activate::InstallMethod;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(method) = s.parse::<InstallMethod>() {
            // Anything accepted must survive a display round trip
            assert_eq!(method.to_string().parse::<InstallMethod>().ok(), Some(method));
        }
    }
});
