//! Test fixtures - service definition content.

/// Minimal launchd definition for `label`
pub fn plist(label: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{}</string>
    <key>ProgramArguments</key>
    <array>
        <string>/usr/bin/true</string>
    </array>
</dict>
</plist>
"#,
        label
    )
}

/// Config file that switches to copies and short timeouts
pub const COPY_CONFIG: &str = r#"
[activate]
install_method = "copy"
timeout = 2

[output]
color = "never"
"#;
