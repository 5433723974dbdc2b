//! Property tests for service name and path handling.

use proptest::prelude::*;

use launchd_activate::domain::value_objects::{is_valid_service_name, shell_escape};
use launchd_activate::{DomainTarget, ServiceDirectory, ServicePath};

fn service_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9][A-Za-z0-9._-]{0,31}")
        .unwrap()
        .prop_filter("must not carry the extension", |s| !s.ends_with(".plist"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary paths never panics.
    #[test]
    fn property_from_path_never_panics(s in "(?s).{0,256}") {
        if let Some(path) = ServicePath::from_path(s.as_str()) {
            prop_assert!(is_valid_service_name(path.name()));
        }
    }

    /// PROPERTY: The name of `<dir>/<name>.plist` is `name`, in every directory.
    #[test]
    fn property_name_survives_directory_join(name in service_name()) {
        let path = ServicePath::from_path(format!("/src/{}.plist", name)).unwrap();
        prop_assert_eq!(path.name(), name.as_str());

        for dir in [ServiceDirectory::System, ServiceDirectory::AllUsers] {
            let installed = dir.service_path(&name);
            prop_assert_eq!(installed.name(), name.as_str());
            prop_assert_eq!(
                installed.service_target(DomainTarget::System).to_string(),
                format!("system/{}", name)
            );
        }
    }

    /// PROPERTY: Escaped words are either untouched or fully single-quoted.
    #[test]
    fn property_shell_escape_quotes_or_preserves(word in "(?s).{0,64}") {
        let escaped = shell_escape(&[word.as_str()]);
        prop_assert!(
            escaped == word || (escaped.starts_with('\'') && escaped.ends_with('\'')),
            "{:?} -> {:?}",
            word,
            escaped
        );
    }
}
