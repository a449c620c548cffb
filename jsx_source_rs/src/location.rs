//! Display names and location strings.

use std::fmt;

/// Placeholder used when a file has no usable name.
pub const UNKNOWN_FILENAME: &str = "unknown";

/// Name of a file as it appears in generated location strings.
///
/// A missing, empty or `"unknown"` path resolves to `"unknown"`. A non-empty
/// `root_prefix` is removed by length: as many UTF-16 code units as the prefix
/// has are dropped from the path without checking that they actually match.
/// Callers pass a real prefix, usually ending in `/`.
pub fn resolve_display_name(file_path: Option<&str>, root_prefix: Option<&str>) -> String {
    let Some(path) = file_path.filter(|p| !p.is_empty() && *p != UNKNOWN_FILENAME) else {
        return UNKNOWN_FILENAME.to_string();
    };

    match root_prefix.filter(|r| !r.is_empty()) {
        Some(root) => {
            let units: Vec<u16> = path
                .encode_utf16()
                .skip(root.encode_utf16().count())
                .collect();
            String::from_utf16_lossy(&units)
        }
        None => path.to_string(),
    }
}

/// Where an element starts: `<display name>:<line>:<column>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub display_name: &'a str,
    /// 1-based.
    pub line: u32,
    /// 0-based.
    pub column: u32,
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.display_name, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_root_prefix() {
        assert_eq!(
            resolve_display_name(Some("/project/src/App.tsx"), Some("/project/")),
            "src/App.tsx"
        );
    }

    #[test]
    fn keeps_path_without_root() {
        assert_eq!(
            resolve_display_name(Some("components/Button.jsx"), None),
            "components/Button.jsx"
        );
        assert_eq!(resolve_display_name(Some("test.tsx"), Some("")), "test.tsx");
    }

    #[test]
    fn unknown_wins_over_root() {
        assert_eq!(resolve_display_name(None, Some("/project/")), "unknown");
        assert_eq!(resolve_display_name(Some("unknown"), Some("/p/")), "unknown");
        assert_eq!(resolve_display_name(Some(""), None), "unknown");
    }

    #[test]
    fn root_is_sliced_by_length_not_matched() {
        // Not a real prefix: the same number of characters is dropped anyway.
        assert_eq!(
            resolve_display_name(Some("/other/src/App.tsx"), Some("/project")),
            "src/App.tsx"
        );
        assert_eq!(resolve_display_name(Some("a.tsx"), Some("/much/longer/")), "");
    }

    #[test]
    fn slices_utf16_units_not_bytes() {
        assert_eq!(
            resolve_display_name(Some("/zażółć/App.tsx"), Some("/zażółć/")),
            "App.tsx"
        );
        assert_eq!(
            resolve_display_name(Some("/😀/App.tsx"), Some("/😀/")),
            "App.tsx"
        );
        // The emoji is two units, so four are dropped.
        assert_eq!(resolve_display_name(Some("/abc/x"), Some("/😀/")), "/x");
    }

    #[test]
    fn formats_location() {
        let location = Location {
            display_name: "test.tsx",
            line: 3,
            column: 4,
        };
        assert_eq!(location.to_string(), "test.tsx:3:4");
    }
}
