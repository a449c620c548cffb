//! Plugin options and their resolution into concrete values.
//!
//! [`PluginOptions`] is what a caller hands over: every field optional, the
//! same names a JS build config would use (`ignoreTags`, `attribute`,
//! `disabled`). [`ResolvedOptions`] is what the annotation pass works with.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Attribute injected when no `attribute` option is given.
pub const DEFAULT_ATTRIBUTE_NAME: &str = "data-source";

/// Raw, caller-supplied options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOptions {
    /// Tags that never get the attribute. Only plain identifier tags match.
    #[serde(default, alias = "ignore_tags", skip_serializing_if = "Option::is_none")]
    pub ignore_tags: Option<Vec<String>>,
    /// Attribute name to inject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Skip the whole pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl PluginOptions {
    /// Parse options given as JSON, e.g. the second element of a
    /// `[plugin, options]` pair. `null` means "no options".
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Option<Self> =
            serde_json::from_str(raw).map_err(|e| Error::InvalidOptions(e.to_string()))?;
        Ok(value.unwrap_or_default())
    }

    /// Strict check on top of the shape guarantees serde already gives.
    ///
    /// The annotation pass does not call this; it takes options as they come.
    pub fn validate(&self) -> Result<()> {
        if let Some(attribute) = &self.attribute {
            if !is_valid_attribute_name(attribute) {
                return Err(Error::InvalidOptions(format!(
                    "`{attribute}` is not a valid JSX attribute name"
                )));
            }
        }
        if let Some(tags) = &self.ignore_tags {
            if let Some(empty) = tags.iter().position(|tag| tag.trim().is_empty()) {
                return Err(Error::InvalidOptions(format!(
                    "ignoreTags[{empty}] is empty"
                )));
            }
        }
        Ok(())
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    pub fn merged_with(&self, other: &PluginOptions) -> PluginOptions {
        PluginOptions {
            ignore_tags: other.ignore_tags.clone().or_else(|| self.ignore_tags.clone()),
            attribute: other.attribute.clone().or_else(|| self.attribute.clone()),
            disabled: other.disabled.or(self.disabled),
        }
    }
}

/// Options with defaults applied. Immutable for the duration of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub attribute_name: String,
    pub excluded_tags: HashSet<String>,
    pub disabled: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        resolve(None)
    }
}

impl ResolvedOptions {
    pub fn is_excluded(&self, tag: &str) -> bool {
        self.excluded_tags.contains(tag)
    }
}

/// Apply defaults to whatever the caller passed. Absent options and an empty
/// options value resolve the same way.
pub fn resolve(options: Option<&PluginOptions>) -> ResolvedOptions {
    let options = options.cloned().unwrap_or_default();
    ResolvedOptions {
        attribute_name: options
            .attribute
            .unwrap_or_else(|| DEFAULT_ATTRIBUTE_NAME.to_string()),
        excluded_tags: options.ignore_tags.unwrap_or_default().into_iter().collect(),
        disabled: options.disabled.unwrap_or(false),
    }
}

/// JSX attribute names: identifier-ish, dashes allowed, at most one `:`
/// namespace separator.
fn is_valid_attribute_name(name: &str) -> bool {
    let mut parts = name.split(':');
    let valid_part = |part: &str| {
        let mut chars = part.chars();
        matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
            && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '-'))
    };
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, _) => valid_part(name),
        (Some(namespace), Some(name), None) => valid_part(namespace) && valid_part(name),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_options_resolve_to_defaults() {
        let from_none = resolve(None);
        let from_empty = resolve(Some(&PluginOptions::default()));

        assert_eq!(from_none, from_empty);
        assert_eq!(from_none.attribute_name, "data-source");
        assert!(from_none.excluded_tags.is_empty());
        assert!(!from_none.disabled);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let options = PluginOptions {
            ignore_tags: Some(vec!["Fragment".into(), "Show".into()]),
            attribute: Some("__source".into()),
            disabled: Some(true),
        };
        let resolved = resolve(Some(&options));

        assert_eq!(resolved.attribute_name, "__source");
        assert!(resolved.is_excluded("Fragment"));
        assert!(resolved.is_excluded("Show"));
        assert!(!resolved.is_excluded("div"));
        assert!(resolved.disabled);
    }

    #[test]
    fn parses_camel_case_json() {
        let options =
            PluginOptions::from_json(r#"{"ignoreTags": ["For"], "attribute": "data-loc"}"#)
                .expect("valid options");
        assert_eq!(options.ignore_tags, Some(vec!["For".to_string()]));
        assert_eq!(options.attribute.as_deref(), Some("data-loc"));
        assert_eq!(options.disabled, None);
    }

    #[test]
    fn null_json_means_no_options() {
        let options = PluginOptions::from_json("null").expect("null is accepted");
        assert_eq!(options, PluginOptions::default());
    }

    #[test]
    fn rejects_ignore_tags_that_are_not_a_sequence() {
        let err = PluginOptions::from_json(r#"{"ignoreTags": "Fragment"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidOptions(_)));
    }

    #[test]
    fn validate_accepts_common_attribute_names() {
        for name in ["data-source", "__source", "data-loc", "xlink:href", "$src"] {
            let options = PluginOptions {
                attribute: Some(name.to_string()),
                ..Default::default()
            };
            assert!(options.validate().is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn validate_rejects_broken_attribute_names() {
        for name in ["", "data source", "1abc", "a:b:c", "-x", "a="] {
            let options = PluginOptions {
                attribute: Some(name.to_string()),
                ..Default::default()
            };
            assert!(options.validate().is_err(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn validate_rejects_blank_ignore_tag() {
        let options = PluginOptions {
            ignore_tags: Some(vec!["Show".into(), " ".into()]),
            ..Default::default()
        };
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("ignoreTags[1]"));
    }

    #[test]
    fn merge_prefers_the_overlay() {
        let base = PluginOptions {
            ignore_tags: Some(vec!["Show".into()]),
            attribute: Some("data-loc".into()),
            disabled: None,
        };
        let overlay = PluginOptions {
            attribute: Some("__source".into()),
            disabled: Some(false),
            ..Default::default()
        };
        let merged = base.merged_with(&overlay);

        assert_eq!(merged.attribute.as_deref(), Some("__source"));
        assert_eq!(merged.ignore_tags, Some(vec!["Show".to_string()]));
        assert_eq!(merged.disabled, Some(false));
    }
}
