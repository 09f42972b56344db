//! Editor configuration export
//!
//! Builds the additions this plugin makes to the editor's client-side
//! configuration object.

use serde::Serialize;

use stylesparser_styles::{compile_styles_set, StylesSetEntry};

use crate::error::PluginResult;
use crate::settings::{PluginSettings, SelectorSet};

/// Pattern the editor uses when no valid elements are chosen
const ANY_CLASS_SELECTOR: &str = r"\w+\.\w+";

/// Pattern the editor uses when no skip elements are chosen
const BARE_CLASS_SELECTOR: &str = r"^\.";

/// Plugin additions to the editor configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditorConfig {
    #[serde(rename = "styleSheets", skip_serializing_if = "Option::is_none")]
    pub style_sheets: Option<Vec<String>>,
    #[serde(rename = "stylesheetParser_skipSelectors", skip_serializing_if = "Option::is_none")]
    pub skip_selectors: Option<String>,
    #[serde(rename = "stylesheetParser_validSelectors", skip_serializing_if = "Option::is_none")]
    pub valid_selectors: Option<String>,
    #[serde(rename = "stylesSet", skip_serializing_if = "Option::is_none")]
    pub styles_set: Option<Vec<StylesSetEntry>>,
}

impl EditorConfig {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_json(&self) -> PluginResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the editor configuration for the given settings.
///
/// Without a chosen stylesheet the plugin contributes nothing. Styles text
/// that does not compile is an error here, since it should never have been
/// accepted by the settings form.
pub fn editor_config(settings: &PluginSettings) -> PluginResult<EditorConfig> {
    let mut config = EditorConfig::default();

    let Some(stylesheet) = settings.stylesheet() else {
        log::debug!("No stylesheet chosen, editor config left empty");
        return Ok(config);
    };
    config.style_sheets = Some(vec![stylesheet.to_string()]);

    config.skip_selectors = settings.skipselectors.as_ref().map(skip_selectors_pattern);
    config.valid_selectors = settings.validselectors.as_ref().map(valid_selectors_pattern);

    if let Some(styles) = &settings.styles {
        config.styles_set = Some(compile_styles_set(styles)?);
    }

    Ok(config)
}

/// Selectors starting with a skipped element, or with a bare class
pub fn skip_selectors_pattern(skip: &SelectorSet) -> String {
    if skip.is_empty() {
        return BARE_CLASS_SELECTOR.to_string();
    }
    format!("(^(?:{})\\.|{})", alternation(skip), BARE_CLASS_SELECTOR)
}

/// Selectors made of a valid element and at least one class
pub fn valid_selectors_pattern(valid: &SelectorSet) -> String {
    if valid.is_empty() {
        return ANY_CLASS_SELECTOR.to_string();
    }
    format!("^(?:{})\\.\\w+", alternation(valid))
}

fn alternation(set: &SelectorSet) -> String {
    set.elements()
        .iter()
        .map(|element| escape_pattern(element))
        .collect::<Vec<_>>()
        .join("|")
}

fn escape_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if !c.is_alphanumeric() && c != '_' && c != '-' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stylesparser_styles::StylesError;

    use crate::error::PluginError;

    #[test]
    fn test_no_stylesheet() {
        let settings = PluginSettings {
            styles: Some("p|P".to_string()),
            ..Default::default()
        };
        let config = editor_config(&settings).unwrap();
        assert!(config.is_empty());
        assert_eq!(config.to_json().unwrap(), "{}");
    }

    #[test]
    fn test_full_config() {
        let settings = PluginSettings {
            stylesheet: Some("themes/a/style.css".to_string()),
            skipselectors: Some(SelectorSet::new(["body", "div"])),
            validselectors: Some(SelectorSet::new(["p", "span"])),
            styles: Some("p|Paragraph\nspan.highlight.big|Highlighted".to_string()),
        };
        let config = editor_config(&settings).unwrap();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({
                "styleSheets": ["themes/a/style.css"],
                "stylesheetParser_skipSelectors": "(^(?:body|div)\\.|^\\.)",
                "stylesheetParser_validSelectors": "^(?:p|span)\\.\\w+",
                "stylesSet": [
                    {"name": "Paragraph", "element": "p"},
                    {"name": "Highlighted", "element": "span", "attributes": {"class": "highlight big"}}
                ]
            })
        );
    }

    #[test]
    fn test_only_present_sections_exported() {
        let settings = PluginSettings {
            stylesheet: Some("a.css".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(editor_config(&settings).unwrap()).unwrap();
        assert_eq!(value, json!({"styleSheets": ["a.css"]}));
    }

    #[test]
    fn test_empty_selector_sets() {
        assert_eq!(skip_selectors_pattern(&SelectorSet::default()), r"^\.");
        assert_eq!(valid_selectors_pattern(&SelectorSet::default()), r"\w+\.\w+");
    }

    #[test]
    fn test_pattern_escaping() {
        let set = SelectorSet::new(["my.el", "h1"]);
        assert_eq!(valid_selectors_pattern(&set), r"^(?:my\.el|h1)\.\w+");
    }

    #[test]
    fn test_invalid_styles_rejected() {
        let settings = PluginSettings {
            stylesheet: Some("a.css".to_string()),
            styles: Some("not a rule".to_string()),
            ..Default::default()
        };
        let err = editor_config(&settings).unwrap_err();
        assert!(matches!(err, PluginError::Styles(StylesError::Syntax)));
    }
}
