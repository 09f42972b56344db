//! Plugin settings
//!
//! The host persists the plugin's settings inside the editor's settings blob
//! under `plugins.stylesheetparser`. Nothing here knows how that blob is
//! stored; it is decoded and encoded as JSON.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use stylesparser_css::{harvest_selectors, suggest_rules, SelectorFilter};
use stylesparser_styles::{validate_styles, StyleRule, UniquenessPolicy};

use crate::error::{PluginError, PluginResult};
use crate::source::{default_stylesheet, StylesheetSource};

/// Key of this plugin in the editor's `plugins` settings
pub const PLUGIN_ID: &str = "stylesheetparser";

/// Elements offered as "skip" choices: `(element, label)`
pub const SKIP_SELECTORS: &[(&str, &str)] = &[
    ("body", "<body>"),
    ("div", "<div>"),
    ("blockquote", "<blockquote>"),
    ("section", "<section>"),
    ("html", "<html>"),
];

/// Elements offered as "valid" choices: `(element, label)`
pub const VALID_SELECTORS: &[(&str, &str)] = &[
    ("p", "<p>"),
    ("span", "<span>"),
    ("h1", "h1"),
    ("h2", "h2"),
    ("h3", "h3"),
    ("h4", "h4"),
    ("h5", "h5"),
    ("h6", "h6"),
    ("div", "<div>"),
    ("strong", "<strong>"),
];

/// Catalogue entries ordered for display, case-insensitively by label
pub fn sorted_options(catalogue: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    let mut options = catalogue.to_vec();
    options.sort_by(|a, b| {
        a.1.to_lowercase()
            .cmp(&b.1.to_lowercase())
            .then_with(|| a.1.cmp(b.1))
    });
    options
}

/// Chosen elements from a checkbox group.
///
/// Decodes either a plain list of element names or a checkbox map where a
/// checked box maps to its key and an unchecked one to `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectorSet(Vec<String>);

impl SelectorSet {
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for element in elements {
            set.insert(element.into());
        }
        set
    }

    /// Every element of a catalogue, as selected by default
    pub fn all_of(catalogue: &[(&str, &str)]) -> Self {
        Self::new(catalogue.iter().map(|(element, _)| *element))
    }

    fn insert(&mut self, element: String) {
        let element = element.trim().to_string();
        if !element.is_empty() && !self.0.contains(&element) {
            self.0.push(element);
        }
    }

    pub fn elements(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelectorSet {
    List(Vec<String>),
    Checkboxes(serde_json::Map<String, Value>),
}

impl<'de> Deserialize<'de> for SelectorSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawSelectorSet::deserialize(deserializer)? {
            RawSelectorSet::List(elements) => Self::new(elements),
            RawSelectorSet::Checkboxes(boxes) => Self::new(
                boxes
                    .into_iter()
                    .filter(|(_, value)| is_checked(value))
                    .map(|(key, _)| key),
            ),
        })
    }
}

fn is_checked(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The plugin's section of the editor settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipselectors: Option<SelectorSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validselectors: Option<SelectorSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<String>,
}

impl PluginSettings {
    /// Decode the plugin section itself
    pub fn from_json(json: &str) -> PluginResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode from a whole editor settings blob, `{"plugins": {...}}`.
    ///
    /// A blob without a section for this plugin yields empty settings.
    pub fn from_editor_settings(json: &str) -> PluginResult<Self> {
        let blob: Value = serde_json::from_str(json)?;
        match blob.get("plugins").and_then(|plugins| plugins.get(PLUGIN_ID)) {
            Some(section) => Ok(Self::deserialize(section)?),
            None => {
                log::debug!("No {} section in editor settings", PLUGIN_ID);
                Ok(Self::default())
            }
        }
    }

    pub fn to_json(&self) -> PluginResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Form defaults for a plugin that was never configured
    pub fn defaults(source: &dyn StylesheetSource) -> Self {
        Self {
            stylesheet: Some(default_stylesheet(source)),
            skipselectors: Some(SelectorSet::all_of(SKIP_SELECTORS)),
            validselectors: Some(SelectorSet::all_of(VALID_SELECTORS)),
            styles: Some(String::new()),
        }
    }

    /// Chosen stylesheet, ignoring an empty selection
    pub fn stylesheet(&self) -> Option<&str> {
        self.stylesheet.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Element filter built from the skip/valid choices
    pub fn selector_filter(&self) -> SelectorFilter {
        let elements = |set: &Option<SelectorSet>| {
            set.as_ref()
                .map(|s| s.elements().to_vec())
                .unwrap_or_default()
        };
        SelectorFilter::new()
            .with_valid(elements(&self.validselectors))
            .with_skip(elements(&self.skipselectors))
    }

    /// Validate a submitted settings form.
    ///
    /// The styles text must compile and name every style uniquely. When a
    /// source is given, the chosen stylesheet must be one it offers.
    pub fn validate(
        &self,
        source: Option<&dyn StylesheetSource>,
        policy: UniquenessPolicy,
    ) -> PluginResult<Vec<StyleRule>> {
        if let (Some(source), Some(stylesheet)) = (source, self.stylesheet()) {
            if !source.contains(stylesheet) {
                return Err(PluginError::UnknownStylesheet(stylesheet.to_string()));
            }
        }

        let rules = validate_styles(self.styles.as_deref().unwrap_or_default(), policy)?;
        Ok(rules)
    }

    /// Suggest styles text from the chosen stylesheet's content
    pub fn seed_styles(&self, css: &str) -> PluginResult<String> {
        let selectors = harvest_selectors(css)?;
        let kept = self.selector_filter().apply(&selectors);
        log::debug!("Seeding {} of {} selectors", kept.len(), selectors.len());
        Ok(suggest_rules(&kept))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticStylesheets;
    use stylesparser_styles::{compile, validate_unique, StylesError};

    #[test]
    fn test_decode_lists() {
        let settings = PluginSettings::from_json(
            r#"{"stylesheet": "themes/a/style.css", "validselectors": ["p", "span", "p"], "styles": "p|P"}"#,
        )
        .unwrap();
        assert_eq!(settings.stylesheet(), Some("themes/a/style.css"));
        assert_eq!(settings.validselectors.unwrap().elements(), ["p", "span"]);
        assert_eq!(settings.skipselectors, None);
        assert_eq!(settings.styles.as_deref(), Some("p|P"));
    }

    #[test]
    fn test_decode_checkboxes() {
        let settings = PluginSettings::from_json(
            r#"{"skipselectors": {"body": "body", "div": 0, "html": "html", "section": false}}"#,
        )
        .unwrap();
        assert_eq!(settings.skipselectors.unwrap().elements(), ["body", "html"]);
    }

    #[test]
    fn test_decode_rejects_bad_shape() {
        let err = PluginSettings::from_json(r#"{"validselectors": 3}"#).unwrap_err();
        assert!(matches!(err, PluginError::Settings(_)));
    }

    #[test]
    fn test_empty_stylesheet_is_unset() {
        let settings = PluginSettings::from_json(r#"{"stylesheet": " "}"#).unwrap();
        assert_eq!(settings.stylesheet(), None);
    }

    #[test]
    fn test_from_editor_settings() {
        let blob = r#"{"toolbar": [], "plugins": {"stylesheetparser": {"styles": "p|A"}}}"#;
        let settings = PluginSettings::from_editor_settings(blob).unwrap();
        assert_eq!(settings.styles.as_deref(), Some("p|A"));

        let settings = PluginSettings::from_editor_settings(r#"{"plugins": {}}"#).unwrap();
        assert_eq!(settings, PluginSettings::default());
    }

    #[test]
    fn test_json_round_trip_keeps_fields() {
        let settings = PluginSettings {
            stylesheet: Some("a.css".to_string()),
            skipselectors: Some(SelectorSet::new(["body"])),
            validselectors: None,
            styles: Some("p|P".to_string()),
        };
        let json = settings.to_json().unwrap();
        assert!(!json.contains("validselectors"));
        assert_eq!(PluginSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_defaults() {
        let source = StaticStylesheets::new(["themes/a/style.css"]);
        let settings = PluginSettings::defaults(&source);
        assert_eq!(settings.stylesheet(), Some("themes/a/style.css"));
        assert_eq!(settings.skipselectors.as_ref().map(SelectorSet::len), Some(5));
        assert_eq!(settings.validselectors.as_ref().map(SelectorSet::len), Some(10));
        assert_eq!(settings.styles.as_deref(), Some(""));
    }

    #[test]
    fn test_sorted_options() {
        let labels: Vec<&str> = sorted_options(VALID_SELECTORS).iter().map(|o| o.1).collect();
        assert_eq!(
            labels,
            vec!["<div>", "<p>", "<span>", "<strong>", "h1", "h2", "h3", "h4", "h5", "h6"]
        );
    }

    #[test]
    fn test_validate() {
        let source = StaticStylesheets::new(["a.css"]);
        let mut settings = PluginSettings {
            stylesheet: Some("a.css".to_string()),
            styles: Some("p|One\np|Two".to_string()),
            ..Default::default()
        };
        let rules = settings
            .validate(Some(&source), UniquenessPolicy::default())
            .unwrap();
        assert_eq!(rules.len(), 2);

        settings.styles = Some("p|Same\nspan|Same".to_string());
        let err = settings.validate(Some(&source), UniquenessPolicy::default()).unwrap_err();
        assert!(matches!(err, PluginError::Styles(StylesError::DuplicateName)));

        settings.styles = Some("p Paragraph".to_string());
        let err = settings.validate(None, UniquenessPolicy::default()).unwrap_err();
        assert!(matches!(err, PluginError::Styles(StylesError::Syntax)));
        assert_eq!(err.to_string(), "The provided list of styles is syntactically incorrect.");
    }

    #[test]
    fn test_validate_unknown_stylesheet() {
        let source = StaticStylesheets::new(["a.css"]);
        let settings = PluginSettings {
            stylesheet: Some("b.css".to_string()),
            ..Default::default()
        };
        let err = settings.validate(Some(&source), UniquenessPolicy::default()).unwrap_err();
        assert!(matches!(err, PluginError::UnknownStylesheet(ref s) if s == "b.css"));

        let rules = settings.validate(None, UniquenessPolicy::default()).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_seed_styles() {
        let css = "body.home { } p.lead { } div.box { } span.note { } em.x { } .bare { }";
        let settings = PluginSettings {
            skipselectors: Some(SelectorSet::new(["body", "div"])),
            validselectors: Some(SelectorSet::new(["p", "span", "div"])),
            ..Default::default()
        };
        let seeded = settings.seed_styles(css).unwrap();
        assert_eq!(seeded, "p.lead|p.lead\nspan.note|span.note");

        let rules = compile(&seeded).unwrap();
        assert_eq!(validate_unique(&rules), Ok(()));
        assert_eq!(rules[0].classes.as_slice(), ["lead"]);
    }

    #[test]
    fn test_seed_styles_bad_css() {
        let err = PluginSettings::default().seed_styles("p.a {").unwrap_err();
        assert!(matches!(err, PluginError::Css(_)));
    }
}
