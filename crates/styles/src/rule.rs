//! Compiled style rules and their styles set form

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One compiled `element[.class...]|label` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Label shown in the editor's styles list
    pub name: String,
    /// Element the style applies to (case kept as written)
    pub element: String,
    /// Classes added to the element, in source order
    pub classes: SmallVec<[String; 2]>,
}

impl StyleRule {
    pub fn new<I, S>(name: impl Into<String>, element: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            element: element.into(),
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    /// The `element.class.class` selector this rule was written with
    pub fn selector(&self) -> String {
        let mut selector = self.element.clone();
        for class in &self.classes {
            selector.push('.');
            selector.push_str(class);
        }
        selector
    }

    /// Convert to the entry shape the editor's styles combo expects
    pub fn to_entry(&self) -> StylesSetEntry {
        let attributes = if self.classes.is_empty() {
            None
        } else {
            Some(StyleAttributes {
                class: self.classes.join(" "),
            })
        };

        StylesSetEntry {
            name: self.name.clone(),
            element: self.element.clone(),
            attributes,
        }
    }
}

/// Serialized styles set entry: `{name, element, attributes?: {class}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylesSetEntry {
    pub name: String,
    pub element: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<StyleAttributes>,
}

/// Attributes applied by a style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleAttributes {
    /// Space-separated class list
    pub class: String,
}

/// Build the styles set for a list of compiled rules
pub fn to_styles_set(rules: &[StyleRule]) -> Vec<StylesSetEntry> {
    rules.iter().map(StyleRule::to_entry).collect()
}
