//! Stylesparser Plugin
//!
//! Settings, validation and editor configuration for the stylesheet parser
//! editor plugin. The host supplies persisted settings as JSON and the list
//! of available stylesheets; everything else is computed here.

mod config;
mod error;
mod settings;
mod source;
mod summary;

pub use config::{editor_config, skip_selectors_pattern, valid_selectors_pattern, EditorConfig};
pub use error::{PluginError, PluginResult};
pub use settings::{
    sorted_options, PluginSettings, SelectorSet, PLUGIN_ID, SKIP_SELECTORS, VALID_SELECTORS,
};
pub use source::{default_stylesheet, StaticStylesheets, StylesheetSource, FALLBACK_STYLESHEET};
pub use summary::summary;
