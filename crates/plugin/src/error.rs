//! Plugin error types

use thiserror::Error;

use stylesparser_css::CssError;
use stylesparser_styles::StylesError;

/// Plugin operation result type
pub type PluginResult<T> = Result<T, PluginError>;

/// Plugin errors
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Invalid plugin settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Stylesheet not available: {0}")]
    UnknownStylesheet(String),

    #[error(transparent)]
    Styles(#[from] StylesError),

    #[error("Stylesheet parse error: {0}")]
    Css(#[from] CssError),
}
