//! Stylesparser CSS
//!
//! Stylesheet tokenizer and selector harvesting for seeding editor styles.

pub mod error;
pub mod harvest;
pub mod selector;
pub mod tokenizer;

pub use error::{CssError, CssResult, SourceLocation};
pub use harvest::{harvest_selectors, suggest_rules};
pub use selector::{SelectorFilter, SimpleSelector};
pub use tokenizer::{Token, Tokenizer};
