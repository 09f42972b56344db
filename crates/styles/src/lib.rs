//! Stylesparser Styles
//!
//! Compiles `element[.class...]|label` rule text into the styles set offered
//! by the editor's styles combo.
//!
//! ```
//! use stylesparser_styles::{compile, validate_unique};
//!
//! let rules = compile("p|Paragraph\nspan.highlight|Highlighted").unwrap();
//! assert_eq!(rules[1].classes.as_slice(), ["highlight"]);
//! assert!(validate_unique(&rules).is_ok());
//! ```

mod compiler;
mod error;
mod rule;
mod unique;

pub use compiler::{compile, compile_styles_set, diagnose};
pub use error::{LineDiagnostic, StylesError, StylesResult};
pub use rule::{to_styles_set, StyleAttributes, StyleRule, StylesSetEntry};
pub use unique::{validate_unique, UniquenessPolicy};

/// Compile and then check name uniqueness, as done when the settings form is
/// submitted.
pub fn validate_styles(raw: &str, policy: UniquenessPolicy) -> StylesResult<Vec<StyleRule>> {
    let rules = compile(raw)?;
    policy.check(&rules)?;
    Ok(rules)
}
