//! Stylesheet availability
//!
//! The host decides which stylesheets exist (installed themes, files on
//! disk). The plugin only asks through [`StylesheetSource`].

/// Sample stylesheet shipped with the editor plugin, offered when the host
/// has nothing else
pub const FALLBACK_STYLESHEET: &str = "js/plugins/stylesheetparser/samples/assets/sample.css";

/// Provides the stylesheet paths an administrator may choose from
pub trait StylesheetSource {
    /// Available stylesheet paths, in the order they are offered
    fn stylesheets(&self) -> Vec<String>;

    fn contains(&self, path: &str) -> bool {
        self.stylesheets().iter().any(|s| s == path)
    }
}

impl<F> StylesheetSource for F
where
    F: Fn() -> Vec<String>,
{
    fn stylesheets(&self) -> Vec<String> {
        self()
    }
}

/// A fixed list of stylesheets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticStylesheets(pub Vec<String>);

impl StaticStylesheets {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }
}

impl StylesheetSource for StaticStylesheets {
    fn stylesheets(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// The first offered stylesheet, or the bundled sample
pub fn default_stylesheet(source: &dyn StylesheetSource) -> String {
    source
        .stylesheets()
        .into_iter()
        .next()
        .unwrap_or_else(|| FALLBACK_STYLESHEET.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first() {
        let source = StaticStylesheets::new(["themes/a/style.css", "themes/b/print.css"]);
        assert_eq!(default_stylesheet(&source), "themes/a/style.css");
        assert!(source.contains("themes/b/print.css"));
        assert!(!source.contains("themes/c/other.css"));
    }

    #[test]
    fn test_fallback_when_empty() {
        let source = StaticStylesheets::default();
        assert_eq!(default_stylesheet(&source), FALLBACK_STYLESHEET);
    }

    #[test]
    fn test_closure_source() {
        let source = || vec!["themes/x/base.css".to_string()];
        assert_eq!(default_stylesheet(&source), "themes/x/base.css");
    }
}
