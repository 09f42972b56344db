//! One-line summary shown for the plugin's settings tab

use stylesparser_styles::compile;

use crate::settings::PluginSettings;

/// Describe the configured stylesheet, selectors and styles
pub fn summary(settings: &PluginSettings) -> String {
    let stylesheet = match settings.stylesheet() {
        Some(path) => format!("Stylesheet {} is set.", path),
        None => "No stylesheet set.".to_string(),
    };
    let valid = settings.validselectors.as_ref().map_or(0, |s| s.len());
    let styles = settings
        .styles
        .as_deref()
        .and_then(|raw| compile(raw).ok())
        .map_or(0, |rules| rules.len());

    format!(
        "{} {} valid selectors are set. {} styles configured.",
        stylesheet, valid, styles
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SelectorSet;

    #[test]
    fn test_summary() {
        let settings = PluginSettings {
            stylesheet: Some("themes/a/style.css".to_string()),
            validselectors: Some(SelectorSet::new(["p", "span"])),
            styles: Some("p|A\n\nspan.x|B".to_string()),
            ..Default::default()
        };
        assert_eq!(
            summary(&settings),
            "Stylesheet themes/a/style.css is set. 2 valid selectors are set. 2 styles configured."
        );
    }

    #[test]
    fn test_summary_unconfigured() {
        let settings = PluginSettings {
            styles: Some("broken".to_string()),
            ..Default::default()
        };
        assert_eq!(
            summary(&settings),
            "No stylesheet set. 0 valid selectors are set. 0 styles configured."
        );
    }
}
