//! Stylesheet selector harvesting
//!
//! Walks a stylesheet's rules and collects the compound selectors that can
//! back an editor style. Declaration blocks are skipped unread.

use rustc_hash::FxHashSet;

use crate::error::{CssError, CssResult};
use crate::selector::SimpleSelector;
use crate::tokenizer::{Token, Tokenizer};

/// At-rules whose block holds further style rules
const GROUPING_AT_RULES: &[&str] = &["media", "supports", "document", "layer", "container"];

/// Collect `element.class` style selectors from a stylesheet, in order of
/// first appearance and without duplicates.
pub fn harvest_selectors(css: &str) -> CssResult<Vec<SimpleSelector>> {
    let mut harvester = Harvester::new(css);
    harvester.parse_rules(false)?;
    log::debug!("Harvested {} selectors", harvester.found.len());
    Ok(harvester.found)
}

/// Render selectors as rule text, labelling each style with its selector.
///
/// Selectors that cannot be written as a rule line are left out, as are
/// repeats, so the output always compiles into uniquely named styles.
pub fn suggest_rules(selectors: &[SimpleSelector]) -> String {
    let mut seen = FxHashSet::default();
    let mut lines = Vec::new();

    for selector in selectors {
        if !selector.is_rule_compatible() {
            log::trace!("Not suggesting selector: {}", selector);
            continue;
        }
        let text = selector.to_string();
        if seen.insert(text.clone()) {
            lines.push(format!("{}|{}", text, text));
        }
    }

    lines.join("\n")
}

struct Harvester<'a> {
    tokenizer: Tokenizer<'a>,
    seen: FxHashSet<String>,
    found: Vec<SimpleSelector>,
}

impl<'a> Harvester<'a> {
    fn new(css: &'a str) -> Self {
        Self {
            tokenizer: Tokenizer::new(css),
            seen: FxHashSet::default(),
            found: Vec::new(),
        }
    }

    /// Parse a rule list; `nested` lists end at their closing brace
    fn parse_rules(&mut self, nested: bool) -> CssResult<()> {
        let mut prelude = Vec::new();

        loop {
            let location = self.tokenizer.location();
            match self.tokenizer.next_token()? {
                Token::Eof if nested => return Err(CssError::unexpected_eof(location)),
                Token::Eof => return Ok(()),
                Token::RightBrace if nested => return Ok(()),
                Token::RightBrace => return Err(CssError::unexpected_char('}', location)),
                Token::Semicolon if is_at_rule(&prelude) => prelude.clear(),
                Token::LeftBrace => {
                    self.parse_block(&prelude)?;
                    prelude.clear();
                }
                token => prelude.push(token),
            }
        }
    }

    fn parse_block(&mut self, prelude: &[Token]) -> CssResult<()> {
        match prelude.iter().find(|t| **t != Token::Whitespace) {
            Some(Token::AtKeyword(name))
                if GROUPING_AT_RULES.iter().any(|g| name.eq_ignore_ascii_case(g)) =>
            {
                self.parse_rules(true)
            }
            Some(Token::AtKeyword(name)) => {
                log::trace!("Skipping @{} block", name);
                self.skip_block()
            }
            _ => {
                self.collect(prelude);
                self.skip_block()
            }
        }
    }

    /// Skip to the brace closing the block just opened
    fn skip_block(&mut self) -> CssResult<()> {
        let mut depth = 1usize;
        loop {
            let location = self.tokenizer.location();
            match self.tokenizer.next_token()? {
                Token::LeftBrace => depth += 1,
                Token::RightBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Token::Eof => return Err(CssError::unexpected_eof(location)),
                _ => {}
            }
        }
    }

    fn collect(&mut self, prelude: &[Token]) {
        for part in prelude.split(|t| *t == Token::Comma) {
            let Some(selector) = SimpleSelector::from_tokens(part) else {
                continue;
            };
            if self.seen.insert(selector.to_string()) {
                self.found.push(selector);
            }
        }
    }
}

fn is_at_rule(prelude: &[Token]) -> bool {
    matches!(
        prelude.iter().find(|t| **t != Token::Whitespace),
        Some(Token::AtKeyword(_))
    )
}
