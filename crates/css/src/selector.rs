//! Compound selectors usable as editor styles
//!
//! Only `element.class...` shapes can become style rules, so everything else
//! a stylesheet may contain (combinators, ids, attributes, pseudo-classes)
//! is rejected here instead of being modelled.

use std::fmt;

use smallvec::SmallVec;

use crate::tokenizer::Token;

/// A compound selector made of an optional type selector and classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleSelector {
    /// Type selector, lowercased; `None` for `.class` or `*.class`
    pub element: Option<String>,
    /// Class selectors in source order
    pub classes: SmallVec<[String; 2]>,
}

impl SimpleSelector {
    pub fn new<I, S>(element: Option<&str>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            element: element.map(str::to_ascii_lowercase),
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from the tokens of one comma-separated selector
    pub fn from_tokens(tokens: &[Token]) -> Option<Self> {
        let tokens = trim_whitespace(tokens);
        let mut iter = tokens.iter().peekable();

        let element = match iter.peek() {
            Some(Token::Ident(name)) => {
                iter.next();
                Some(name.to_ascii_lowercase())
            }
            Some(Token::Delim('*')) => {
                iter.next();
                None
            }
            _ => None,
        };

        let mut classes = SmallVec::new();
        while let Some(token) = iter.next() {
            match (token, iter.next()) {
                (Token::Delim('.'), Some(Token::Ident(class))) => classes.push(class.clone()),
                _ => return None,
            }
        }

        if element.is_none() && classes.is_empty() {
            return None;
        }

        Some(Self { element, classes })
    }

    pub fn has_classes(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Whether the selector can be written as a style rule line
    pub fn is_rule_compatible(&self) -> bool {
        let element_ok = self
            .element
            .as_deref()
            .is_some_and(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()));
        let classes_ok = self.classes.iter().all(|class| {
            !class.is_empty()
                && class
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        });
        element_ok && classes_ok
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(element) = &self.element {
            f.write_str(element)?;
        }
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        Ok(())
    }
}

fn trim_whitespace(tokens: &[Token]) -> &[Token] {
    let start = tokens
        .iter()
        .position(|t| *t != Token::Whitespace)
        .unwrap_or(tokens.len());
    let end = tokens
        .iter()
        .rposition(|t| *t != Token::Whitespace)
        .map_or(start, |i| i + 1);
    &tokens[start..end]
}

/// Element allow/deny lists applied to harvested selectors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorFilter {
    /// Elements to keep; empty keeps every element
    pub valid: Vec<String>,
    /// Elements to drop
    pub skip: Vec<String>,
}

impl SelectorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_valid<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid = elements.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skip<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip = elements.into_iter().map(Into::into).collect();
        self
    }

    /// Keep only `element.class` selectors allowed by both lists
    pub fn accepts(&self, selector: &SimpleSelector) -> bool {
        let Some(element) = selector.element.as_deref() else {
            return false;
        };
        if !selector.has_classes() {
            return false;
        }

        let listed = |list: &[String]| list.iter().any(|e| e.eq_ignore_ascii_case(element));
        if listed(&self.skip) {
            return false;
        }
        self.valid.is_empty() || listed(&self.valid)
    }

    pub fn apply(&self, selectors: &[SimpleSelector]) -> Vec<SimpleSelector> {
        selectors.iter().filter(|s| self.accepts(s)).cloned().collect()
    }
}
