//! Style rule compiler
//!
//! Turns the administrator's rule text, one `element[.class...]|label` per
//! line, into an ordered list of [`StyleRule`]s.

use crate::error::{LineDiagnostic, StylesError, StylesResult};
use crate::rule::{to_styles_set, StyleRule, StylesSetEntry};

/// Compile raw rule text.
///
/// Empty input is a valid, empty rule list. Blank lines are skipped. The
/// first line that does not follow the grammar fails the whole compilation.
pub fn compile(raw: &str) -> StylesResult<Vec<StyleRule>> {
    let mut rules = Vec::new();

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(rules);
    }

    for line in normalize_newlines(raw).split('\n') {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((selector, label)) = scan_line(line) else {
            log::debug!("Rejecting style rule line: {}", line);
            return Err(StylesError::Syntax);
        };

        rules.push(build_rule(selector, label));
    }

    log::debug!("Compiled {} style rules", rules.len());
    Ok(rules)
}

/// Compile raw rule text straight into the editor's styles set
pub fn compile_styles_set(raw: &str) -> StylesResult<Vec<StylesSetEntry>> {
    compile(raw).map(|rules| to_styles_set(&rules))
}

/// Report every line that fails the grammar.
///
/// [`compile`] stops at the first bad line and says nothing about it; this
/// re-scans the whole input so the caller can point at each one.
pub fn diagnose(raw: &str) -> Vec<LineDiagnostic> {
    normalize_newlines(raw)
        .split('\n')
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = line.trim();
            if line.is_empty() || scan_line(line).is_some() {
                None
            } else {
                Some(LineDiagnostic::new(idx + 1, line))
            }
        })
        .collect()
}

fn normalize_newlines(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

fn build_rule(selector: &str, label: &str) -> StyleRule {
    let mut tokens = selector.split('.').map(str::trim);
    let element = tokens.next().unwrap_or_default();
    StyleRule::new(label.trim(), element, tokens)
}

/// Check a trimmed line against `^ *[a-zA-Z0-9]+ *(\.[a-zA-Z0-9_-]+ *)*\| *.+ *$`
/// and split it at the pipe that closes the selector.
fn scan_line(line: &str) -> Option<(&str, &str)> {
    let mut scanner = LineScanner::new(line);

    scanner.skip_spaces();
    if scanner.take_while(|c| c.is_ascii_alphanumeric()) == 0 {
        return None;
    }
    scanner.skip_spaces();

    while scanner.eat('.') {
        if scanner.take_while(is_class_char) == 0 {
            return None;
        }
        scanner.skip_spaces();
    }

    let pipe = scanner.position;
    if !scanner.eat('|') {
        return None;
    }

    let label = &line[scanner.position..];
    if label.is_empty() {
        return None;
    }

    Some((&line[..pipe], label))
}

fn is_class_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Cursor over a single rule line
struct LineScanner<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    position: usize,
}

impl<'a> LineScanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            position: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters matching `pred`, returning how many were taken
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance();
            count += 1;
        }
        count
    }

    fn skip_spaces(&mut self) {
        self.take_while(|c| c == ' ');
    }
}
