//! CSS Tokenizer
//!
//! A reduced CSS Syntax Level 3 tokenizer: enough to find rule preludes and
//! step over declaration blocks without misreading strings or comments.

use crate::error::{CssError, CssResult, SourceLocation};

/// CSS Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier (type selectors, class names, keywords)
    Ident(String),
    /// At-keyword (e.g., @media, @import)
    AtKeyword(String),
    /// Hash token (e.g., #id, #fff)
    Hash(String),
    /// String token
    String(String),
    /// Whitespace (comments collapse into it)
    Whitespace,
    /// Colon ':'
    Colon,
    /// Semicolon ';'
    Semicolon,
    /// Comma ','
    Comma,
    /// Left bracket '['
    LeftBracket,
    /// Right bracket ']'
    RightBracket,
    /// Left paren '('
    LeftParen,
    /// Right paren ')'
    RightParen,
    /// Left brace '{'
    LeftBrace,
    /// Right brace '}'
    RightBrace,
    /// Delim (any other single character)
    Delim(char),
    /// End of file
    Eof,
}

/// CSS Tokenizer
pub struct Tokenizer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get the current source location
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.position)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn peek_second(&self) -> Option<char> {
        let mut iter = self.input[self.position..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Skip whitespace and comments, returning whether anything was skipped
    fn skip_trivia(&mut self) -> bool {
        let mut skipped = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.advance();
            } else if c == '/' && self.peek_second() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => continue,
                        None => break, // EOF in comment
                    }
                }
            } else {
                break;
            }
            skipped = true;
        }
        skipped
    }

    /// Get the next token
    pub fn next_token(&mut self) -> CssResult<Token> {
        if self.skip_trivia() {
            return Ok(Token::Whitespace);
        }

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        let punct = match c {
            ':' => Some(Token::Colon),
            ';' => Some(Token::Semicolon),
            ',' => Some(Token::Comma),
            '[' => Some(Token::LeftBracket),
            ']' => Some(Token::RightBracket),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            '{' => Some(Token::LeftBrace),
            '}' => Some(Token::RightBrace),
            _ => None,
        };
        if let Some(token) = punct {
            self.advance();
            return Ok(token);
        }

        match c {
            '"' | '\'' => self.consume_string(c),
            '#' => {
                self.advance();
                Ok(Token::Hash(self.consume_ident_name()))
            }
            '@' => {
                self.advance();
                Ok(Token::AtKeyword(self.consume_ident_name()))
            }
            '-' if !self.starts_identifier() => {
                self.advance();
                Ok(Token::Delim(c))
            }
            _ if is_ident_start(c) || (c == '\\' && self.starts_escape()) => {
                Ok(Token::Ident(self.consume_ident_name()))
            }
            _ => {
                self.advance();
                Ok(Token::Delim(c))
            }
        }
    }

    fn starts_identifier(&self) -> bool {
        let mut chars = self.input[self.position..].chars();
        match chars.next() {
            Some('-') => matches!(chars.next(), Some(c) if is_ident_start(c) || c == '-'),
            Some(c) => is_ident_start(c),
            None => false,
        }
    }

    fn starts_escape(&self) -> bool {
        self.peek_second().is_some_and(|n| n != '\n')
    }

    fn consume_string(&mut self, quote: char) -> CssResult<Token> {
        let start = self.location();
        self.advance();
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => return Ok(Token::String(value)),
                Some('\\') => match self.advance() {
                    Some('\n') | None => {}
                    Some(c) => value.push(c),
                },
                Some('\n') | None => {
                    return Err(CssError::UnterminatedString { location: start });
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// Consume an identifier name, resolving simple `\x` escapes
    fn consume_ident_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_ident_char(c) {
                name.push(c);
                self.advance();
            } else if c == '\\' && self.starts_escape() {
                self.advance();
                if let Some(escaped) = self.advance() {
                    name.push(escaped);
                }
            } else {
                break;
            }
        }
        name
    }

    /// Tokenize all remaining input
    pub fn tokenize_all(&mut self) -> CssResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token == Token::Eof {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Check if character can start an identifier
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || c > '\x7F'
}

/// Check if character can be part of an identifier
fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Tokenizer::new(input).tokenize_all().unwrap()
    }

    #[test]
    fn test_simple_rule() {
        let tokens = tokenize("p { color: red; }");
        assert!(matches!(tokens[0], Token::Ident(ref s) if s == "p"));
        assert!(matches!(tokens[2], Token::LeftBrace));
        assert!(matches!(tokens[4], Token::Ident(ref s) if s == "color"));
        assert!(matches!(tokens[5], Token::Colon));
        assert!(matches!(tokens[7], Token::Ident(ref s) if s == "red"));
        assert!(matches!(tokens[8], Token::Semicolon));
    }

    #[test]
    fn test_compound_selector() {
        let tokens = tokenize("p.lead.big-text");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("p".to_string()),
                Token::Delim('.'),
                Token::Ident("lead".to_string()),
                Token::Delim('.'),
                Token::Ident("big-text".to_string()),
            ]
        );
    }

    #[test]
    fn test_hash_and_at_keyword() {
        let tokens = tokenize("#main @media");
        assert!(matches!(tokens[0], Token::Hash(ref s) if s == "main"));
        assert!(matches!(tokens[2], Token::AtKeyword(ref s) if s == "media"));
    }

    #[test]
    fn test_strings() {
        let tokens = tokenize("\"a } b\" 'it\\'s'");
        assert!(matches!(tokens[0], Token::String(ref s) if s == "a } b"));
        assert!(matches!(tokens[2], Token::String(ref s) if s == "it's"));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Tokenizer::new("p { content: \"open\n }").tokenize_all().unwrap_err();
        assert!(matches!(err, CssError::UnterminatedString { location } if location.line == 1));
    }

    #[test]
    fn test_comment_is_whitespace() {
        let tokens = tokenize("p/* c */.x");
        assert_eq!(tokens[1], Token::Whitespace);
        assert_eq!(tokens[2], Token::Delim('.'));
    }

    #[test]
    fn test_leading_digit_is_delim() {
        let tokens = tokenize("10px");
        assert_eq!(tokens[0], Token::Delim('1'));
    }

    #[test]
    fn test_escaped_ident() {
        let tokens = tokenize(".sm\\:flex");
        assert!(matches!(tokens[1], Token::Ident(ref s) if s == "sm:flex"));
    }

    #[test]
    fn test_location_tracks_lines() {
        let mut tokenizer = Tokenizer::new("a\nb");
        tokenizer.tokenize_all().unwrap();
        let loc = tokenizer.location();
        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 2);
    }
}
