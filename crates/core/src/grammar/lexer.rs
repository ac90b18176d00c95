//! Lazy tokenizer for command bodies.

use std::iter::{FusedIterator, Peekable};
use std::str::CharIndices;

use super::diag::{ParseError, Span, codes};
use super::token::{Token, TokenValue};

/// Tokenize a command body lazily.
///
/// The returned iterator yields tokens left to right and stops at end of
/// input or right after the first error token. Only `' '` separates tokens;
/// any other whitespace at the top level is an unexpected character.
pub fn tokenize(input: &str) -> Tokenizer<'_> {
    Tokenizer {
        input,
        chars: input.char_indices().peekable(),
        done: false,
    }
}

/// Lazy token stream over a command body. See [`tokenize`].
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    /// Set once an error token has been emitted.
    done: bool,
}

impl<'a> Tokenizer<'a> {
    /// The full input being tokenized.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset of the next unread character.
    fn pos(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(i, _)| i)
    }

    fn error(code: &'static str, message: impl Into<String>, span: Span) -> Token {
        let err = ParseError::new(code, message, Some(span));
        Token {
            value: TokenValue::Error(err),
            span,
        }
    }

    fn dangling_escape(&self, at: usize) -> Token {
        Self::error(
            codes::DANGLING_ESCAPE,
            "Expected character to escape",
            Span::new(at, self.input.len()),
        )
    }

    // ── States ──────────────────────────────────────────────────────────

    /// Bareword: runs to the next space or end of input.
    fn flag(&mut self, start: usize) -> Token {
        while self.chars.next_if(|&(_, c)| c != ' ').is_some() {}
        let end = self.pos();
        Token {
            value: TokenValue::Flag(self.input[start..end].to_string()),
            span: Span::new(start, end),
        }
    }

    /// Quoted string; the opening quote at `start` is already consumed.
    fn string(&mut self, start: usize) -> Token {
        let mut text = String::new();
        loop {
            match self.chars.next() {
                None => {
                    return Self::error(
                        codes::UNCLOSED_STRING,
                        "Unclosed string",
                        Span::new(start, self.input.len()),
                    );
                }
                Some((i, '\\')) => match self.chars.next() {
                    Some((_, c)) => text.push(c),
                    None => return self.dangling_escape(i),
                },
                Some((i, '"')) => {
                    return Token {
                        value: TokenValue::String(text),
                        span: Span::new(start, i + 1),
                    };
                }
                Some((_, c)) => text.push(c),
            }
        }
    }

    /// Integer or decimal; the first digit at `start` is already consumed.
    fn number(&mut self, start: usize) -> Token {
        let mut seen_period = false;
        loop {
            match self.chars.peek().copied() {
                None | Some((_, ' ')) => break,
                Some((_, c)) if c.is_ascii_digit() => {
                    self.chars.next();
                }
                Some((i, '.')) if !seen_period => {
                    self.chars.next();
                    seen_period = true;
                    if self.chars.next_if(|&(_, c)| c.is_ascii_digit()).is_none() {
                        return Self::error(
                            codes::MALFORMED_NUMBER,
                            "Expected digit after period",
                            Span::new(i, i + 1),
                        );
                    }
                }
                Some((i, c)) => {
                    return Self::error(
                        codes::MALFORMED_NUMBER,
                        "Expected digit or period",
                        Span::new(i, i + c.len_utf8()),
                    );
                }
            }
        }

        let end = self.pos();
        let span = Span::new(start, end);
        let text = &self.input[start..end];
        let value = if seen_period {
            text.parse().map(TokenValue::Float).ok()
        } else {
            text.parse().map(TokenValue::Int).ok()
        };
        match value {
            Some(value) => Token { value, span },
            None => Self::error(codes::MALFORMED_NUMBER, "Integer literal out of range", span),
        }
    }

    /// `[a,b,c]` list; the opening bracket at `start` is already consumed.
    fn string_list(&mut self, start: usize) -> Token {
        let mut items = Vec::new();
        let mut current = String::new();
        loop {
            match self.chars.next() {
                None => {
                    return Self::error(
                        codes::UNCLOSED_LIST,
                        "Unclosed strarray",
                        Span::new(start, self.input.len()),
                    );
                }
                Some((i, '\\')) => match self.chars.next() {
                    Some((_, c)) => current.push(c),
                    None => return self.dangling_escape(i),
                },
                Some((_, ',')) => {
                    if !current.is_empty() {
                        items.push(std::mem::take(&mut current));
                    }
                }
                Some((i, ']')) => {
                    if !current.is_empty() {
                        items.push(current);
                    }
                    return Token {
                        value: TokenValue::StringList(items),
                        span: Span::new(start, i + 1),
                    };
                }
                Some((_, c)) => current.push(c),
            }
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = loop {
            let (start, c) = self.chars.next()?;
            break match c {
                ' ' => continue,
                c if c.is_ascii_alphabetic() => self.flag(start),
                c if c.is_ascii_digit() => self.number(start),
                '"' => self.string(start),
                '[' => self.string_list(start),
                other => Self::error(
                    codes::UNEXPECTED_CHARACTER,
                    format!("Unexpected toplevel character {other}"),
                    Span::new(start, start + other.len_utf8()),
                ),
            };
        };
        if token.is_error() {
            self.done = true;
        }
        Some(token)
    }
}

impl FusedIterator for Tokenizer<'_> {}
