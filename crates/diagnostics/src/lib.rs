//! Parse errors for the chatcmd command engine.
//!
//! Provides [`ParseError`] and [`Span`], the types every stage of command
//! parsing reports failures with. Error codes are defined in the [`codes`]
//! module and described by [`explain`].

#![warn(missing_docs)]

/// Parse error code constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Byte span in the command body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn join(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A single parse failure.
///
/// `Display` prints only the message, so the error can be relayed to a chat
/// room verbatim. The code, span, and context are for tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    /// Stable error code (e.g., `"CMD1103"`).
    pub code: Cow<'static, str>,
    /// Human-readable message, suitable as a chat reply.
    pub message: String,
    /// Byte span in the command body that the error relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable details (parameter name, expected kind, ...).
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl ParseError {
    /// Create an error with the given code, message, and span.
    pub fn new(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Attach machine-readable context (builder pattern).
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the explanation for this error's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.code)
    }
}

/// Returns a longer explanation for an error code, if known.
pub fn explain(code: &str) -> Option<&'static str> {
    let text = match code {
        codes::UNEXPECTED_CHARACTER => {
            "A token must start with a letter, a digit, a double quote, or `[`. \
             Any other character at the top level ends the parse."
        }
        codes::UNCLOSED_STRING => {
            "A double-quoted string was never closed. Add the closing `\"`, or escape \
             embedded quotes with a backslash."
        }
        codes::UNCLOSED_LIST => {
            "A `[` string list was never closed with `]`. Elements are separated by \
             commas; use a backslash to include a literal `,` or `]`."
        }
        codes::DANGLING_ESCAPE => {
            "A backslash escapes the character after it, but the input ended right \
             after the backslash."
        }
        codes::MALFORMED_NUMBER => {
            "Numbers are written as digits with at most one `.` followed by at least \
             one digit, and must be separated from the next token by a space. Integers \
             must fit in a signed 64-bit value."
        }
        codes::MISSING_COMMAND_NAME => "The command body was empty or contained only spaces.",
        codes::UNEXPECTED_COMMAND_TOKEN => {
            "A command starts with its name, written as one or more barewords. \
             Strings, numbers, and lists can only appear as arguments."
        }
        codes::UNKNOWN_COMMAND => {
            "No registered command matches the leading barewords. When other commands \
             share the first word, they are listed as suggestions; an argument that is \
             a bare word may need quotes."
        }
        codes::MISSING_ARGUMENT => {
            "The command declares a parameter without a default and no value was given \
             for it."
        }
        codes::TYPE_MISMATCH => {
            "The value's kind doesn't match the parameter. Barewords and numbers are \
             accepted for string parameters; lists must be written as `[a,b]`."
        }
        codes::INVALID_ENUM_VALUE => {
            "The parameter only accepts one of a fixed set of words. The message lists \
             the accepted values."
        }
        _ => return None,
    };
    Some(text)
}
