use serde::Serialize;

use super::diag::{ParseError, Span};

/// Classification of a token, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokKind {
    /// A bareword starting with a letter.
    Flag,
    /// A double-quoted string.
    String,
    /// An integer literal.
    Int,
    /// A decimal literal.
    Float,
    /// A `[a,b]` string list.
    StringList,
    /// A tokenizer error; always the last token of a stream.
    Error,
}

impl TokKind {
    /// Lowercase name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            TokKind::Flag => "flag",
            TokKind::String => "string",
            TokKind::Int => "int",
            TokKind::Float => "float",
            TokKind::StringList => "string list",
            TokKind::Error => "error",
        }
    }
}

impl std::fmt::Display for TokKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The payload of a token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TokenValue {
    /// Bareword text.
    Flag(String),
    /// String contents with escapes resolved.
    String(String),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// List elements with escapes resolved and empty elements dropped.
    StringList(Vec<String>),
    /// The error that stopped tokenization.
    Error(ParseError),
}

impl TokenValue {
    /// The kind of this payload.
    pub fn kind(&self) -> TokKind {
        match self {
            TokenValue::Flag(_) => TokKind::Flag,
            TokenValue::String(_) => TokKind::String,
            TokenValue::Int(_) => TokKind::Int,
            TokenValue::Float(_) => TokKind::Float,
            TokenValue::StringList(_) => TokKind::StringList,
            TokenValue::Error(_) => TokKind::Error,
        }
    }
}

/// A token together with its byte span in the command body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Token payload.
    #[serde(flatten)]
    pub value: TokenValue,
    /// Source span, including quotes and brackets.
    pub span: Span,
}

impl Token {
    /// The kind of this token.
    pub fn kind(&self) -> TokKind {
        self.value.kind()
    }

    /// Bareword text, if this is a flag.
    pub fn as_flag(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Flag(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this token is an error.
    pub fn is_error(&self) -> bool {
        matches!(self.value, TokenValue::Error(_))
    }

    /// The exact source text this token was read from.
    pub fn source<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.start..self.span.end]
    }
}
