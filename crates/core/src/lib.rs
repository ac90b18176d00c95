//! Chat command engine.
//!
//! Turns the text of a chat command (`permissions grant bob admin`) into the
//! registered command it names plus typed positional arguments. The main
//! entry points are [`tokenize`] for the token stream, [`resolve`] for
//! resolution against a [`Registry`], and [`CommandParser`] for whole chat
//! messages carrying the `!!/` introducer.

#![warn(missing_docs)]

/// Command grammar: tokenizer, tokens, and diagnostics.
pub mod grammar;
/// Usage lines and command lists for help replies.
pub mod help;
/// Introducer handling and the message-level parser.
pub mod parser;
/// Handler registry over a command table.
pub mod registry;
/// Token stream → command + arguments.
pub mod resolve;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Tokenizer
pub use grammar::lexer::{Tokenizer, tokenize};
pub use grammar::token::{TokKind, Token, TokenValue};

// Resolution
pub use parser::{CommandParser, DEFAULT_INTRODUCER, strip_introducer};
pub use resolve::{Resolved, resolve};

// Registry
pub use registry::{Entry, Registry, RegistryBuilder};

// Help
pub use help::{command_list, usage, usage_under};

// Diagnostics (re-exported from the diagnostics crate)
pub use grammar::diag::{ParseError, Span, codes, explain};

// Tables (re-exported from the tables crate)
pub use chatcmd_tables::{
    ArgValue, CommandSpec, CommandTable, ParamKind, ParamSpec, TableError, load_table_from_str,
};
