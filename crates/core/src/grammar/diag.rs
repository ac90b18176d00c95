//! Re-exports of the diagnostics types used throughout the grammar.

pub use chatcmd_diagnostics::{ParseError, Span, codes, explain};
