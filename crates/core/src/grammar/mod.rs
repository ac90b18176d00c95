/// Re-exports from the diagnostics crate.
pub mod diag;
/// Command tokenizer: a character state machine over the command body.
pub mod lexer;
/// Token types produced by the tokenizer.
pub mod token;
