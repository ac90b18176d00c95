//! Parse error code constants.
//!
//! Codes are grouped by the stage that produces them: `CMD10xx` for the
//! tokenizer, `CMD11xx` for command-name resolution, and `CMD12xx` for
//! argument matching. Use these instead of string literals.

/// A character that cannot start any token appeared at the top level.
pub const UNEXPECTED_CHARACTER: &str = "CMD1001";

/// A quoted string reached end of input without its closing quote.
pub const UNCLOSED_STRING: &str = "CMD1002";

/// A `[...]` string list reached end of input without its closing bracket.
pub const UNCLOSED_LIST: &str = "CMD1003";

/// A backslash appeared as the last character of the input.
pub const DANGLING_ESCAPE: &str = "CMD1004";

/// A number literal is malformed or out of range.
pub const MALFORMED_NUMBER: &str = "CMD1005";

/// The input contained no tokens at all.
pub const MISSING_COMMAND_NAME: &str = "CMD1101";

/// The first token was not a bareword.
pub const UNEXPECTED_COMMAND_TOKEN: &str = "CMD1102";

/// No registered command matches the leading barewords.
pub const UNKNOWN_COMMAND: &str = "CMD1103";

/// A parameter without a default received no value.
pub const MISSING_ARGUMENT: &str = "CMD1201";

/// A token's kind doesn't match the declared parameter kind.
pub const TYPE_MISMATCH: &str = "CMD1202";

/// A value for an enum parameter is not one of its variants.
pub const INVALID_ENUM_VALUE: &str = "CMD1203";

/// Every code defined in this module, in numeric order.
pub const ALL: &[&str] = &[
    UNEXPECTED_CHARACTER,
    UNCLOSED_STRING,
    UNCLOSED_LIST,
    DANGLING_ESCAPE,
    MALFORMED_NUMBER,
    MISSING_COMMAND_NAME,
    UNEXPECTED_COMMAND_TOKEN,
    UNKNOWN_COMMAND,
    MISSING_ARGUMENT,
    TYPE_MISMATCH,
    INVALID_ENUM_VALUE,
];
