//! Shared test helpers for `chatcmd_core` integration tests.

#![allow(unreachable_pub)]

use std::sync::LazyLock;

use chatcmd_core::{
    ArgValue, CommandSpec, CommandTable, ParamKind, ParamSpec, ParseError, Registry, TokenValue,
    load_table_from_str, resolve, tokenize,
};

/// The bundled command table, loaded once per test binary.
pub static BOT_TABLE: LazyLock<CommandTable> = LazyLock::new(|| {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/commands.jsonc");
    let src = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    load_table_from_str(&src).unwrap_or_else(|e| panic!("invalid {}: {}", path.display(), e))
});

/// Registry over the bundled table; each handler is the command's own name.
pub static BOT: LazyLock<Registry<String>> = LazyLock::new(|| {
    Registry::from_table(BOT_TABLE.clone(), |spec| Some(spec.name.clone()))
        .expect("bundled table binds")
});

/// A small registry declared in code, covering every parameter kind.
#[allow(dead_code)]
pub fn kinds_registry() -> Registry<&'static str> {
    Registry::builder()
        .command(
            CommandSpec::new("int").param(ParamSpec::required("n", ParamKind::Int)),
            "int",
        )
        .command(
            CommandSpec::new("float").param(ParamSpec::required("x", ParamKind::Float)),
            "float",
        )
        .command(
            CommandSpec::new("text").param(ParamSpec::required("s", ParamKind::String)),
            "text",
        )
        .command(
            CommandSpec::new("list").param(ParamSpec::required("items", ParamKind::StringList)),
            "list",
        )
        .command(
            CommandSpec::new("unknowncmd foo").param(ParamSpec::optional(
                "x",
                ParamKind::Int,
                ArgValue::Int(0),
            )),
            "foo",
        )
        .command(CommandSpec::new("unknowncmd bar"), "bar")
        .build()
        .expect("valid registry")
}

// ─── Tokenizer helpers ───────────────────────────────────────────────────────

/// Token payloads of `input`, in order.
#[allow(dead_code)]
pub fn token_values(input: &str) -> Vec<TokenValue> {
    tokenize(input).map(|t| t.value).collect()
}

/// The error token `input` ends with; panics if tokenization succeeds.
#[allow(dead_code)]
pub fn token_error(input: &str) -> ParseError {
    match tokenize(input).last().map(|t| t.value) {
        Some(TokenValue::Error(e)) => e,
        other => panic!("expected a trailing error token for {input:?}, got {other:?}"),
    }
}

// ─── Resolver helpers ────────────────────────────────────────────────────────

/// Resolve against the bundled table, returning the name and arguments.
#[allow(dead_code)]
pub fn bot_parse(input: &str) -> Result<(String, Vec<ArgValue>), ParseError> {
    resolve(input, &BOT).map(|r| (r.name.to_string(), r.args))
}

/// Resolve against the bundled table, expecting failure.
#[allow(dead_code)]
pub fn bot_error(input: &str) -> ParseError {
    match bot_parse(input) {
        Ok(ok) => panic!("expected {input:?} to fail, got {ok:?}"),
        Err(e) => e,
    }
}

/// Shorthand for a string argument.
#[allow(dead_code)]
pub fn s(text: &str) -> ArgValue {
    ArgValue::Str(text.to_string())
}
