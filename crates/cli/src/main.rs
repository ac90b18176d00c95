mod render;

use std::fs;
use std::process;

use anyhow::{Context, Result};
use chatcmd_core::{
    ArgValue, CommandParser, CommandTable, DEFAULT_INTRODUCER, Registry, TokenValue, command_list,
    load_table_from_str, strip_introducer, tokenize, usage, usage_under,
};
use chatcmd_diagnostics as diag;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::render::{Format, render_error};

// ── Embedded table ──────────────────────────────────────────────────────

/// Command table baked into the binary at compile time.
/// Present when `data/commands.jsonc` existed during `cargo build`.
#[cfg(has_embedded_table)]
const EMBEDDED_TABLE_JSONC: &str = include_str!(concat!(env!("OUT_DIR"), "/commands.jsonc"));

/// Label used for the command text in rendered errors.
const SOURCE_NAME: &str = "<command>";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "chatcmd",
    version,
    about = "Parse chat bot commands against a command table",
    disable_help_subcommand = true
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log filter for diagnostics on stderr (e.g. "debug",
    /// "chatcmd_core=trace"). Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Resolve a command and print its name and typed arguments.
    Parse {
        /// Command body, e.g. `permissions grant bob admin`.
        command: String,
        /// Path to a command table (JSON or JSONC). When omitted, uses the
        /// table embedded at compile time.
        #[arg(long)]
        table: Option<String>,
        /// Treat the input as a full chat message that must start with this
        /// introducer (e.g. `!!/`).
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Print the token stream of a command body.
    Tokens { command: String },

    /// Show usage for a command, or list all commands.
    Help {
        /// Command name or first word of a command group.
        name: Option<String>,
        /// Path to a command table (see `parse --help`).
        #[arg(long)]
        table: Option<String>,
    },

    /// Validate a command table file.
    CheckTable { path: String },

    /// Explain an error code (e.g. CMD1103).
    Explain { code: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Parse {
            command,
            table,
            prefix,
        } => cmd_parse(&command, table.as_deref(), prefix.as_deref(), format)?,
        Cmd::Tokens { command } => cmd_tokens(&command, format)?,
        Cmd::Help { name, table } => cmd_help(name.as_deref(), table.as_deref(), format)?,
        Cmd::CheckTable { path } => cmd_check_table(&path, format)?,
        Cmd::Explain { code } => cmd_explain(&code, format)?,
    }

    Ok(())
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(
    input: &str,
    table_path: Option<&str>,
    prefix: Option<&str>,
    format: Format,
) -> Result<()> {
    let registry = load_registry(table_path)?;
    let parser =
        CommandParser::new(registry).with_introducer(prefix.unwrap_or(DEFAULT_INTRODUCER));

    // Without --prefix the input is already a command body.
    let body = match prefix {
        None => input,
        Some(_) => match strip_introducer(input, parser.introducer()) {
            Some(body) => body,
            None => {
                match format {
                    Format::Json => {
                        let out = serde_json::json!({
                            "ok": false,
                            "ignored": true,
                            "introducer": parser.introducer(),
                        });
                        println!("{}", serde_json::to_string_pretty(&out)?);
                    }
                    Format::Pretty => eprintln!(
                        "not a command: message does not start with {:?}",
                        parser.introducer()
                    ),
                }
                process::exit(1);
            }
        },
    };

    let resolved = match parser.parse(body) {
        Ok(resolved) => resolved,
        Err(err) => {
            render_error(body, SOURCE_NAME, &err, format)?;
            process::exit(1);
        }
    };
    let bound = resolved.spec.params.iter().zip(&resolved.args);

    match format {
        Format::Json => {
            let args: Vec<_> = bound
                .map(|(p, v)| {
                    serde_json::json!({ "name": p.name, "type": p.kind.name(), "value": v })
                })
                .collect();
            let out = serde_json::json!({
                "ok": true,
                "command": resolved.name,
                "args": args,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            println!("{}", resolved.name);
            for (p, v) in bound {
                println!("  {}: {} = {}", p.name, p.kind, show_arg(v));
            }
        }
    }
    Ok(())
}

fn cmd_tokens(input: &str, format: Format) -> Result<()> {
    let tokens: Vec<_> = tokenize(input).collect();

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&tokens)?),
        Format::Pretty => {
            for tok in &tokens {
                let shown = match &tok.value {
                    TokenValue::Flag(s) | TokenValue::String(s) => format!("{s:?}"),
                    TokenValue::Int(n) => n.to_string(),
                    TokenValue::Float(x) => x.to_string(),
                    TokenValue::StringList(items) => format!("{items:?}"),
                    TokenValue::Error(_) => continue,
                };
                println!(
                    "{:>3}..{:<3} {:<11} {shown}",
                    tok.span.start,
                    tok.span.end,
                    tok.kind().name()
                );
            }
        }
    }

    if let Some(TokenValue::Error(err)) = tokens.last().map(|t| &t.value) {
        if format == Format::Pretty {
            render_error(input, SOURCE_NAME, err, format)?;
        }
        process::exit(1);
    }
    Ok(())
}

fn cmd_help(name: Option<&str>, table_path: Option<&str>, format: Format) -> Result<()> {
    let registry = load_registry(table_path)?;

    let lines = match name {
        None => vec![format!("Commands: {}", command_list(&registry))],
        Some(name) => match registry.lookup(name) {
            Some(entry) => vec![usage(entry.spec, DEFAULT_INTRODUCER)],
            None => usage_under(&registry, name, DEFAULT_INTRODUCER),
        },
    };
    let found = !lines.is_empty();

    match format {
        Format::Json => {
            let out = serde_json::json!({ "ok": found, "lines": lines });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty if found => {
            for line in &lines {
                println!("{line}");
            }
        }
        Format::Pretty => eprintln!("No help is available for that command."),
    }

    if !found {
        process::exit(1);
    }
    Ok(())
}

fn cmd_check_table(path: &str, format: Format) -> Result<()> {
    let src = fs::read_to_string(path)
        .with_context(|| format!("failed to read table file '{path}'"))?;
    let result = load_table_from_str(&src);

    match (&result, format) {
        (Ok(table), Format::Json) => {
            let out = serde_json::json!({ "ok": true, "commands": table.len() });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        (Ok(table), Format::Pretty) => eprintln!("table ok: {} commands", table.len()),
        (Err(e), Format::Json) => {
            let out = serde_json::json!({ "ok": false, "error": e.to_string() });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        (Err(e), Format::Pretty) => eprintln!("error: {path}: {e}"),
    }

    if result.is_err() {
        process::exit(1);
    }
    Ok(())
}

fn cmd_explain(code: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "code": code,
                "explanation": diag::explain(code),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanation is the expected output, so it goes to stdout.
            if let Some(text) = diag::explain(code) {
                use ariadne::Fmt;
                println!("{}: {}", code.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{code}: (no explanation available)");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn show_arg(value: &ArgValue) -> String {
    match value {
        ArgValue::Str(s) => format!("{s:?}"),
        ArgValue::StrList(items) => format!("{items:?}"),
        other => other.to_string(),
    }
}

/// Load the command table from (in priority order):
///   1. Explicit `--table` path
///   2. The table embedded at compile time
fn resolve_table(explicit_path: Option<&str>) -> Result<CommandTable> {
    if let Some(path) = explicit_path {
        let src = fs::read_to_string(path)
            .with_context(|| format!("failed to read table file '{path}'"))?;
        return load_table_from_str(&src).with_context(|| format!("invalid table file '{path}'"));
    }
    embedded_table()
}

#[cfg(has_embedded_table)]
fn embedded_table() -> Result<CommandTable> {
    load_table_from_str(EMBEDDED_TABLE_JSONC).context("embedded command table is invalid")
}

#[cfg(not(has_embedded_table))]
fn embedded_table() -> Result<CommandTable> {
    anyhow::bail!("no command table embedded in this build; pass --table <PATH>")
}

/// Registry with unit handlers: the CLI only reports resolutions.
fn load_registry(table_path: Option<&str>) -> Result<Registry<()>> {
    let table = resolve_table(table_path)?;
    debug!(commands = table.len(), "loaded command table");
    Ok(Registry::from_table(table, |_| Some(()))?)
}
