//! Pretty error rendering using ariadne.
//!
//! Converts a [`ParseError`] into an ariadne [`Report`] that underlines the
//! offending part of the command. Falls back to structured JSON when the
//! output is piped or when the user explicitly requests it.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use chatcmd_diagnostics::ParseError;

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or pick based on whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            // Default: pretty for interactive terminals, JSON for pipes
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render a parse error against the command body, to stderr.
///
/// Errors with a span are shown with the command text underlined; errors
/// without one are printed as a standalone message.
pub(crate) fn render_error_pretty(source: &str, filename: &str, err: &ParseError) {
    let note = context_note(err);

    let Some(span) = err.span else {
        eprintln!("error[{}]: {}", err.code, err.message);
        if let Some(note) = note {
            eprintln!("  = note: {note}");
        }
        if let Some(explanation) = err.explain() {
            eprintln!("  = help: {explanation}");
        }
        return;
    };

    // Clamp span to source length to avoid panics on truncated input.
    let start = span.start.min(source.len());
    let end = span.end.min(source.len()).max(start);

    let mut builder = Report::build(ReportKind::Error, (filename, start..end))
        .with_code(err.code.as_ref())
        .with_message(&err.message)
        .with_config(Config::default().with_compact(false))
        .with_label(
            Label::new((filename, start..end))
                .with_message(note.as_deref().unwrap_or(&err.message))
                .with_color(Color::Red),
        );

    if let Some(explanation) = err.explain() {
        builder = builder.with_help(explanation);
    }

    let mut cache = (filename, Source::from(source));
    builder.finish().eprint(&mut cache).ok();
}

/// Compact `key=value` rendering of the error context, if any.
fn context_note(err: &ParseError) -> Option<String> {
    let ctx = err.context.as_ref().filter(|c| !c.is_empty())?;
    Some(
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

// ── JSON rendering ──────────────────────────────────────────────────────

/// `{"ok": false, "error": ...}` to stdout.
pub(crate) fn render_error_json(err: &ParseError) -> serde_json::Result<()> {
    let out = serde_json::json!({ "ok": false, "error": err });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

// ── Unified entry point ─────────────────────────────────────────────────

/// Render a parse error in the given format.
///
/// - `Pretty` → coloured output to stderr.
/// - `Json`   → JSON envelope to stdout.
pub(crate) fn render_error(
    source: &str,
    filename: &str,
    err: &ParseError,
    format: Format,
) -> serde_json::Result<()> {
    match format {
        Format::Pretty => {
            render_error_pretty(source, filename, err);
            Ok(())
        }
        Format::Json => render_error_json(err),
    }
}
