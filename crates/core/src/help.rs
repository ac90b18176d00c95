//! Human-readable usage lines for registered commands.

use std::collections::BTreeSet;
use std::fmt::Write;

use chatcmd_tables::{CommandSpec, ParamKind, ParamSpec};

use crate::registry::Registry;

/// One-line usage for a command, as shown in chat.
///
/// Required parameters render as `<name: type>` and defaulted ones as
/// `[name: type]`. Enum types list their variants, and a defaulted enum also
/// shows its default:
///
/// ```text
/// `!!/status [mood: message|boring = message]`: I will tell you what I'm doing (maybe).
/// ```
pub fn usage(spec: &CommandSpec, prefix: &str) -> String {
    let mut out = format!("`{prefix}{}", spec.name);
    for p in &spec.params {
        out.push(' ');
        write_param(&mut out, p);
    }
    out.push('`');
    if let Some(help) = &spec.help {
        out.push_str(": ");
        out.push_str(help);
    }
    out
}

fn write_param(out: &mut String, p: &ParamSpec) {
    // Writing to a String cannot fail.
    let _ = match (&p.kind, &p.default) {
        (ParamKind::Enum(variants), Some(d)) => {
            write!(out, "[{}: {} = {d}]", p.name, variants.join("|"))
        }
        (ParamKind::Enum(variants), None) => write!(out, "<{}: {}>", p.name, variants.join("|")),
        (kind, Some(_)) => write!(out, "[{}: {kind}]", p.name),
        (kind, None) => write!(out, "<{}: {kind}>", p.name),
    };
}

/// Usage lines for every command whose first word is `word`, in trie order.
///
/// Empty when nothing is registered under `word`.
pub fn usage_under<H>(registry: &Registry<H>, word: &str, prefix: &str) -> Vec<String> {
    let table = registry.table();
    table
        .names_under(word)
        .into_iter()
        .filter_map(|name| table.cmd_by_name(name))
        .map(|spec| usage(spec, prefix))
        .collect()
}

/// Comma-separated, sorted list of top-level command words.
///
/// Multi-word commands contribute their first word once, so `groups list` and
/// `groups members` both appear as `groups`.
pub fn command_list<H>(registry: &Registry<H>) -> String {
    let words: BTreeSet<&str> = registry
        .names()
        .filter_map(|name| name.split(' ').next())
        .collect();
    words.into_iter().collect::<Vec<_>>().join(", ")
}
