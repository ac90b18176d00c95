//! Command resolution: token stream + registry → handler and typed arguments.

use chatcmd_tables::{ArgValue, CommandSpec, ParamKind, ParamSpec};
use tracing::debug;

use crate::grammar::{
    diag::{ParseError, Span, codes},
    lexer::tokenize,
    token::{TokKind, Token, TokenValue},
};
use crate::registry::Registry;

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// A successfully resolved command, ready to invoke.
#[derive(Debug)]
pub struct Resolved<'r, H> {
    /// Canonical (registered) command name.
    pub name: &'r str,
    /// Handler registered for the command.
    pub handler: &'r H,
    /// The command's declaration.
    pub spec: &'r CommandSpec,
    /// One value per declared parameter, in declaration order.
    pub args: Vec<ArgValue>,
}

/// Resolve a command body against a registry.
///
/// The command name is the longest registered prefix of the leading
/// barewords; barewords after it are positional arguments. Each declared
/// parameter then takes the next token, or its default when the input runs
/// out. Tokens left over after the last parameter are never read.
pub fn resolve<'r, H>(
    input: &str,
    registry: &'r Registry<H>,
) -> Result<Resolved<'r, H>, ParseError> {
    let result = resolve_inner(input, registry);
    match &result {
        Ok(r) => debug!(command = r.name, args = r.args.len(), "resolved command"),
        Err(e) => debug!(code = %e.code, error = %e, "command parse failed"),
    }
    result
}

fn resolve_inner<'r, H>(
    input: &str,
    registry: &'r Registry<H>,
) -> Result<Resolved<'r, H>, ParseError> {
    let mut tokens = tokenize(input).peekable();

    let first = match tokens.next() {
        None => {
            return Err(ParseError::new(
                codes::MISSING_COMMAND_NAME,
                "Expected command name",
                Some(Span::empty(input.len())),
            ));
        }
        Some(tok) if tok.kind() != TokKind::Flag => {
            return Err(ParseError::new(
                codes::UNEXPECTED_COMMAND_TOKEN,
                format!("Expected command name, got {}", tok.kind()),
                Some(tok.span),
            )
            .with_context(ctx!("actual" => tok.kind().name())));
        }
        Some(tok) => tok,
    };

    let mut head = vec![first];
    while let Some(tok) = tokens.next_if(|t| t.kind() == TokKind::Flag) {
        head.push(tok);
    }

    let matched = {
        let words: Vec<&str> = head.iter().filter_map(Token::as_flag).collect();
        match registry.table().longest_prefix(&words) {
            Some(m) => m,
            None => {
                let span = head[0].span.join(head[head.len() - 1].span);
                return Err(unknown_command(registry, &words, span));
            }
        }
    };
    let (used, index) = matched;
    let entry = registry.entry(index);

    // Barewords past the command name are ordinary arguments.
    let rest = head.split_off(used);
    let mut args = rest.into_iter().chain(tokens);

    let mut values = Vec::with_capacity(entry.spec.params.len());
    for param in &entry.spec.params {
        let value = match args.next() {
            Some(tok) => bind(input, param, tok)?,
            None => match &param.default {
                Some(default) => default.clone(),
                None => {
                    return Err(ParseError::new(
                        codes::MISSING_ARGUMENT,
                        format!("Expected a value for {}", param.name),
                        Some(Span::empty(input.len())),
                    )
                    .with_context(ctx!(
                        "command" => entry.spec.name.as_str(),
                        "param" => param.name.as_str(),
                    )));
                }
            },
        };
        values.push(value);
    }

    Ok(Resolved {
        name: &entry.spec.name,
        handler: entry.handler,
        spec: entry.spec,
        args: values,
    })
}

fn unknown_command<H>(registry: &Registry<H>, words: &[&str], span: Span) -> ParseError {
    let first = words[0];
    let suggestions = registry.table().names_under(first);
    let attempted = words.join(" ");
    if suggestions.is_empty() {
        return ParseError::new(codes::UNKNOWN_COMMAND, "Unknown command.", Some(span))
            .with_context(ctx!("command" => attempted));
    }
    let list = suggestions.join(", ");
    ParseError::new(
        codes::UNKNOWN_COMMAND,
        format!(
            "Unknown command. Perhaps you forgot some quotes? Valid subcommands of {first} are: {list}"
        ),
        Some(span),
    )
    .with_context(ctx!("command" => attempted, "suggestions" => list))
}

/// Match one token against one parameter.
fn bind(input: &str, param: &ParamSpec, tok: Token) -> Result<ArgValue, ParseError> {
    let span = tok.span;
    match (tok.value, &param.kind) {
        (TokenValue::Error(e), _) => Err(e),
        (TokenValue::Int(n), ParamKind::Int) => Ok(ArgValue::Int(n)),
        (TokenValue::Float(x), ParamKind::Float) => Ok(ArgValue::Float(x)),
        (TokenValue::Flag(s) | TokenValue::String(s), ParamKind::String) => Ok(ArgValue::Str(s)),
        // Numeric literals keep their source spelling when a string is wanted.
        (TokenValue::Int(_) | TokenValue::Float(_), ParamKind::String) => {
            Ok(ArgValue::Str(input[span.start..span.end].to_string()))
        }
        (TokenValue::StringList(items), ParamKind::StringList) => Ok(ArgValue::StrList(items)),
        (TokenValue::Flag(s) | TokenValue::String(s), ParamKind::Enum(variants))
            if variants.contains(&s) =>
        {
            Ok(ArgValue::Enum(s))
        }
        (_, ParamKind::Enum(variants)) => {
            let expected = variants.join(", ");
            Err(ParseError::new(
                codes::INVALID_ENUM_VALUE,
                format!("Invalid value for {}! Expected one of: {expected}", param.name),
                Some(span),
            )
            .with_context(ctx!(
                "param" => param.name.as_str(),
                "value" => &input[span.start..span.end],
                "expected" => expected,
            )))
        }
        (value, kind) => {
            let actual = match value.kind() {
                TokKind::Flag => TokKind::String,
                k => k,
            };
            Err(ParseError::new(
                codes::TYPE_MISMATCH,
                format!("Expected {kind} for {} but got {actual}", param.name),
                Some(span),
            )
            .with_context(ctx!(
                "param" => param.name.as_str(),
                "expected" => kind.name(),
                "actual" => actual.name(),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatcmd_tables::CommandSpec;

    fn registry() -> Registry<&'static str> {
        Registry::builder()
            .command(CommandSpec::new("permissions"), "permissions")
            .command(
                CommandSpec::new("permissions grant")
                    .param(ParamSpec::required("name", ParamKind::String))
                    .param(ParamSpec::required("group", ParamKind::String)),
                "grant",
            )
            .command(
                CommandSpec::new("issue close")
                    .param(ParamSpec::required("repo", ParamKind::String))
                    .param(ParamSpec::required("num", ParamKind::Int))
                    .param(ParamSpec::optional(
                        "body",
                        ParamKind::String,
                        ArgValue::Str(String::new()),
                    )),
                "close",
            )
            .command(
                CommandSpec::new("scale").param(ParamSpec::required("factor", ParamKind::Float)),
                "scale",
            )
            .command(
                CommandSpec::new("status").param(ParamSpec::optional(
                    "mood",
                    ParamKind::Enum(vec!["message".into(), "boring".into()]),
                    ArgValue::Enum("message".into()),
                )),
                "status",
            )
            .build()
            .expect("valid registry")
    }

    fn err(input: &str) -> ParseError {
        resolve(input, &registry()).expect_err("expected a parse error")
    }

    #[test]
    fn flags_after_the_name_are_arguments() {
        let reg = registry();
        let r = resolve("permissions grant bob admin", &reg).unwrap();
        assert_eq!(r.name, "permissions grant");
        assert_eq!(*r.handler, "grant");
        assert_eq!(
            r.args,
            vec![ArgValue::Str("bob".into()), ArgValue::Str("admin".into())]
        );
    }

    #[test]
    fn unregistered_second_word_falls_back_to_first() {
        let reg = registry();
        let r = resolve("permissions revoke", &reg).unwrap();
        assert_eq!(r.name, "permissions");
        assert!(r.args.is_empty());
    }

    #[test]
    fn defaults_fill_missing_tail() {
        let reg = registry();
        let r = resolve("issue close vyxal 12", &reg).unwrap();
        assert_eq!(
            r.args,
            vec![
                ArgValue::Str("vyxal".into()),
                ArgValue::Int(12),
                ArgValue::Str(String::new())
            ]
        );
    }

    #[test]
    fn numeric_literal_binds_to_string_as_written() {
        let reg = registry();
        let r = resolve("permissions grant 007 1.50", &reg).unwrap();
        assert_eq!(
            r.args,
            vec![ArgValue::Str("007".into()), ArgValue::Str("1.50".into())]
        );
    }

    #[test]
    fn type_mismatch_reports_declared_and_actual() {
        let e = err("issue close vyxal twelve");
        assert_eq!(e.code, codes::TYPE_MISMATCH);
        assert_eq!(e.message, "Expected int for num but got string");
        assert_eq!(e.span, Some(Span::new(18, 24)));

        let e = err("scale 2");
        assert_eq!(e.message, "Expected float for factor but got int");
    }

    #[test]
    fn enum_values_match_variant_text() {
        let reg = registry();
        let r = resolve("status boring", &reg).unwrap();
        assert_eq!(r.args, vec![ArgValue::Enum("boring".into())]);
        let r = resolve("status \"boring\"", &reg).unwrap();
        assert_eq!(r.args, vec![ArgValue::Enum("boring".into())]);
        let r = resolve("status", &reg).unwrap();
        assert_eq!(r.args, vec![ArgValue::Enum("message".into())]);

        let e = err("status Boring");
        assert_eq!(e.code, codes::INVALID_ENUM_VALUE);
        assert_eq!(e.message, "Invalid value for mood! Expected one of: message, boring");
        let e = err("status 3");
        assert_eq!(e.code, codes::INVALID_ENUM_VALUE);
    }

    #[test]
    fn leading_token_must_be_a_flag() {
        let e = err("\"permissions\"");
        assert_eq!(e.code, codes::UNEXPECTED_COMMAND_TOKEN);
        assert_eq!(e.message, "Expected command name, got string");
        let e = err("  ");
        assert_eq!(e.code, codes::MISSING_COMMAND_NAME);
        assert_eq!(e.message, "Expected command name");
    }

    #[test]
    fn tokenizer_error_in_head_is_not_a_command_name() {
        let e = err("!status");
        assert_eq!(e.code, codes::UNEXPECTED_COMMAND_TOKEN);
        assert_eq!(e.message, "Expected command name, got error");
        assert_eq!(e.span, Some(Span::new(0, 1)));
    }

    #[test]
    fn tokenizer_error_in_arguments_is_propagated() {
        let e = err("issue close \"vyxal");
        assert_eq!(e.code, codes::UNCLOSED_STRING);
    }

    #[test]
    fn leftover_tokens_are_not_read() {
        let reg = registry();
        let r = resolve("scale 1.5 extra \"unclosed", &reg).unwrap();
        assert_eq!(r.args, vec![ArgValue::Float(1.5)]);
    }

    #[test]
    fn unknown_command_without_relatives() {
        let e = err("frobnicate now");
        assert_eq!(e.code, codes::UNKNOWN_COMMAND);
        assert_eq!(e.message, "Unknown command.");
        assert_eq!(e.span, Some(Span::new(0, 14)));
    }

    #[test]
    fn unknown_subcommand_lists_siblings() {
        let e = err("issue reopen");
        assert_eq!(
            e.message,
            "Unknown command. Perhaps you forgot some quotes? Valid subcommands of issue are: issue close"
        );
        let ctx = e.context.unwrap();
        assert_eq!(ctx["command"], "issue reopen");
    }

    #[test]
    fn missing_argument_names_parameter() {
        let e = err("permissions grant bob");
        assert_eq!(e.code, codes::MISSING_ARGUMENT);
        assert_eq!(e.message, "Expected a value for group");
        assert_eq!(e.context.unwrap()["param"], "group");
    }
}
