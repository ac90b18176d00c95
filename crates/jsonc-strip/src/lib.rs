//! JSONC preprocessing for hand-written command tables.
//!
//! Command tables are edited by people, so they are allowed to carry
//! `//` line comments, `/* ... */` block comments, and trailing commas.
//! [`strip_jsonc`] turns such input into plain JSON that `serde_json` accepts.

#![warn(missing_docs)]

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    Str,
    LineComment,
    BlockComment,
}

/// Strip comments and trailing commas from JSONC input.
///
/// String literals are copied verbatim, including escaped quotes and any
/// comment-like sequences they contain. Line comments keep their terminating
/// newline so line numbers in later JSON errors still match the source.
#[must_use]
pub fn strip_jsonc(input: &str) -> String {
    strip_trailing_commas(&strip_comments(input))
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut mode = Mode::Code;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match mode {
            Mode::Code => match (c, chars.peek()) {
                ('"', _) => {
                    mode = Mode::Str;
                    out.push(c);
                }
                ('/', Some('/')) => {
                    chars.next();
                    mode = Mode::LineComment;
                }
                ('/', Some('*')) => {
                    chars.next();
                    mode = Mode::BlockComment;
                }
                _ => out.push(c),
            },
            Mode::Str => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == '"' {
                    mode = Mode::Code;
                }
            }
            Mode::LineComment => {
                if c == '\n' {
                    out.push(c);
                    mode = Mode::Code;
                }
            }
            Mode::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    mode = Mode::Code;
                }
            }
        }
    }
    out
}

/// Drop commas whose next non-whitespace character closes an object or array.
fn strip_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_str = false;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if in_str {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_str = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_str = true;
                out.push(c);
            }
            ',' => {
                let next = input[i + 1..].chars().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}' | ']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::strip_jsonc;

    #[test]
    fn removes_both_comment_styles() {
        let input = "{\n  // the help command\n  \"name\": \"help\", /* no params */ \"params\": []\n}\n";
        let stripped = strip_jsonc(input);
        assert!(!stripped.contains("the help command"));
        assert!(!stripped.contains("no params"));
        let v: serde_json::Value = serde_json::from_str(&stripped).expect("valid json");
        assert_eq!(v["name"], "help");
    }

    #[test]
    fn keeps_comment_markers_inside_strings() {
        let input = r#"{ "help": "see https://example.com/*docs*/", "note": "// literal \" quote" }"#;
        let stripped = strip_jsonc(input);
        let v: serde_json::Value = serde_json::from_str(&stripped).expect("valid json");
        assert_eq!(v["help"], "see https://example.com/*docs*/");
        assert_eq!(v["note"], "// literal \" quote");
    }

    #[test]
    fn line_comment_keeps_newline() {
        let stripped = strip_jsonc("1 // one\n2");
        assert_eq!(stripped, "1 \n2");
    }

    #[test]
    fn drops_trailing_commas() {
        let input = "{ \"commands\": [ { \"name\": \"hug\", }, ], }";
        let stripped = strip_jsonc(input);
        let v: serde_json::Value = serde_json::from_str(&stripped).expect("valid json");
        assert_eq!(v["commands"][0]["name"], "hug");
    }

    #[test]
    fn commas_inside_strings_survive() {
        let stripped = strip_jsonc(r#"["a,]", "b"]"#);
        let v: Vec<String> = serde_json::from_str(&stripped).expect("valid json");
        assert_eq!(v, vec!["a,]".to_string(), "b".to_string()]);
    }

    #[test]
    fn unterminated_block_comment_swallows_rest() {
        assert_eq!(strip_jsonc("[1] /* open"), "[1] ");
    }
}
