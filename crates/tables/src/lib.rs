//! Command table data structures.
//!
//! Defines the declarative half of a command registry: command specs with
//! ordered, typed parameters and optional defaults, plus a word trie for
//! longest-match recognition of multi-word command names. Tables are built
//! in code or deserialized from JSON/JSONC and validated before use.

#![warn(missing_docs)]

mod trie;
mod validate;

pub use trie::NameTrieNode;
pub use validate::{TableError, load_table_from_str};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Current format version for the command table JSON schema.
pub const TABLE_FORMAT_VERSION: &str = "0.1.0";

// ─── Parameter kinds ────────────────────────────────────────────────────────

/// The declared kind of a command parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// Signed 64-bit integer.
    Int,
    /// 64-bit float.
    Float,
    /// Free text: a bareword, a quoted string, or a number's literal text.
    String,
    /// A `[a,b,c]` list of strings.
    StringList,
    /// One word out of a fixed, ordered set.
    Enum(Vec<String>),
}

impl ParamKind {
    /// Short lowercase name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::String => "string",
            ParamKind::StringList => "string list",
            ParamKind::Enum(_) => "enum",
        }
    }

    /// Enum variants, if this is an enum kind.
    pub fn variants(&self) -> Option<&[String]> {
        match self {
            ParamKind::Enum(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Argument values ────────────────────────────────────────────────────────

/// A typed positional argument handed to a command handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Integer argument.
    Int(i64),
    /// Float argument.
    Float(f64),
    /// String argument.
    Str(String),
    /// String list argument.
    StrList(Vec<String>),
    /// Enum argument, holding the matched variant.
    Enum(String),
}

impl ArgValue {
    /// Whether this value can be bound to a parameter of `kind`.
    pub fn fits(&self, kind: &ParamKind) -> bool {
        match (self, kind) {
            (ArgValue::Int(_), ParamKind::Int)
            | (ArgValue::Float(_), ParamKind::Float)
            | (ArgValue::Str(_), ParamKind::String)
            | (ArgValue::StrList(_), ParamKind::StringList) => true,
            (ArgValue::Enum(v), ParamKind::Enum(variants)) => variants.contains(v),
            _ => false,
        }
    }

    /// Convert a JSON default into a value of the given kind.
    pub fn from_json(kind: &ParamKind, value: &serde_json::Value) -> Result<Self, String> {
        let mismatch = || format!("default {value} is not a valid {kind}");
        match kind {
            ParamKind::Int => value.as_i64().map(ArgValue::Int).ok_or_else(mismatch),
            ParamKind::Float => value.as_f64().map(ArgValue::Float).ok_or_else(mismatch),
            ParamKind::String => value
                .as_str()
                .map(|s| ArgValue::Str(s.to_string()))
                .ok_or_else(mismatch),
            ParamKind::StringList => value
                .as_array()
                .and_then(|items| {
                    items
                        .iter()
                        .map(|v| v.as_str().map(str::to_string))
                        .collect::<Option<Vec<_>>>()
                })
                .map(ArgValue::StrList)
                .ok_or_else(mismatch),
            ParamKind::Enum(variants) => match value.as_str() {
                Some(s) if variants.iter().any(|v| v == s) => Ok(ArgValue::Enum(s.to_string())),
                Some(s) => Err(format!("default {s:?} is not one of: {}", variants.join(", "))),
                None => Err(mismatch()),
            },
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            ArgValue::Int(n) => (*n).into(),
            ArgValue::Float(x) => (*x).into(),
            ArgValue::Str(s) | ArgValue::Enum(s) => s.clone().into(),
            ArgValue::StrList(items) => items.clone().into(),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(n) => write!(f, "{n}"),
            ArgValue::Float(x) => write!(f, "{x}"),
            ArgValue::Str(s) | ArgValue::Enum(s) => f.write_str(s),
            ArgValue::StrList(items) => write!(f, "[{}]", items.join(",")),
        }
    }
}

// ─── Parameter and command specs ────────────────────────────────────────────

/// One declared parameter of a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParam", into = "RawParam")]
pub struct ParamSpec {
    /// Parameter name, used in error and help messages.
    pub name: String,
    /// Declared kind.
    pub kind: ParamKind,
    /// Value used when the argument is omitted. `None` makes it required.
    pub default: Option<ArgValue>,
}

impl ParamSpec {
    /// A parameter that must be supplied.
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// A parameter that falls back to `default` when omitted.
    pub fn optional(name: impl Into<String>, kind: ParamKind, default: ArgValue) -> Self {
        Self {
            name: name.into(),
            kind,
            default: Some(default),
        }
    }

    /// Whether the parameter has no default.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Wire form of [`ParamSpec`]: `{"name", "type", "variants"?, "default"?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParam {
    name: String,
    #[serde(rename = "type")]
    kind: KindTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variants: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum KindTag {
    Int,
    Float,
    String,
    StringList,
    Enum,
}

impl TryFrom<RawParam> for ParamSpec {
    type Error = String;

    fn try_from(raw: RawParam) -> Result<Self, Self::Error> {
        let kind = match (raw.kind, raw.variants) {
            (KindTag::Enum, Some(variants)) => ParamKind::Enum(variants),
            (KindTag::Enum, None) => {
                return Err(format!("enum parameter {:?} needs `variants`", raw.name));
            }
            (_, Some(_)) => {
                return Err(format!(
                    "parameter {:?}: `variants` is only valid for enum parameters",
                    raw.name
                ));
            }
            (KindTag::Int, None) => ParamKind::Int,
            (KindTag::Float, None) => ParamKind::Float,
            (KindTag::String, None) => ParamKind::String,
            (KindTag::StringList, None) => ParamKind::StringList,
        };
        let default = match raw.default {
            None | Some(serde_json::Value::Null) => None,
            Some(v) => Some(
                ArgValue::from_json(&kind, &v)
                    .map_err(|reason| format!("parameter {:?}: {reason}", raw.name))?,
            ),
        };
        Ok(ParamSpec {
            name: raw.name,
            kind,
            default,
        })
    }
}

impl From<ParamSpec> for RawParam {
    fn from(p: ParamSpec) -> Self {
        let (kind, variants) = match p.kind {
            ParamKind::Int => (KindTag::Int, None),
            ParamKind::Float => (KindTag::Float, None),
            ParamKind::String => (KindTag::String, None),
            ParamKind::StringList => (KindTag::StringList, None),
            ParamKind::Enum(v) => (KindTag::Enum, Some(v)),
        };
        RawParam {
            name: p.name,
            kind,
            variants,
            default: p.default.as_ref().map(ArgValue::to_json),
        }
    }
}

/// Declarative description of one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    /// Command name; multi-word names separate words with single spaces
    /// (e.g., `"permissions grant"`).
    pub name: String,
    /// Ordered parameter signature.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    /// One-line help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl CommandSpec {
    /// A command with no parameters and no help text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            help: None,
        }
    }

    /// Append a parameter (builder pattern).
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Set the help text (builder pattern).
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Words of the command name.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.name.split(' ')
    }
}

// ─── Command table ──────────────────────────────────────────────────────────

/// An ordered collection of command specs with cached lookup structures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandTable {
    /// Table format version for compatibility checks.
    #[serde(default = "default_format_version")]
    pub format_version: String,
    /// All commands, in declaration order.
    pub commands: Vec<CommandSpec>,

    /// Cached map from command name → index into `commands`.
    #[serde(skip)]
    name_map: OnceLock<HashMap<String, usize>>,
    /// Cached word trie over all command names.
    #[serde(skip)]
    trie: OnceLock<NameTrieNode>,
}

fn default_format_version() -> String {
    TABLE_FORMAT_VERSION.to_string()
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CommandTable {
    /// Create a table from command specs. Caches are built lazily.
    ///
    /// The table is not validated; call [`CommandTable::validate`] before
    /// relying on lookups.
    pub fn new(commands: Vec<CommandSpec>) -> Self {
        Self {
            format_version: default_format_version(),
            commands,
            name_map: OnceLock::new(),
            trie: OnceLock::new(),
        }
    }

    fn name_map(&self) -> &HashMap<String, usize> {
        self.name_map.get_or_init(|| {
            self.commands
                .iter()
                .enumerate()
                .map(|(i, c)| (c.name.clone(), i))
                .collect()
        })
    }

    /// The word trie over all command names, built on first access.
    pub fn trie(&self) -> &NameTrieNode {
        self.trie.get_or_init(|| {
            let mut root = NameTrieNode::default();
            for (i, c) in self.commands.iter().enumerate() {
                root.insert(c.words(), i);
            }
            root
        })
    }

    /// Index of the command with exactly this name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_map().get(name).copied()
    }

    /// Look up a command by its full name.
    pub fn cmd_by_name(&self, name: &str) -> Option<&CommandSpec> {
        self.index_of(name).map(|i| &self.commands[i])
    }

    /// Longest registered command made of a prefix of `words`.
    ///
    /// Returns the number of words consumed and the command's index.
    pub fn longest_prefix(&self, words: &[&str]) -> Option<(usize, usize)> {
        self.trie().longest_match(words.iter().copied())
    }

    /// Names of every command whose first word is `word`, in trie order.
    pub fn names_under(&self, word: &str) -> Vec<&str> {
        self.trie()
            .child(word)
            .map(|node| {
                node.commands()
                    .into_iter()
                    .map(|i| self.commands[i].name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All command names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|c| c.name.as_str())
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the table has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CommandTable {
        CommandTable::new(vec![
            CommandSpec::new("permissions"),
            CommandSpec::new("permissions grant")
                .param(ParamSpec::required("name", ParamKind::String))
                .param(ParamSpec::required("group", ParamKind::String)),
            CommandSpec::new("permissions list"),
            CommandSpec::new("groups members"),
        ])
    }

    #[test]
    fn longest_prefix_prefers_longer_names() {
        let t = table();
        assert_eq!(t.longest_prefix(&["permissions", "grant", "bob"]), Some((2, 1)));
        assert_eq!(t.longest_prefix(&["permissions", "revoke"]), Some((1, 0)));
        assert_eq!(t.longest_prefix(&["groups"]), None);
        assert_eq!(t.longest_prefix(&[]), None);
    }

    #[test]
    fn names_under_lists_subcommands_sorted() {
        let t = table();
        assert_eq!(
            t.names_under("permissions"),
            vec!["permissions", "permissions grant", "permissions list"]
        );
        assert_eq!(t.names_under("groups"), vec!["groups members"]);
        assert!(t.names_under("nope").is_empty());
    }

    #[test]
    fn cmd_by_name_is_exact() {
        let t = table();
        assert_eq!(t.cmd_by_name("permissions grant").unwrap().params.len(), 2);
        assert!(t.cmd_by_name("permissions gra").is_none());
    }

    #[test]
    fn param_deserializes_enum_with_default() {
        let p: ParamSpec = serde_json::from_str(
            r#"{"name":"mood","type":"enum","variants":["message","boring"],"default":"boring"}"#,
        )
        .expect("valid param");
        assert_eq!(p.kind, ParamKind::Enum(vec!["message".into(), "boring".into()]));
        assert_eq!(p.default, Some(ArgValue::Enum("boring".into())));
    }

    #[test]
    fn param_rejects_default_of_wrong_kind() {
        let err = serde_json::from_str::<ParamSpec>(r#"{"name":"n","type":"int","default":"x"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("not a valid int"), "{err}");
    }

    #[test]
    fn param_rejects_variants_on_non_enum() {
        let err = serde_json::from_str::<ParamSpec>(
            r#"{"name":"n","type":"string","variants":["a"]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("only valid for enum"), "{err}");
    }

    #[test]
    fn null_default_means_required() {
        let p: ParamSpec =
            serde_json::from_str(r#"{"name":"target","type":"string","default":null}"#).unwrap();
        assert!(p.is_required());
    }

    #[test]
    fn float_default_accepts_integer_json() {
        let p: ParamSpec =
            serde_json::from_str(r#"{"name":"x","type":"float","default":2}"#).unwrap();
        assert_eq!(p.default, Some(ArgValue::Float(2.0)));
    }

    #[test]
    fn param_serializes_back_to_wire_form() {
        let p = ParamSpec::optional(
            "tags",
            ParamKind::StringList,
            ArgValue::StrList(vec!["a".into()]),
        );
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name":"tags","type":"stringList","default":["a"]})
        );
    }

    #[test]
    fn arg_value_display() {
        assert_eq!(ArgValue::Int(3).to_string(), "3");
        assert_eq!(ArgValue::Float(1.5).to_string(), "1.5");
        assert_eq!(
            ArgValue::StrList(vec!["a".into(), "b".into()]).to_string(),
            "[a,b]"
        );
    }

    #[test]
    fn arg_value_fits_enum_only_for_known_variant() {
        let kind = ParamKind::Enum(vec!["a".into()]);
        assert!(ArgValue::Enum("a".into()).fits(&kind));
        assert!(!ArgValue::Enum("b".into()).fits(&kind));
        assert!(!ArgValue::Str("a".into()).fits(&kind));
    }
}
