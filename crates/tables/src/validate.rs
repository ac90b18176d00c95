use std::collections::HashSet;

use thiserror::Error;

use crate::{ArgValue, CommandSpec, CommandTable};

/// Errors that can occur when loading or validating a command table.
#[derive(Debug, Error)]
pub enum TableError {
    /// JSON deserialization failed.
    #[error("invalid command table JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A command name can't be produced by the tokenizer.
    #[error("invalid command name {name:?}: {reason}")]
    InvalidName {
        /// The offending name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Two commands share a name.
    #[error("duplicate command name {0:?}")]
    DuplicateCommand(String),

    /// A parameter declaration is inconsistent.
    #[error("command {command:?}, parameter {param:?}: {reason}")]
    InvalidParam {
        /// Command declaring the parameter.
        command: String,
        /// Parameter name.
        param: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A command in the table has no handler.
    #[error("command {0:?} has no handler bound")]
    UnboundCommand(String),
}

/// Load and validate a [`CommandTable`] from JSON or JSONC.
///
/// Comments and trailing commas are stripped first. See
/// [`CommandTable::validate`] for the checks applied afterwards.
pub fn load_table_from_str(s: &str) -> Result<CommandTable, TableError> {
    let stripped = chatcmd_jsonc_strip::strip_jsonc(s);
    let table: CommandTable = serde_json::from_str(&stripped)?;
    table.validate()?;
    Ok(table)
}

impl CommandTable {
    /// Check the structural rules every table must satisfy:
    /// - each name is one or more words joined by single spaces, and every
    ///   word starts with an ASCII letter
    /// - names are unique
    /// - parameter names are non-empty and unique within a command
    /// - enum parameters have a non-empty list of unique, non-empty variants
    /// - defaults match their parameter's kind
    /// - no required parameter follows a parameter with a default
    pub fn validate(&self) -> Result<(), TableError> {
        let mut seen = HashSet::new();
        for cmd in &self.commands {
            validate_name(&cmd.name)?;
            if !seen.insert(cmd.name.as_str()) {
                return Err(TableError::DuplicateCommand(cmd.name.clone()));
            }
            validate_params(cmd)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), TableError> {
    let invalid = |reason: &str| TableError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    for word in name.split(' ') {
        let Some(first) = word.chars().next() else {
            return Err(invalid("words must be separated by exactly one space"));
        };
        if !first.is_ascii_alphabetic() {
            return Err(invalid("every word must start with an ASCII letter"));
        }
    }
    Ok(())
}

fn validate_params(cmd: &CommandSpec) -> Result<(), TableError> {
    let mut names = HashSet::new();
    let mut seen_default = None;
    for p in &cmd.params {
        let invalid = |reason: String| TableError::InvalidParam {
            command: cmd.name.clone(),
            param: p.name.clone(),
            reason,
        };
        if p.name.is_empty() {
            return Err(invalid("name must not be empty".into()));
        }
        if !names.insert(p.name.as_str()) {
            return Err(invalid("declared more than once".into()));
        }
        if let Some(variants) = p.kind.variants() {
            if variants.is_empty() {
                return Err(invalid("enum needs at least one variant".into()));
            }
            let mut vs = HashSet::new();
            for v in variants {
                if v.is_empty() {
                    return Err(invalid("enum variants must not be empty".into()));
                }
                if !vs.insert(v.as_str()) {
                    return Err(invalid(format!("duplicate enum variant {v:?}")));
                }
            }
        }
        match &p.default {
            Some(d) if !d.fits(&p.kind) => {
                return Err(invalid(format!(
                    "default {} does not match declared kind {}",
                    describe(d),
                    p.kind
                )));
            }
            Some(_) => seen_default = Some(p.name.as_str()),
            None => {
                if let Some(prev) = seen_default {
                    return Err(invalid(format!(
                        "required parameter follows parameter {prev:?} which has a default"
                    )));
                }
            }
        }
    }
    Ok(())
}

fn describe(v: &ArgValue) -> String {
    match v {
        ArgValue::Str(s) | ArgValue::Enum(s) => format!("{s:?}"),
        other => other.to_string(),
    }
}
