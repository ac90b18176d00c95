//! Chat-message entry point: introducer handling and `CommandParser`.

use crate::grammar::diag::ParseError;
use crate::registry::Registry;
use crate::resolve::{Resolved, resolve};

/// Prefix that marks a chat message as a command.
pub const DEFAULT_INTRODUCER: &str = "!!/";

/// Return the command body of `message`, or `None` if it doesn't start with
/// `prefix`.
pub fn strip_introducer<'m>(message: &'m str, prefix: &str) -> Option<&'m str> {
    message.strip_prefix(prefix)
}

/// A registry paired with the introducer its messages are expected to carry.
#[derive(Debug, Clone)]
pub struct CommandParser<H> {
    registry: Registry<H>,
    introducer: String,
}

impl<H> CommandParser<H> {
    /// Wrap a registry, using [`DEFAULT_INTRODUCER`].
    pub fn new(registry: Registry<H>) -> Self {
        Self {
            registry,
            introducer: DEFAULT_INTRODUCER.to_string(),
        }
    }

    /// Replace the introducer (builder pattern).
    pub fn with_introducer(mut self, introducer: impl Into<String>) -> Self {
        self.introducer = introducer.into();
        self
    }

    /// The wrapped registry.
    pub fn registry(&self) -> &Registry<H> {
        &self.registry
    }

    /// The introducer messages must start with.
    pub fn introducer(&self) -> &str {
        &self.introducer
    }

    /// Resolve a command body (introducer already removed).
    pub fn parse(&self, body: &str) -> Result<Resolved<'_, H>, ParseError> {
        resolve(body, &self.registry)
    }

    /// Resolve a full chat message.
    ///
    /// Returns `None` when the message isn't addressed to the bot, so the
    /// caller can ignore it without replying.
    pub fn parse_message(&self, message: &str) -> Option<Result<Resolved<'_, H>, ParseError>> {
        strip_introducer(message, &self.introducer).map(|body| self.parse(body))
    }
}
