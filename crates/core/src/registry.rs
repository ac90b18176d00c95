//! Command registry: a validated [`CommandTable`] with one handler per command.
//!
//! The registry is built once at startup and only read afterwards, so it can
//! be shared across message-handling tasks behind an `Arc` or a `&'static`.

use chatcmd_tables::{CommandSpec, CommandTable, TableError};
use tracing::debug;

/// A command's spec paired with its handler.
#[derive(Debug)]
pub struct Entry<'r, H> {
    /// Declared name, parameters, and help text.
    pub spec: &'r CommandSpec,
    /// The handler registered for this command.
    pub handler: &'r H,
}

impl<H> Clone for Entry<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Entry<'_, H> {}

/// Mapping from command name to handler and parameter signature.
///
/// `H` is opaque to the parser: a function pointer, a boxed closure, an enum
/// of command IDs, or `()` when only resolution matters.
#[derive(Debug, Clone)]
pub struct Registry<H> {
    table: CommandTable,
    /// Parallel to `table.commands`.
    handlers: Vec<H>,
}

impl<H> Registry<H> {
    /// Start declaring commands in code.
    pub fn builder() -> RegistryBuilder<H> {
        RegistryBuilder::default()
    }

    /// Bind handlers to every command of a loaded table.
    ///
    /// `bind` is called once per command in declaration order. Returning
    /// `None` fails the build with [`TableError::UnboundCommand`].
    pub fn from_table(
        table: CommandTable,
        mut bind: impl FnMut(&CommandSpec) -> Option<H>,
    ) -> Result<Self, TableError> {
        table.validate()?;
        let handlers = table
            .commands
            .iter()
            .map(|spec| bind(spec).ok_or_else(|| TableError::UnboundCommand(spec.name.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(commands = table.len(), "command registry built from table");
        Ok(Self { table, handlers })
    }

    /// Look up a command by its full name.
    pub fn lookup(&self, name: &str) -> Option<Entry<'_, H>> {
        self.table.index_of(name).map(|i| self.entry(i))
    }

    pub(crate) fn entry(&self, index: usize) -> Entry<'_, H> {
        Entry {
            spec: &self.table.commands[index],
            handler: &self.handlers[index],
        }
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_, H>> {
        (0..self.handlers.len()).map(|i| self.entry(i))
    }

    /// All command names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.names()
    }

    /// The underlying command table.
    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Builder for a [`Registry`] declared in code.
#[derive(Debug)]
pub struct RegistryBuilder<H> {
    specs: Vec<CommandSpec>,
    handlers: Vec<H>,
}

impl<H> Default for RegistryBuilder<H> {
    fn default() -> Self {
        Self {
            specs: Vec::new(),
            handlers: Vec::new(),
        }
    }
}

impl<H> RegistryBuilder<H> {
    /// Add a command and its handler.
    pub fn command(mut self, spec: CommandSpec, handler: H) -> Self {
        self.specs.push(spec);
        self.handlers.push(handler);
        self
    }

    /// Validate the declared commands and build the registry.
    pub fn build(self) -> Result<Registry<H>, TableError> {
        let table = CommandTable::new(self.specs);
        table.validate()?;
        debug!(commands = table.len(), "command registry built");
        Ok(Registry {
            table,
            handlers: self.handlers,
        })
    }
}
