use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use editors_pick_toolbar::{CommandError, QueryError};

use crate::state::EditorState;

pub type CommandHandler =
    Arc<dyn Fn(&mut EditorState, Option<Value>) -> Result<(), CommandError> + Send + Sync>;
pub type QueryHandler =
    Arc<dyn Fn(&EditorState, Option<Value>) -> Result<Value, QueryError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Duplicate command id: {0}")]
    DuplicateCommand(String),
    #[error("Duplicate query id: {0}")]
    DuplicateQuery(String),
}

#[derive(Clone)]
pub struct CommandSpec {
    pub id: String,
    pub handler: CommandHandler,
}

impl CommandSpec {
    pub fn new(
        id: impl Into<String>,
        handler: impl Fn(&mut EditorState, Option<Value>) -> Result<(), CommandError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            handler: Arc::new(handler),
        }
    }
}

#[derive(Clone)]
pub struct QuerySpec {
    pub id: String,
    pub handler: QueryHandler,
}

impl QuerySpec {
    pub fn new(
        id: impl Into<String>,
        handler: impl Fn(&EditorState, Option<Value>) -> Result<Value, QueryError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            handler: Arc::new(handler),
        }
    }
}

/// Command and query tables of one engine family.
#[derive(Clone, Default)]
pub struct Registry {
    commands: HashMap<String, CommandSpec>,
    queries: HashMap<String, QuerySpec>,
}

impl Registry {
    pub fn new(
        commands: impl IntoIterator<Item = CommandSpec>,
        queries: impl IntoIterator<Item = QuerySpec>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for command in commands {
            registry.register_command(command)?;
        }
        for query in queries {
            registry.register_query(query)?;
        }
        Ok(registry)
    }

    pub fn register_command(&mut self, command: CommandSpec) -> Result<(), RegistryError> {
        if self.commands.contains_key(&command.id) {
            return Err(RegistryError::DuplicateCommand(command.id));
        }
        self.commands.insert(command.id.clone(), command);
        Ok(())
    }

    pub fn register_query(&mut self, query: QuerySpec) -> Result<(), RegistryError> {
        if self.queries.contains_key(&query.id) {
            return Err(RegistryError::DuplicateQuery(query.id));
        }
        self.queries.insert(query.id.clone(), query);
        Ok(())
    }

    pub fn has_command(&self, id: &str) -> bool {
        self.commands.contains_key(id)
    }

    pub fn run_command(
        &self,
        state: &mut EditorState,
        id: &str,
        args: Option<Value>,
    ) -> Result<(), CommandError> {
        let Some(command) = self.commands.get(id) else {
            tracing::debug!(command = id, "unknown command");
            return Err(CommandError::new(format!("Unknown command: {id}")));
        };
        (command.handler)(state, args)
    }

    pub fn run_query(
        &self,
        state: &EditorState,
        id: &str,
        args: Option<Value>,
    ) -> Result<Value, QueryError> {
        let Some(query) = self.queries.get(id) else {
            return Err(QueryError::new(format!("Unknown query: {id}")));
        };
        (query.handler)(state, args)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut commands: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        commands.sort_unstable();
        let mut queries: Vec<&str> = self.queries.keys().map(String::as_str).collect();
        queries.sort_unstable();
        f.debug_struct("Registry")
            .field("commands", &commands)
            .field("queries", &queries)
            .finish()
    }
}

pub(crate) fn str_arg<'a>(args: Option<&'a Value>, key: &str) -> Option<&'a str> {
    args?.get(key)?.as_str()
}

pub(crate) fn required_str<'a>(
    args: Option<&'a Value>,
    key: &str,
    command: &str,
) -> Result<&'a str, CommandError> {
    str_arg(args, key)
        .ok_or_else(|| CommandError::new(format!("{command} requires a string `{key}` argument")))
}
