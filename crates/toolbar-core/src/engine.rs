use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ToolbarError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct QueryError {
    message: String,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Command and query surface of an external editing engine.
///
/// Commands are keyed by logical action name and take structured JSON
/// arguments (`{"level": 1}`, `{"href": "..."}`). Queries answer "is predicate
/// P currently true" style questions. `revision` must move whenever the
/// engine's observable state changes; the toolbar uses it as the
/// state-changed notification.
pub trait Engine {
    fn run_command(&mut self, id: &str, args: Option<Value>) -> Result<(), CommandError>;

    /// Dry-run check used for enabling controls. Engines that cannot answer
    /// report every command as runnable.
    fn can_run_command(&self, id: &str, args: Option<&Value>) -> bool {
        let _ = (id, args);
        true
    }

    fn run_query_json(&self, id: &str, args: Option<Value>) -> Result<Value, QueryError>;

    fn revision(&self) -> u64;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn run_command(&mut self, id: &str, args: Option<Value>) -> Result<(), CommandError> {
        (**self).run_command(id, args)
    }

    fn can_run_command(&self, id: &str, args: Option<&Value>) -> bool {
        (**self).can_run_command(id, args)
    }

    fn run_query_json(&self, id: &str, args: Option<Value>) -> Result<Value, QueryError> {
        (**self).run_query_json(id, args)
    }

    fn revision(&self) -> u64 {
        (**self).revision()
    }
}

impl dyn Engine + '_ {
    pub fn run_query<T>(&self, id: &str, args: Option<Value>) -> Result<T, QueryError>
    where
        T: DeserializeOwned,
    {
        let value = self.run_query_json(id, args)?;
        serde_json::from_value(value)
            .map_err(|err| QueryError::new(format!("Failed to decode query result: {err}")))
    }

    /// Boolean predicate query. Errors and non-boolean answers read as `false`
    /// so a broken predicate never highlights a control.
    pub fn query_flag(&self, id: &str, args: Option<Value>) -> bool {
        match self.run_query::<bool>(id, args) {
            Ok(flag) => flag,
            Err(err) => {
                tracing::trace!(query = id, error = %err, "predicate query failed");
                false
            }
        }
    }
}

/// Single-owner capability on a mounted engine.
///
/// The handle is owned by the toolbar controller. Once unmounted every access
/// reports [`ToolbarError::EngineUnavailable`].
#[derive(Debug)]
pub struct EngineHandle<E> {
    engine: Option<E>,
}

impl<E: Engine> EngineHandle<E> {
    pub fn mount(engine: E) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    pub fn unmount(&mut self) -> Option<E> {
        self.engine.take()
    }

    pub fn get(&self) -> Result<&E, ToolbarError> {
        self.engine.as_ref().ok_or(ToolbarError::EngineUnavailable)
    }

    pub fn get_mut(&mut self) -> Result<&mut E, ToolbarError> {
        self.engine.as_mut().ok_or(ToolbarError::EngineUnavailable)
    }
}
