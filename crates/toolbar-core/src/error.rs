use thiserror::Error;

use crate::engine::CommandError;

/// Catalog assembly errors. These are programming errors in a preset, not
/// something a user can recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Duplicate command id: {0}")]
    DuplicateCommandId(String),

    #[error("Catalog has no baseline entry")]
    MissingBaseline,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolbarError {
    #[error("Command {id} failed: {source}")]
    CommandApplyFailed {
        id: String,
        #[source]
        source: CommandError,
    },

    #[error("Editing engine is no longer mounted")]
    EngineUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabError {
    #[error("Tab index {index} out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },
}
