mod catalog;
mod controller;
mod dropdown;
mod engine;
mod error;
pub mod presets;
mod query;
mod tabs;

pub use catalog::{
    ApplyFn, Catalog, CommandEntry, EntryAction, EntryGroup, IconKey, InputApplyFn, PredicateFn,
    PrefillFn, PromptAction,
};
pub use controller::{
    Activation, ControlState, Gesture, GestureCounter, PendingPrompt, Rejection,
    ToolbarController,
};
pub use dropdown::BlockTypeMenu;
pub use engine::{CommandError, Engine, EngineHandle, QueryError};
pub use error::{CatalogError, TabError, ToolbarError};
pub use presets::EditorFamily;
pub use query::{FormatState, evaluate};
pub use tabs::{TabShell, TabSubscription};
