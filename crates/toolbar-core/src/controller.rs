use std::collections::HashMap;

use crate::catalog::{Catalog, EntryAction};
use crate::engine::{CommandError, Engine, EngineHandle};
use crate::error::ToolbarError;
use crate::query::{FormatState, evaluate};

/// Identity of one user gesture (a click, a key press). A control applies at
/// most once per gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gesture(u64);

impl Gesture {
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    pub fn seq(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct GestureCounter {
    next: u64,
}

impl GestureCounter {
    pub fn next(&mut self) -> Gesture {
        self.next += 1;
        Gesture(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    Dispatching,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPrompt {
    pub command_id: String,
    pub title: String,
    pub initial: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    UnknownCommand,
    Unavailable,
    Busy,
    DuplicateGesture,
    NoPendingInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Applied,
    AwaitingInput(PendingPrompt),
    Cancelled,
    Failed(ToolbarError),
    Rejected(Rejection),
    /// The engine was unmounted; the request was dropped.
    Dropped,
}

impl Activation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Activation::Applied)
    }
}

/// Owns the engine handle for a mounted editor and turns control activations
/// into engine commands, re-evaluating the toolbar state after each one.
pub struct ToolbarController<E> {
    catalog: Catalog,
    handle: EngineHandle<E>,
    state: FormatState,
    prompts: HashMap<String, PendingPrompt>,
    last_gesture: HashMap<String, Gesture>,
    seen_revision: Option<u64>,
}

impl<E: Engine> ToolbarController<E> {
    pub fn mount(catalog: Catalog, engine: E) -> Self {
        let state = FormatState::unmounted(&catalog);
        let mut this = Self {
            catalog,
            handle: EngineHandle::mount(engine),
            state,
            prompts: HashMap::new(),
            last_gesture: HashMap::new(),
            seen_revision: None,
        };
        this.refresh();
        this
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &FormatState {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.is_mounted()
    }

    pub fn engine(&self) -> Option<&E> {
        self.handle.get().ok()
    }

    pub fn control_state(&self, id: &str) -> ControlState {
        if self.prompts.contains_key(id) {
            ControlState::Dispatching
        } else {
            ControlState::Idle
        }
    }

    pub fn pending_prompt(&self, id: &str) -> Option<&PendingPrompt> {
        self.prompts.get(id)
    }

    /// Open prompts in catalog order.
    pub fn pending_prompts(&self) -> impl Iterator<Item = &PendingPrompt> {
        self.catalog
            .iter()
            .filter_map(|entry| self.prompts.get(entry.id()))
    }

    /// Re-runs the evaluate pass. An unmounted engine yields the unmounted
    /// state.
    pub fn refresh(&mut self) -> &FormatState {
        match self.handle.get() {
            Ok(engine) => {
                self.seen_revision = Some(engine.revision());
                self.state = evaluate(engine, &self.catalog);
            }
            Err(_) => {
                self.seen_revision = None;
                self.state = FormatState::unmounted(&self.catalog);
            }
        }
        &self.state
    }

    /// Engine state-changed notification. Returns whether the rendered state
    /// changed.
    pub fn notify_engine_changed(&mut self) -> bool {
        let Ok(engine) = self.handle.get() else {
            tracing::debug!("state notification after unmount dropped");
            return false;
        };
        if self.seen_revision == Some(engine.revision()) {
            return false;
        }
        let before = self.state.clone();
        self.refresh();
        before != self.state
    }

    /// Runs an editing operation that is not a toolbar command (typing,
    /// caret moves) and re-evaluates afterwards.
    pub fn update_engine<R>(&mut self, f: impl FnOnce(&mut E) -> R) -> Option<R> {
        let Ok(engine) = self.handle.get_mut() else {
            tracing::debug!("engine update after unmount dropped");
            return None;
        };
        let result = f(engine);
        self.notify_engine_changed();
        Some(result)
    }

    pub fn activate(&mut self, id: &str, gesture: Gesture) -> Activation {
        let Some(entry) = self.catalog.get(id) else {
            return Activation::Rejected(Rejection::UnknownCommand);
        };

        if self.last_gesture.get(id) == Some(&gesture) {
            tracing::debug!(command = id, gesture = gesture.seq(), "repeated gesture ignored");
            return Activation::Rejected(Rejection::DuplicateGesture);
        }
        if self.control_state(id) == ControlState::Dispatching {
            return Activation::Rejected(Rejection::Busy);
        }
        if !self.handle.is_mounted() {
            tracing::debug!(command = id, "activation after unmount dropped");
            return Activation::Dropped;
        }
        self.last_gesture.insert(id.to_string(), gesture);

        if !self.state.is_available(id) {
            return Activation::Rejected(Rejection::Unavailable);
        }

        let action = entry.action().clone();
        let is_active = self.state.is_active(id);
        match action {
            EntryAction::Run(apply) => self.dispatch(id, |engine| apply(engine)),
            EntryAction::Prompt(prompt) => {
                if is_active {
                    if let Some(on_active) = prompt.active_action().cloned() {
                        return self.dispatch(id, |engine| on_active(engine));
                    }
                }

                let initial = match self.handle.get() {
                    Ok(engine) => prompt.initial_value(engine),
                    Err(_) => None,
                };
                let pending = PendingPrompt {
                    command_id: id.to_string(),
                    title: prompt.title().to_string(),
                    initial,
                };
                tracing::debug!(command = id, "waiting for prompt input");
                self.prompts.insert(id.to_string(), pending.clone());
                Activation::AwaitingInput(pending)
            }
        }
    }

    /// Resolves an open prompt. `None` cancels and leaves the engine as it
    /// was.
    pub fn submit_input(&mut self, id: &str, input: Option<String>) -> Activation {
        if self.prompts.remove(id).is_none() {
            return Activation::Rejected(Rejection::NoPendingInput);
        }
        let Some(input) = input else {
            tracing::debug!(command = id, "prompt cancelled");
            return Activation::Cancelled;
        };
        let Some(EntryAction::Prompt(prompt)) = self.catalog.get(id).map(|e| e.action().clone())
        else {
            return Activation::Rejected(Rejection::UnknownCommand);
        };

        let input = input.trim().to_string();
        self.dispatch(id, |engine| prompt.apply(engine, &input))
    }

    pub fn unmount(&mut self) -> Option<E> {
        self.prompts.clear();
        let engine = self.handle.unmount();
        self.refresh();
        engine
    }

    fn dispatch(
        &mut self,
        id: &str,
        apply: impl FnOnce(&mut dyn Engine) -> Result<(), CommandError>,
    ) -> Activation {
        let result = match self.handle.get_mut() {
            Ok(engine) => {
                tracing::debug!(command = id, "dispatching");
                apply(engine)
            }
            Err(err) => {
                tracing::debug!(command = id, error = %err, "dispatch dropped");
                return Activation::Dropped;
            }
        };

        // The engine may have partially changed even when the command failed.
        self.refresh();

        match result {
            Ok(()) => Activation::Applied,
            Err(source) => {
                tracing::warn!(command = id, error = %source, "toolbar command failed");
                Activation::Failed(ToolbarError::CommandApplyFailed {
                    id: id.to_string(),
                    source,
                })
            }
        }
    }
}

impl<E> std::fmt::Debug for ToolbarController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolbarController")
            .field("catalog", &self.catalog)
            .field("state", &self.state)
            .field("prompts", &self.prompts)
            .finish_non_exhaustive()
    }
}
