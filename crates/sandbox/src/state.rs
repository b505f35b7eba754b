use editors_pick_toolbar::CommandError;

use crate::config::SandboxConfig;
use crate::document::SandboxDocument;

/// Document plus snapshot history. Every observable change bumps `revision`.
#[derive(Debug, Clone)]
pub struct EditorState {
    doc: SandboxDocument,
    config: SandboxConfig,
    undo_stack: Vec<SandboxDocument>,
    redo_stack: Vec<SandboxDocument>,
    revision: u64,
}

impl EditorState {
    pub fn new(doc: SandboxDocument, config: SandboxConfig) -> Self {
        Self {
            doc,
            config: config.with_defaults(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            revision: 0,
        }
    }

    pub fn doc(&self) -> &SandboxDocument {
        &self.doc
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Copy for dry runs. Only the top of each history stack is kept, which
    /// is all a single command can consume.
    pub fn probe(&self) -> Self {
        Self {
            doc: self.doc.clone(),
            config: self.config,
            undo_stack: self.undo_stack.last().cloned().into_iter().collect(),
            redo_stack: self.redo_stack.last().cloned().into_iter().collect(),
            revision: self.revision,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Applies `f` to a copy of the document. On error nothing changes; an
    /// edit that leaves the document as it was records no history.
    pub fn transact(
        &mut self,
        f: impl FnOnce(&mut SandboxDocument) -> Result<(), CommandError>,
    ) -> Result<(), CommandError> {
        let mut next = self.doc.clone();
        f(&mut next)?;
        if next == self.doc {
            return Ok(());
        }

        let previous = std::mem::replace(&mut self.doc, next);
        self.undo_stack.push(previous);
        if self.undo_stack.len() > self.config.max_undo {
            self.undo_stack.remove(0);
            tracing::trace!(max_undo = self.config.max_undo, "dropped oldest undo entry");
        }
        self.redo_stack.clear();
        self.revision += 1;
        Ok(())
    }

    /// Caret moves are not undoable.
    pub fn focus(&mut self, index: usize) -> Result<(), CommandError> {
        if index == self.doc.cursor() {
            return Ok(());
        }
        self.doc.set_cursor(index)?;
        self.revision += 1;
        Ok(())
    }

    pub fn undo(&mut self) -> Result<(), CommandError> {
        let Some(previous) = self.undo_stack.pop() else {
            return Err(CommandError::new("Nothing to undo"));
        };
        let current = std::mem::replace(&mut self.doc, previous);
        self.redo_stack.push(current);
        self.revision += 1;
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), CommandError> {
        let Some(next) = self.redo_stack.pop() else {
            return Err(CommandError::new("Nothing to redo"));
        };
        let current = std::mem::replace(&mut self.doc, next);
        self.undo_stack.push(current);
        self.revision += 1;
        Ok(())
    }
}
