use crate::catalog::{Catalog, CommandEntry, EntryGroup};
use crate::controller::{Activation, Gesture, ToolbarController};
use crate::engine::Engine;
use crate::error::CatalogError;
use crate::query::evaluate;

/// Block-type menu over the mutually exclusive entries of a toolbar catalog
/// (paragraph, headings, lists, quote, code block).
///
/// `selected` is only ever derived from an evaluate pass, so the menu never
/// shows a block type the engine did not confirm.
#[derive(Debug, Clone)]
pub struct BlockTypeMenu {
    catalog: Catalog,
    open: bool,
    selected: usize,
}

impl BlockTypeMenu {
    pub fn new(toolbar: &Catalog) -> Result<Self, CatalogError> {
        Ok(Self::from_catalog(toolbar.filtered(EntryGroup::BlockType)?))
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        let selected = catalog.position(catalog.baseline().id()).unwrap_or(0);
        Self {
            catalog,
            open: false,
            selected,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn entries(&self) -> &[CommandEntry] {
        self.catalog.entries()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn selected(&self) -> &CommandEntry {
        &self.catalog.entries()[self.selected]
    }

    /// Recomputes the selected entry from the controller's engine. Without a
    /// mounted engine the baseline entry is selected.
    pub fn sync<E: Engine>(&mut self, controller: &ToolbarController<E>) {
        let selected_id = match controller.engine() {
            Some(engine) => evaluate(engine, &self.catalog).selected,
            None => self.catalog.baseline().id().to_string(),
        };
        if let Some(ix) = self.catalog.position(&selected_id) {
            self.selected = ix;
        }
    }

    pub fn select<E: Engine>(
        &mut self,
        controller: &mut ToolbarController<E>,
        id: &str,
        gesture: Gesture,
    ) -> Activation {
        let activation = if self.catalog.get(id).is_some() {
            controller.activate(id, gesture)
        } else {
            Activation::Rejected(crate::controller::Rejection::UnknownCommand)
        };
        self.close();
        self.sync(controller);
        activation
    }
}
