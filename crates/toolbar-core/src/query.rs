use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::engine::Engine;

/// Result of one evaluate pass over a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatState {
    pub active_ids: BTreeSet<String>,
    pub available_ids: BTreeSet<String>,
    /// First active entry in catalog order, or the baseline entry.
    pub selected: String,
}

impl FormatState {
    /// State rendered while no engine is mounted: every control disabled,
    /// baseline selected.
    pub fn unmounted(catalog: &Catalog) -> Self {
        Self {
            active_ids: BTreeSet::new(),
            available_ids: BTreeSet::new(),
            selected: catalog.baseline().id().to_string(),
        }
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_ids.contains(id)
    }

    pub fn is_available(&self, id: &str) -> bool {
        self.available_ids.contains(id)
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }
}

/// Pure read over the engine: asks every entry for its active and available
/// predicates. Never mutates the engine.
pub fn evaluate(engine: &dyn Engine, catalog: &Catalog) -> FormatState {
    let mut active_ids = BTreeSet::new();
    let mut available_ids = BTreeSet::new();
    let mut selected: Option<&str> = None;

    for entry in catalog {
        if entry.is_active(engine) {
            active_ids.insert(entry.id().to_string());
            // Several block predicates at once is an engine inconsistency;
            // catalog order decides.
            selected.get_or_insert(entry.id());
        }
        if entry.is_available(engine) {
            available_ids.insert(entry.id().to_string());
        }
    }

    let selected = selected.unwrap_or_else(|| catalog.baseline().id()).to_string();
    tracing::trace!(
        active = active_ids.len(),
        available = available_ids.len(),
        %selected,
        "evaluated toolbar state"
    );

    FormatState {
        active_ids,
        available_ids,
        selected,
    }
}
