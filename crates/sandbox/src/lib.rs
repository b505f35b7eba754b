//! In-memory editing engines for both toolbar families. They keep a flat
//! list of blocks with block-wide marks, enough to drive every toolbar
//! command end to end without a real rich-text engine.

mod config;
mod document;
pub mod editing;
mod node_tree;
mod registry;
mod schema;
mod state;

use editors_pick_toolbar::{EditorFamily, Engine};
use tracing_subscriber::{EnvFilter, fmt};

pub use config::SandboxConfig;
pub use document::{Align, Block, BlockKind, Mark, Marks, SandboxDocument};
pub use node_tree::NodeTreeEngine;
pub use registry::{CommandSpec, QuerySpec, Registry, RegistryError};
pub use schema::SchemaEngine;
pub use state::EditorState;

/// Fresh engine for `family`, on that family's seed document.
pub fn engine_for(
    family: EditorFamily,
    config: SandboxConfig,
) -> Result<Box<dyn Engine>, RegistryError> {
    Ok(match family {
        EditorFamily::NodeTree => Box::new(NodeTreeEngine::new(config)?),
        EditorFamily::Schema => Box::new(SchemaEngine::new(config)?),
    })
}

/// Like [`engine_for`], starting from `doc` instead of the seed.
pub fn engine_with_document(
    family: EditorFamily,
    doc: SandboxDocument,
    config: SandboxConfig,
) -> Result<Box<dyn Engine>, RegistryError> {
    Ok(match family {
        EditorFamily::NodeTree => Box::new(NodeTreeEngine::with_document(doc, config)?),
        EditorFamily::Schema => Box::new(SchemaEngine::with_document(doc, config)?),
    })
}

/// Test log output. Safe to call multiple times.
pub fn init_test_tracing() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("editors_pick=debug")),
        )
        .with_test_writer()
        .try_init();
}
