//! Toolbar catalogs for the two supported editor families.
//!
//! Both families expose the same entry ids so toolbars can be compared side
//! by side; each catalog translates those ids into its engine's own command
//! and query vocabulary.

pub mod node_tree;
pub mod schema;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::Catalog;
use crate::engine::{CommandError, Engine};
use crate::error::CatalogError;

pub mod ids {
    pub const UNDO: &str = "undo";
    pub const REDO: &str = "redo";
    pub const PARAGRAPH: &str = "paragraph";
    pub const HEADING_1: &str = "heading-1";
    pub const HEADING_2: &str = "heading-2";
    pub const BULLET_LIST: &str = "bullet-list";
    pub const ORDERED_LIST: &str = "ordered-list";
    pub const QUOTE: &str = "quote";
    pub const CODE_BLOCK: &str = "code-block";
    pub const BOLD: &str = "bold";
    pub const ITALIC: &str = "italic";
    pub const UNDERLINE: &str = "underline";
    pub const STRIKETHROUGH: &str = "strikethrough";
    pub const CODE: &str = "code";
    pub const LINK: &str = "link";
    pub const ALIGN_LEFT: &str = "align-left";
    pub const ALIGN_CENTER: &str = "align-center";
    pub const ALIGN_RIGHT: &str = "align-right";
    pub const ALIGN_JUSTIFY: &str = "align-justify";
    pub const IMAGE: &str = "image";
    pub const HORIZONTAL_RULE: &str = "horizontal-rule";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorFamily {
    NodeTree,
    Schema,
}

impl EditorFamily {
    pub const ALL: [EditorFamily; 2] = [EditorFamily::NodeTree, EditorFamily::Schema];

    pub fn label(self) -> &'static str {
        match self {
            EditorFamily::NodeTree => "Node Tree",
            EditorFamily::Schema => "Schema",
        }
    }

    pub fn toolbar(self) -> Result<Catalog, CatalogError> {
        match self {
            EditorFamily::NodeTree => node_tree::toolbar(),
            EditorFamily::Schema => schema::toolbar(),
        }
    }
}

fn run(
    command: &'static str,
    args: Option<Value>,
) -> impl Fn(&mut dyn Engine) -> Result<(), CommandError> + Send + Sync + 'static {
    move |engine: &mut dyn Engine| engine.run_command(command, args.clone())
}

fn flag(
    query: &'static str,
    args: Option<Value>,
) -> impl Fn(&dyn Engine) -> bool + Send + Sync + 'static {
    move |engine: &dyn Engine| engine.query_flag(query, args.clone())
}

fn can_run(
    command: &'static str,
    args: Option<Value>,
) -> impl Fn(&dyn Engine) -> bool + Send + Sync + 'static {
    move |engine: &dyn Engine| engine.can_run_command(command, args.as_ref())
}
