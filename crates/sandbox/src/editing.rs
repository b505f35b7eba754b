//! Plain editing operations shared by both engine families. These are not
//! toolbar commands; hosts call them for typing and caret moves.

use serde_json::Value;

use editors_pick_toolbar::{CommandError, QueryError};

use crate::document::{Block, BlockKind};
use crate::registry::{CommandSpec, QuerySpec, required_str};

pub mod command {
    /// `{"index": <block index>}`
    pub const FOCUS_BLOCK: &str = "focus_block";
    /// `{"text": <string>}`, appended to the focused block.
    pub const INSERT_TEXT: &str = "insert_text";
    pub const SPLIT_BLOCK: &str = "split_block";
}

pub mod query {
    /// Serialized [`crate::SandboxDocument`].
    pub const DOCUMENT: &str = "sandbox.document";
}

pub(crate) fn commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new(command::FOCUS_BLOCK, |state, args| {
            let index = args
                .as_ref()
                .and_then(|args| args.get("index"))
                .and_then(Value::as_u64)
                .ok_or_else(|| CommandError::new("focus_block requires an `index` argument"))?;
            state.focus(index as usize)
        }),
        CommandSpec::new(command::INSERT_TEXT, |state, args| {
            let text = required_str(args.as_ref(), "text", command::INSERT_TEXT)?.to_string();
            let max_len = state.config().max_text_len;
            state.transact(|doc| {
                let block = doc.focused_text_mut()?;
                if block.text.chars().count() + text.chars().count() > max_len {
                    return Err(CommandError::new(format!(
                        "Block text is limited to {max_len} characters"
                    )));
                }
                block.text.push_str(&text);
                Ok(())
            })
        }),
        CommandSpec::new(command::SPLIT_BLOCK, |state, _args| {
            state.transact(|doc| {
                let kind = doc.focused().kind.clone();
                let empty = doc.focused().text.is_empty();
                if !kind.is_list() {
                    doc.insert_after_cursor(Block::paragraph(""));
                } else if empty {
                    // Enter on an empty list item leaves the list.
                    doc.focused_mut().kind = BlockKind::Paragraph;
                } else {
                    doc.insert_after_cursor(Block::new(kind, ""));
                }
                Ok(())
            })
        }),
    ]
}

pub(crate) fn queries() -> Vec<QuerySpec> {
    vec![QuerySpec::new(query::DOCUMENT, |state, _args| {
        serde_json::to_value(state.doc())
            .map_err(|err| QueryError::new(format!("Failed to encode document: {err}")))
    })]
}
