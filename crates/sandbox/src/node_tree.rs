use std::sync::Arc;

use serde_json::Value;

use editors_pick_toolbar::presets::node_tree::{block_types, command, formats, query};
use editors_pick_toolbar::{CommandError, Engine, QueryError};

use crate::config::SandboxConfig;
use crate::document::{Align, BlockKind, Mark, SandboxDocument};
use crate::editing;
use crate::registry::{CommandSpec, QuerySpec, Registry, RegistryError, required_str};
use crate::state::EditorState;

/// In-memory engine speaking the node-tree family's vocabulary: payload
/// commands plus selection and history queries. It cannot dry-run, so every
/// command reports as runnable.
#[derive(Debug, Clone)]
pub struct NodeTreeEngine {
    state: EditorState,
    registry: Arc<Registry>,
}

impl NodeTreeEngine {
    /// Starts on an empty document.
    pub fn new(config: SandboxConfig) -> Result<Self, RegistryError> {
        Self::with_document(SandboxDocument::empty(), config)
    }

    pub fn with_document(
        doc: SandboxDocument,
        config: SandboxConfig,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            state: EditorState::new(doc, config),
            registry: Arc::new(registry()?),
        })
    }

    pub fn document(&self) -> &SandboxDocument {
        self.state.doc()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
}

impl Engine for NodeTreeEngine {
    fn run_command(&mut self, id: &str, args: Option<Value>) -> Result<(), CommandError> {
        self.registry.run_command(&mut self.state, id, args)
    }

    fn run_query_json(&self, id: &str, args: Option<Value>) -> Result<Value, QueryError> {
        self.registry.run_query(&self.state, id, args)
    }

    fn revision(&self) -> u64 {
        self.state.revision()
    }
}

fn parse_block_type(value: &str) -> Option<BlockKind> {
    let kind = match value {
        block_types::PARAGRAPH => BlockKind::Paragraph,
        block_types::BULLET => BlockKind::BulletItem,
        block_types::NUMBER => BlockKind::OrderedItem,
        block_types::QUOTE => BlockKind::Quote,
        block_types::CODE => BlockKind::CodeBlock,
        heading => {
            let level = heading.strip_prefix('h')?.parse::<u8>().ok()?;
            if !(1..=6).contains(&level) {
                return None;
            }
            BlockKind::Heading { level }
        }
    };
    Some(kind)
}

fn block_type_name(kind: &BlockKind) -> String {
    match kind {
        BlockKind::Paragraph => block_types::PARAGRAPH.to_string(),
        BlockKind::Heading { level } => format!("h{level}"),
        BlockKind::BulletItem => block_types::BULLET.to_string(),
        BlockKind::OrderedItem => block_types::NUMBER.to_string(),
        BlockKind::Quote => block_types::QUOTE.to_string(),
        BlockKind::CodeBlock => block_types::CODE.to_string(),
        BlockKind::HorizontalRule => "horizontalrule".to_string(),
        BlockKind::Image { .. } => "image".to_string(),
    }
}

fn parse_format(value: &str) -> Option<Mark> {
    match value {
        formats::BOLD => Some(Mark::Bold),
        formats::ITALIC => Some(Mark::Italic),
        formats::UNDERLINE => Some(Mark::Underline),
        formats::STRIKETHROUGH => Some(Mark::Strikethrough),
        formats::CODE => Some(Mark::Code),
        _ => None,
    }
}

pub fn registry() -> Result<Registry, RegistryError> {
    let mut commands = vec![
        CommandSpec::new(command::UNDO, |state, _| state.undo()),
        CommandSpec::new(command::REDO, |state, _| state.redo()),
        CommandSpec::new(command::SET_BLOCK_TYPE, |state, args| {
            let value = required_str(args.as_ref(), "type", command::SET_BLOCK_TYPE)?;
            let kind = parse_block_type(value)
                .ok_or_else(|| CommandError::new(format!("Unknown block type: {value}")))?;
            state.transact(|doc| {
                let block = doc.focused_text_mut()?;
                if kind == BlockKind::CodeBlock {
                    block.marks = Default::default();
                }
                block.kind = kind;
                Ok(())
            })
        }),
        CommandSpec::new(command::FORMAT_TEXT, |state, args| {
            let value = required_str(args.as_ref(), "format", command::FORMAT_TEXT)?;
            let mark = parse_format(value)
                .ok_or_else(|| CommandError::new(format!("Unknown text format: {value}")))?;
            state.transact(|doc| {
                let block = doc.focused_text_mut()?;
                // Code blocks ignore text formatting.
                if block.kind != BlockKind::CodeBlock {
                    block.marks.toggle(mark);
                }
                Ok(())
            })
        }),
        CommandSpec::new(command::FORMAT_ELEMENT, |state, args| {
            let value = required_str(args.as_ref(), "align", command::FORMAT_ELEMENT)?;
            let align = Align::parse(value)
                .ok_or_else(|| CommandError::new(format!("Unknown alignment: {value}")))?;
            state.transact(|doc| {
                doc.focused_text_mut()?.align = Some(align);
                Ok(())
            })
        }),
        CommandSpec::new(command::TOGGLE_LINK, |state, args| {
            let url = args
                .as_ref()
                .and_then(|args| args.get("url"))
                .and_then(Value::as_str)
                .map(str::trim)
                .map(str::to_string);
            if url.as_deref() == Some("") {
                return Err(CommandError::new("Link url must not be empty"));
            }
            state.transact(|doc| {
                doc.focused_text_mut()?.link = url;
                Ok(())
            })
        }),
    ];
    commands.extend(editing::commands());

    let mut queries = vec![
        QuerySpec::new(query::BLOCK_TYPE, |state, _| {
            Ok(Value::String(block_type_name(&state.doc().focused().kind)))
        }),
        QuerySpec::new(query::HAS_FORMAT, |state, args| {
            let value = args
                .as_ref()
                .and_then(|args| args.get("format"))
                .and_then(Value::as_str)
                .ok_or_else(|| QueryError::new("has_format requires a `format` argument"))?;
            let mark = parse_format(value)
                .ok_or_else(|| QueryError::new(format!("Unknown text format: {value}")))?;
            Ok(Value::Bool(state.doc().focused().marks.has(mark)))
        }),
        QuerySpec::new(query::IS_LINK, |state, _| {
            Ok(Value::Bool(state.doc().focused().link.is_some()))
        }),
        QuerySpec::new(query::LINK_URL, |state, _| {
            Ok(match &state.doc().focused().link {
                Some(url) => Value::String(url.clone()),
                None => Value::Null,
            })
        }),
        QuerySpec::new(query::ELEMENT_FORMAT, |state, _| {
            let format = state
                .doc()
                .focused()
                .align
                .map(Align::as_str)
                .unwrap_or_default();
            Ok(Value::String(format.to_string()))
        }),
        QuerySpec::new(query::CAN_UNDO, |state, _| Ok(Value::Bool(state.can_undo()))),
        QuerySpec::new(query::CAN_REDO, |state, _| Ok(Value::Bool(state.can_redo()))),
    ];
    queries.extend(editing::queries());

    Registry::new(commands, queries)
}
