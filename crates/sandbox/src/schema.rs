use std::sync::Arc;

use serde_json::{Value, json};

use editors_pick_toolbar::presets::schema::{command, names, query};
use editors_pick_toolbar::{CommandError, Engine, QueryError};

use crate::config::SandboxConfig;
use crate::document::{Align, Block, BlockKind, Mark, SandboxDocument};
use crate::editing;
use crate::registry::{CommandSpec, QuerySpec, Registry, RegistryError, required_str, str_arg};
use crate::state::EditorState;

/// In-memory engine speaking the schema family's vocabulary. Commands either
/// apply completely or not at all, so `can_run_command` is a dry run on a
/// probe copy of the state.
#[derive(Debug, Clone)]
pub struct SchemaEngine {
    state: EditorState,
    registry: Arc<Registry>,
}

impl SchemaEngine {
    /// Starts on the lorem-ipsum seed document.
    pub fn new(config: SandboxConfig) -> Result<Self, RegistryError> {
        Self::with_document(SandboxDocument::lorem(), config)
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

impl Engine for SchemaEngine {
    fn run_command(&mut self, id: &str, args: Option<Value>) -> Result<(), CommandError> {
        self.registry.run_command(&mut self.state, id, args)
    }

    fn can_run_command(&self, id: &str, args: Option<&Value>) -> bool {
        if MARK_COMMANDS.contains(&id) && !marks_allowed(self.state.doc()) {
            return false;
        }
        let mut probe = self.state.probe();
        self.registry
            .run_command(&mut probe, id, args.cloned())
            .is_ok()
    }

    fn run_query_json(&self, id: &str, args: Option<Value>) -> Result<Value, QueryError> {
        self.registry.run_query(&self.state, id, args)
    }

    fn revision(&self) -> u64 {
        self.state.revision()
    }
}

pub fn registry() -> Result<Registry, RegistryError> {
    let mut commands = vec![
        CommandSpec::new(command::UNDO, |state, _| state.undo()),
        CommandSpec::new(command::REDO, |state, _| state.redo()),
        CommandSpec::new(command::SET_PARAGRAPH, |state, _| {
            state.transact(|doc| {
                doc.focused_text_mut()?.kind = BlockKind::Paragraph;
                Ok(())
            })
        }),
        CommandSpec::new(command::TOGGLE_HEADING, |state, args| {
            let level = args
                .as_ref()
                .and_then(|args| args.get("level"))
                .and_then(Value::as_u64)
                .filter(|level| (1..=6).contains(level))
                .ok_or_else(|| {
                    CommandError::new("toggle_heading requires a level between 1 and 6")
                })?;
            toggle_block(state, BlockKind::Heading { level: level as u8 })
        }),
        CommandSpec::new(command::TOGGLE_BULLET_LIST, |state, _| {
            toggle_block(state, BlockKind::BulletItem)
        }),
        CommandSpec::new(command::TOGGLE_ORDERED_LIST, |state, _| {
            toggle_block(state, BlockKind::OrderedItem)
        }),
        CommandSpec::new(command::TOGGLE_BLOCKQUOTE, |state, _| {
            toggle_block(state, BlockKind::Quote)
        }),
        CommandSpec::new(command::TOGGLE_CODE_BLOCK, |state, _| {
            toggle_block(state, BlockKind::CodeBlock)
        }),
        CommandSpec::new(command::TOGGLE_BOLD, |state, _| toggle_mark(state, Mark::Bold)),
        CommandSpec::new(command::TOGGLE_ITALIC, |state, _| toggle_mark(state, Mark::Italic)),
        CommandSpec::new(command::TOGGLE_UNDERLINE, |state, _| {
            toggle_mark(state, Mark::Underline)
        }),
        CommandSpec::new(command::TOGGLE_STRIKE, |state, _| {
            toggle_mark(state, Mark::Strikethrough)
        }),
        CommandSpec::new(command::TOGGLE_CODE, |state, _| toggle_mark(state, Mark::Code)),
        CommandSpec::new(command::SET_LINK, |state, args| {
            let href = required_str(args.as_ref(), "href", command::SET_LINK)?;
            if href.is_empty() || href.chars().any(char::is_whitespace) {
                return Err(CommandError::new(format!("Invalid link href: {href:?}")));
            }
            let href = href.to_string();
            state.transact(|doc| {
                if let Some(block) = markable(doc) {
                    block.link = Some(href);
                }
                Ok(())
            })
        }),
        CommandSpec::new(command::UNSET_LINK, |state, _| {
            state.transact(|doc| {
                doc.focused_mut().link = None;
                Ok(())
            })
        }),
        CommandSpec::new(command::SET_TEXT_ALIGN, |state, args| {
            let value = required_str(args.as_ref(), "align", command::SET_TEXT_ALIGN)?;
            let align = Align::parse(value)
                .ok_or_else(|| CommandError::new(format!("Unknown alignment: {value}")))?;
            state.transact(|doc| {
                let block = doc.focused_text_mut()?;
                // Alignment is configured for headings and paragraphs.
                if !matches!(block.kind, BlockKind::Paragraph | BlockKind::Heading { .. }) {
                    return Err(CommandError::new("Alignment is not supported for this block"));
                }
                block.align = Some(align);
                Ok(())
            })
        }),
        CommandSpec::new(command::SET_IMAGE, |state, args| {
            let src = required_str(args.as_ref(), "src", command::SET_IMAGE)?.trim().to_string();
            if src.is_empty() {
                return Err(CommandError::new("Image source must not be empty"));
            }
            state.transact(|doc| {
                doc.insert_after_cursor(Block::new(BlockKind::Image { src }, ""));
                doc.insert_after_cursor(Block::paragraph(""));
                Ok(())
            })
        }),
        CommandSpec::new(command::SET_HORIZONTAL_RULE, |state, _| {
            state.transact(|doc| {
                doc.insert_after_cursor(Block::new(BlockKind::HorizontalRule, ""));
                doc.insert_after_cursor(Block::paragraph(""));
                Ok(())
            })
        }),
    ];
    commands.extend(editing::commands());

    let mut queries = vec![
        QuerySpec::new(query::IS_ACTIVE, |state, args| {
            Ok(Value::Bool(is_active(state.doc().focused(), args.as_ref())))
        }),
        QuerySpec::new(query::ATTRIBUTES, |state, args| {
            let block = state.doc().focused();
            let attrs = match str_arg(args.as_ref(), "name") {
                Some(names::LINK) => match &block.link {
                    Some(href) => json!({ "href": href }),
                    None => json!({}),
                },
                Some(names::HEADING) => match block.kind {
                    BlockKind::Heading { level } => json!({ "level": level }),
                    _ => json!({}),
                },
                Some(_) => json!({}),
                None => return Err(QueryError::new("attributes requires a `name` argument")),
            };
            Ok(attrs)
        }),
    ];
    queries.extend(editing::queries());

    Registry::new(commands, queries)
}

/// Toggling a block type the caret is already in returns it to a paragraph.
fn toggle_block(state: &mut EditorState, kind: BlockKind) -> Result<(), CommandError> {
    state.transact(|doc| {
        let block = doc.focused_text_mut()?;
        if block.kind == kind {
            block.kind = BlockKind::Paragraph;
            return Ok(());
        }
        if kind == BlockKind::CodeBlock {
            // Code blocks hold plain text only.
            block.marks = Default::default();
            block.link = None;
            block.align = None;
        }
        block.kind = kind;
        Ok(())
    })
}

/// Mark commands run as no-ops where marks are not allowed, so availability
/// is answered up front instead of by the dry run.
const MARK_COMMANDS: [&str; 6] = [
    command::TOGGLE_BOLD,
    command::TOGGLE_ITALIC,
    command::TOGGLE_UNDERLINE,
    command::TOGGLE_STRIKE,
    command::TOGGLE_CODE,
    command::SET_LINK,
];

/// Void blocks and code blocks take no marks or links.
fn marks_allowed(doc: &SandboxDocument) -> bool {
    let block = doc.focused();
    !block.is_void() && block.kind != BlockKind::CodeBlock
}

fn markable(doc: &mut SandboxDocument) -> Option<&mut Block> {
    if marks_allowed(doc) {
        Some(doc.focused_mut())
    } else {
        None
    }
}

fn toggle_mark(state: &mut EditorState, mark: Mark) -> Result<(), CommandError> {
    state.transact(|doc| {
        if let Some(block) = markable(doc) {
            block.marks.toggle(mark);
        }
        Ok(())
    })
}

fn block_name(kind: &BlockKind) -> &'static str {
    match kind {
        BlockKind::Paragraph => names::PARAGRAPH,
        BlockKind::Heading { .. } => names::HEADING,
        BlockKind::BulletItem => names::BULLET_LIST,
        BlockKind::OrderedItem => names::ORDERED_LIST,
        BlockKind::Quote => names::BLOCKQUOTE,
        BlockKind::CodeBlock => names::CODE_BLOCK,
        BlockKind::HorizontalRule => "horizontalRule",
        BlockKind::Image { .. } => "image",
    }
}

fn mark_by_name(name: &str) -> Option<Mark> {
    match name {
        names::BOLD => Some(Mark::Bold),
        names::ITALIC => Some(Mark::Italic),
        names::UNDERLINE => Some(Mark::Underline),
        names::STRIKE => Some(Mark::Strikethrough),
        names::CODE => Some(Mark::Code),
        _ => None,
    }
}

fn is_active(block: &Block, args: Option<&Value>) -> bool {
    let name = str_arg(args, "name");
    let attrs = args.and_then(|args| args.get("attrs")).and_then(Value::as_object);

    let name_matches = match name {
        None => true,
        Some(names::LINK) => block.link.is_some(),
        Some(name) => match mark_by_name(name) {
            Some(mark) => block.marks.has(mark),
            None => block_name(&block.kind) == name,
        },
    };
    if !name_matches {
        return false;
    }

    let Some(attrs) = attrs else {
        return name.is_some();
    };
    attrs.iter().all(|(key, expected)| match key.as_str() {
        "level" => match block.kind {
            BlockKind::Heading { level } => expected.as_u64() == Some(u64::from(level)),
            _ => false,
        },
        "textAlign" => {
            !block.is_void()
                && expected.as_str() == Some(block.effective_align().as_str())
        }
        "href" => block.link.as_deref() == expected.as_str(),
        _ => false,
    })
}
