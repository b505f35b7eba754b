//! Toolbar for the node-tree engine family: dispatched commands with a
//! payload (`format_text`, `set_block_type`) and selection queries.

use serde_json::{Value, json};

use super::{flag, ids, run};
use crate::catalog::{Catalog, CommandEntry, EntryGroup, IconKey, PromptAction};
use crate::engine::{CommandError, Engine};
use crate::error::CatalogError;

pub mod command {
    pub const UNDO: &str = "undo";
    pub const REDO: &str = "redo";
    /// `{"type": <block type>}`
    pub const SET_BLOCK_TYPE: &str = "set_block_type";
    /// `{"format": <text format>}`, toggles.
    pub const FORMAT_TEXT: &str = "format_text";
    /// `{"align": "left" | "center" | "right" | "justify"}`
    pub const FORMAT_ELEMENT: &str = "format_element";
    /// `{"url": <string> | null}`; null removes the link.
    pub const TOGGLE_LINK: &str = "toggle_link";
}

pub mod query {
    pub const BLOCK_TYPE: &str = "selection.block_type";
    pub const HAS_FORMAT: &str = "selection.has_format";
    pub const IS_LINK: &str = "selection.is_link";
    pub const LINK_URL: &str = "selection.link_url";
    pub const ELEMENT_FORMAT: &str = "selection.element_format";
    pub const CAN_UNDO: &str = "history.can_undo";
    pub const CAN_REDO: &str = "history.can_redo";
}

pub mod block_types {
    pub const PARAGRAPH: &str = "paragraph";
    pub const H1: &str = "h1";
    pub const H2: &str = "h2";
    pub const BULLET: &str = "bullet";
    pub const NUMBER: &str = "number";
    pub const QUOTE: &str = "quote";
    pub const CODE: &str = "code";
}

pub mod formats {
    pub const BOLD: &str = "bold";
    pub const ITALIC: &str = "italic";
    pub const UNDERLINE: &str = "underline";
    pub const STRIKETHROUGH: &str = "strikethrough";
    pub const CODE: &str = "code";
}

const URL_PROMPT: &str = "URL";
const DEFAULT_URL: &str = "https://";

fn current_block_type(engine: &dyn Engine) -> Option<String> {
    engine.run_query::<String>(query::BLOCK_TYPE, None).ok()
}

fn set_block_type(engine: &mut dyn Engine, block_type: &str) -> Result<(), CommandError> {
    engine.run_command(command::SET_BLOCK_TYPE, Some(json!({ "type": block_type })))
}

fn block(id: &str, label: &str, icon: IconKey, block_type: &'static str) -> CommandEntry {
    CommandEntry::new(id, label, icon, move |engine: &mut dyn Engine| {
        set_block_type(engine, block_type)
    })
    .group(EntryGroup::BlockType)
    .active_when(move |engine: &dyn Engine| {
        current_block_type(engine).as_deref() == Some(block_type)
    })
}

/// Lists toggle: choosing the list the caret is already in turns it back
/// into a paragraph.
fn list(id: &str, label: &str, icon: IconKey, block_type: &'static str) -> CommandEntry {
    CommandEntry::new(id, label, icon, move |engine: &mut dyn Engine| {
        if current_block_type(engine).as_deref() == Some(block_type) {
            set_block_type(engine, block_types::PARAGRAPH)
        } else {
            set_block_type(engine, block_type)
        }
    })
    .group(EntryGroup::BlockType)
    .active_when(move |engine: &dyn Engine| {
        current_block_type(engine).as_deref() == Some(block_type)
    })
}

fn text_format(id: &str, label: &str, icon: IconKey, format: &'static str) -> CommandEntry {
    CommandEntry::new(
        id,
        label,
        icon,
        run(command::FORMAT_TEXT, Some(json!({ "format": format }))),
    )
    .group(EntryGroup::Mark)
    .active_when(flag(query::HAS_FORMAT, Some(json!({ "format": format }))))
}

fn align(id: &str, label: &str, icon: IconKey, value: &'static str) -> CommandEntry {
    CommandEntry::new(
        id,
        label,
        icon,
        run(command::FORMAT_ELEMENT, Some(json!({ "align": value }))),
    )
    .group(EntryGroup::Align)
    .active_when(move |engine: &dyn Engine| {
        let current = engine
            .run_query::<String>(query::ELEMENT_FORMAT, None)
            .unwrap_or_default();
        // Unformatted elements render left aligned.
        let current = if current.is_empty() { "left" } else { current.as_str() };
        current == value
    })
}

fn link() -> CommandEntry {
    let prompt = PromptAction::new(URL_PROMPT, |engine: &mut dyn Engine, url: &str| {
        if url.is_empty() {
            return Ok(());
        }
        engine.run_command(command::TOGGLE_LINK, Some(json!({ "url": url })))
    })
    .prefill(|engine: &dyn Engine| {
        let current = engine
            .run_query::<Option<String>>(query::LINK_URL, None)
            .ok()
            .flatten();
        Some(current.unwrap_or_else(|| DEFAULT_URL.to_string()))
    })
    .on_active(run(command::TOGGLE_LINK, Some(json!({ "url": Value::Null }))));

    CommandEntry::prompt(ids::LINK, "Insert Link", IconKey::Link, prompt)
        .group(EntryGroup::Mark)
        .active_when(flag(query::IS_LINK, None))
}

pub fn toolbar() -> Result<Catalog, CatalogError> {
    Catalog::new([
        CommandEntry::new(ids::UNDO, "Undo", IconKey::Undo, run(command::UNDO, None))
            .group(EntryGroup::History)
            .available_when(flag(query::CAN_UNDO, None)),
        CommandEntry::new(ids::REDO, "Redo", IconKey::Redo, run(command::REDO, None))
            .group(EntryGroup::History)
            .available_when(flag(query::CAN_REDO, None)),
        block(
            ids::PARAGRAPH,
            "Normal",
            IconKey::Paragraph,
            block_types::PARAGRAPH,
        )
        .baseline(),
        block(
            ids::HEADING_1,
            "Large Heading",
            IconKey::LargeHeading,
            block_types::H1,
        ),
        block(
            ids::HEADING_2,
            "Small Heading",
            IconKey::SmallHeading,
            block_types::H2,
        ),
        list(
            ids::BULLET_LIST,
            "Bullet List",
            IconKey::BulletList,
            block_types::BULLET,
        ),
        list(
            ids::ORDERED_LIST,
            "Numbered List",
            IconKey::NumberedList,
            block_types::NUMBER,
        ),
        block(ids::QUOTE, "Quote", IconKey::Quote, block_types::QUOTE),
        block(ids::CODE_BLOCK, "Code Block", IconKey::Code, block_types::CODE),
        text_format(ids::BOLD, "Format Bold", IconKey::Bold, formats::BOLD),
        text_format(ids::ITALIC, "Format Italics", IconKey::Italic, formats::ITALIC),
        text_format(
            ids::UNDERLINE,
            "Format Underline",
            IconKey::Underline,
            formats::UNDERLINE,
        ),
        text_format(
            ids::STRIKETHROUGH,
            "Format Strikethrough",
            IconKey::Strikethrough,
            formats::STRIKETHROUGH,
        ),
        text_format(ids::CODE, "Insert Code", IconKey::InlineCode, formats::CODE),
        link(),
        align(ids::ALIGN_LEFT, "Left Align", IconKey::LeftAlign, "left"),
        align(ids::ALIGN_CENTER, "Center Align", IconKey::CenterAlign, "center"),
        align(ids::ALIGN_RIGHT, "Right Align", IconKey::RightAlign, "right"),
        align(ids::ALIGN_JUSTIFY, "Justify Align", IconKey::JustifyAlign, "justify"),
    ])
}
