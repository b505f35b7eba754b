//! Toolbar for the schema-based engine family: chainable commands such as
//! `toggle_heading {level}` and an `is_active {name, attrs}` query.

use serde_json::json;

use super::{can_run, flag, ids, run};
use crate::catalog::{Catalog, CommandEntry, EntryGroup, IconKey, PromptAction};
use crate::engine::Engine;
use crate::error::CatalogError;

pub mod command {
    pub const UNDO: &str = "undo";
    pub const REDO: &str = "redo";
    pub const SET_PARAGRAPH: &str = "set_paragraph";
    pub const TOGGLE_HEADING: &str = "toggle_heading";
    pub const TOGGLE_BULLET_LIST: &str = "toggle_bullet_list";
    pub const TOGGLE_ORDERED_LIST: &str = "toggle_ordered_list";
    pub const TOGGLE_BLOCKQUOTE: &str = "toggle_blockquote";
    pub const TOGGLE_CODE_BLOCK: &str = "toggle_code_block";
    pub const TOGGLE_BOLD: &str = "toggle_bold";
    pub const TOGGLE_ITALIC: &str = "toggle_italic";
    pub const TOGGLE_UNDERLINE: &str = "toggle_underline";
    pub const TOGGLE_STRIKE: &str = "toggle_strike";
    pub const TOGGLE_CODE: &str = "toggle_code";
    pub const SET_LINK: &str = "set_link";
    pub const UNSET_LINK: &str = "unset_link";
    pub const SET_TEXT_ALIGN: &str = "set_text_align";
    pub const SET_IMAGE: &str = "set_image";
    pub const SET_HORIZONTAL_RULE: &str = "set_horizontal_rule";
}

pub mod query {
    /// `{"name": <node or mark>, "attrs": {..}}`; either key may be omitted.
    pub const IS_ACTIVE: &str = "is_active";
    /// `{"name": <mark>}` -> attribute object of the mark at the selection.
    pub const ATTRIBUTES: &str = "attributes";
}

pub mod names {
    pub const PARAGRAPH: &str = "paragraph";
    pub const HEADING: &str = "heading";
    pub const BULLET_LIST: &str = "bulletList";
    pub const ORDERED_LIST: &str = "orderedList";
    pub const BLOCKQUOTE: &str = "blockquote";
    pub const CODE_BLOCK: &str = "codeBlock";
    pub const BOLD: &str = "bold";
    pub const ITALIC: &str = "italic";
    pub const UNDERLINE: &str = "underline";
    pub const STRIKE: &str = "strike";
    pub const CODE: &str = "code";
    pub const LINK: &str = "link";
}

const URL_PROMPT: &str = "URL";

fn is_active(name: &'static str) -> impl Fn(&dyn Engine) -> bool + Send + Sync + 'static {
    flag(query::IS_ACTIVE, Some(json!({ "name": name })))
}

fn block(
    id: &str,
    label: &str,
    icon: IconKey,
    command: &'static str,
    node: &'static str,
) -> CommandEntry {
    CommandEntry::new(id, label, icon, run(command, None))
        .group(EntryGroup::BlockType)
        .active_when(is_active(node))
}

fn heading(id: &str, label: &str, icon: IconKey, level: u8) -> CommandEntry {
    CommandEntry::new(
        id,
        label,
        icon,
        run(command::TOGGLE_HEADING, Some(json!({ "level": level }))),
    )
    .group(EntryGroup::BlockType)
    .active_when(flag(
        query::IS_ACTIVE,
        Some(json!({ "name": names::HEADING, "attrs": { "level": level } })),
    ))
}

fn mark(
    id: &str,
    label: &str,
    icon: IconKey,
    command: &'static str,
    name: &'static str,
) -> CommandEntry {
    CommandEntry::new(id, label, icon, run(command, None))
        .group(EntryGroup::Mark)
        .active_when(is_active(name))
        .available_when(can_run(command, None))
}

fn align(id: &str, label: &str, icon: IconKey, value: &'static str) -> CommandEntry {
    CommandEntry::new(
        id,
        label,
        icon,
        run(command::SET_TEXT_ALIGN, Some(json!({ "align": value }))),
    )
    .group(EntryGroup::Align)
    .active_when(flag(
        query::IS_ACTIVE,
        Some(json!({ "attrs": { "textAlign": value } })),
    ))
}

fn link() -> CommandEntry {
    let prompt = PromptAction::new(URL_PROMPT, |engine: &mut dyn Engine, url: &str| {
        if url.is_empty() {
            return engine.run_command(command::UNSET_LINK, None);
        }
        engine.run_command(command::SET_LINK, Some(json!({ "href": url })))
    })
    .prefill(|engine: &dyn Engine| {
        engine
            .run_query::<serde_json::Value>(query::ATTRIBUTES, Some(json!({ "name": names::LINK })))
            .ok()
            .and_then(|attrs| attrs.get("href").and_then(|v| v.as_str()).map(str::to_string))
    })
    .on_active(run(command::UNSET_LINK, None));

    CommandEntry::prompt(ids::LINK, "Insert Link", IconKey::Link, prompt)
        .group(EntryGroup::Mark)
        .active_when(is_active(names::LINK))
}

fn image() -> CommandEntry {
    let prompt = PromptAction::new(URL_PROMPT, |engine: &mut dyn Engine, url: &str| {
        if url.is_empty() {
            return Ok(());
        }
        engine.run_command(command::SET_IMAGE, Some(json!({ "src": url })))
    });

    CommandEntry::prompt(ids::IMAGE, "Add Image", IconKey::Image, prompt).group(EntryGroup::Insert)
}

pub fn toolbar() -> Result<Catalog, CatalogError> {
    Catalog::new([
        CommandEntry::new(ids::UNDO, "Undo", IconKey::Undo, run(command::UNDO, None))
            .group(EntryGroup::History)
            .available_when(can_run(command::UNDO, None)),
        CommandEntry::new(ids::REDO, "Redo", IconKey::Redo, run(command::REDO, None))
            .group(EntryGroup::History)
            .available_when(can_run(command::REDO, None)),
        block(
            ids::PARAGRAPH,
            "Paragraph",
            IconKey::Paragraph,
            command::SET_PARAGRAPH,
            names::PARAGRAPH,
        )
        .baseline(),
        heading(ids::HEADING_1, "Large Heading", IconKey::LargeHeading, 1),
        heading(ids::HEADING_2, "Small Heading", IconKey::SmallHeading, 2),
        block(
            ids::BULLET_LIST,
            "Bullet List",
            IconKey::BulletList,
            command::TOGGLE_BULLET_LIST,
            names::BULLET_LIST,
        ),
        block(
            ids::ORDERED_LIST,
            "Ordered List",
            IconKey::NumberedList,
            command::TOGGLE_ORDERED_LIST,
            names::ORDERED_LIST,
        ),
        block(
            ids::QUOTE,
            "Quote",
            IconKey::Quote,
            command::TOGGLE_BLOCKQUOTE,
            names::BLOCKQUOTE,
        ),
        block(
            ids::CODE_BLOCK,
            "Code Block",
            IconKey::Code,
            command::TOGGLE_CODE_BLOCK,
            names::CODE_BLOCK,
        ),
        mark(ids::BOLD, "Format Bold", IconKey::Bold, command::TOGGLE_BOLD, names::BOLD),
        mark(
            ids::ITALIC,
            "Format Italics",
            IconKey::Italic,
            command::TOGGLE_ITALIC,
            names::ITALIC,
        ),
        mark(
            ids::UNDERLINE,
            "Format Underline",
            IconKey::Underline,
            command::TOGGLE_UNDERLINE,
            names::UNDERLINE,
        ),
        mark(
            ids::STRIKETHROUGH,
            "Format Strikethrough",
            IconKey::Strikethrough,
            command::TOGGLE_STRIKE,
            names::STRIKE,
        ),
        mark(ids::CODE, "Insert Code", IconKey::InlineCode, command::TOGGLE_CODE, names::CODE),
        link(),
        align(ids::ALIGN_LEFT, "Left Align", IconKey::LeftAlign, "left"),
        align(ids::ALIGN_CENTER, "Center Align", IconKey::CenterAlign, "center"),
        align(ids::ALIGN_RIGHT, "Right Align", IconKey::RightAlign, "right"),
        align(ids::ALIGN_JUSTIFY, "Justify Align", IconKey::JustifyAlign, "justify"),
        image(),
        CommandEntry::new(
            ids::HORIZONTAL_RULE,
            "Add Horizontal Row",
            IconKey::HorizontalRule,
            run(command::SET_HORIZONTAL_RULE, None),
        )
        .group(EntryGroup::Insert),
    ])
}
