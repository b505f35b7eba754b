#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use editors_pick_toolbar::{
    Catalog, CommandEntry, CommandError, Engine, EntryGroup, IconKey, PromptAction, QueryError,
};
use serde_json::Value;

/// Engine double: predicates are plain flags, commands are recorded and can
/// be scripted to flip flags or fail.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    pub flags: HashMap<String, bool>,
    pub strings: HashMap<String, String>,
    pub commands: Vec<(String, Option<Value>)>,
    pub failing: HashSet<String>,
    pub effects: HashMap<String, Vec<(String, bool)>>,
    pub queries: std::cell::Cell<usize>,
    pub revision: u64,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(mut self, query: &str, value: bool) -> Self {
        self.flags.insert(query.to_string(), value);
        self
    }

    pub fn with_effect(mut self, command: &str, query: &str, value: bool) -> Self {
        self.effects
            .entry(command.to_string())
            .or_default()
            .push((query.to_string(), value));
        self
    }

    pub fn failing(mut self, command: &str) -> Self {
        self.failing.insert(command.to_string());
        self
    }

    pub fn set_flag(&mut self, query: &str, value: bool) {
        self.flags.insert(query.to_string(), value);
        self.revision += 1;
    }

    pub fn command_ids(&self) -> Vec<&str> {
        self.commands.iter().map(|(id, _)| id.as_str()).collect()
    }
}

impl Engine for ScriptedEngine {
    fn run_command(&mut self, id: &str, args: Option<Value>) -> Result<(), CommandError> {
        self.commands.push((id.to_string(), args));
        if self.failing.contains(id) {
            return Err(CommandError::new(format!("{id} rejected")));
        }
        if let Some(effects) = self.effects.get(id).cloned() {
            for (query, value) in effects {
                self.flags.insert(query, value);
            }
        }
        self.revision += 1;
        Ok(())
    }

    fn run_query_json(&self, id: &str, _args: Option<Value>) -> Result<Value, QueryError> {
        self.queries.set(self.queries.get() + 1);
        if let Some(value) = self.strings.get(id) {
            return Ok(Value::String(value.clone()));
        }
        match self.flags.get(id) {
            Some(flag) => Ok(Value::Bool(*flag)),
            None => Err(QueryError::new(format!("Unknown query: {id}"))),
        }
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

pub fn is(id: &str) -> String {
    format!("is.{id}")
}

pub fn cmd(id: &str) -> String {
    format!("cmd.{id}")
}

/// Entry that runs `cmd.<id>` and is active while flag `is.<id>` is set.
pub fn entry(id: &str, group: EntryGroup) -> CommandEntry {
    let command = cmd(id);
    let query = is(id);
    CommandEntry::new(id, id, IconKey::Paragraph, move |engine: &mut dyn Engine| {
        engine.run_command(&command, None)
    })
    .group(group)
    .active_when(move |engine: &dyn Engine| engine.query_flag(&query, None))
}

/// Entry that prompts for a URL; `cmd.link` receives the trimmed input and
/// `cmd.unlink` runs when the entry is already active.
pub fn link_entry() -> CommandEntry {
    let prompt = PromptAction::new("URL", |engine: &mut dyn Engine, url: &str| {
        engine.run_command("cmd.link", Some(serde_json::json!({ "href": url })))
    })
    .prefill(|engine: &dyn Engine| engine.run_query::<String>("link.href", None).ok())
    .on_active(|engine: &mut dyn Engine| engine.run_command("cmd.unlink", None));

    CommandEntry::prompt("link", "Link", IconKey::Link, prompt)
        .group(EntryGroup::Mark)
        .active_when(|engine: &dyn Engine| engine.query_flag("is.link", None))
}

pub fn image_entry() -> CommandEntry {
    let prompt = PromptAction::new("Image URL", |engine: &mut dyn Engine, url: &str| {
        engine.run_command("cmd.image", Some(serde_json::json!({ "src": url })))
    });

    CommandEntry::prompt("image", "Image", IconKey::Image, prompt).group(EntryGroup::Insert)
}

pub fn test_catalog() -> Catalog {
    Catalog::new([
        entry("paragraph", EntryGroup::BlockType).baseline(),
        entry("h1", EntryGroup::BlockType),
        entry("h2", EntryGroup::BlockType),
        entry("bold", EntryGroup::Mark),
        entry("italic", EntryGroup::Mark),
        link_entry(),
    ])
    .unwrap()
}
