use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::engine::{CommandError, Engine};
use crate::error::CatalogError;

pub type ApplyFn = Arc<dyn Fn(&mut dyn Engine) -> Result<(), CommandError> + Send + Sync>;
pub type InputApplyFn =
    Arc<dyn Fn(&mut dyn Engine, &str) -> Result<(), CommandError> + Send + Sync>;
pub type PredicateFn = Arc<dyn Fn(&dyn Engine) -> bool + Send + Sync>;
pub type PrefillFn = Arc<dyn Fn(&dyn Engine) -> Option<String> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKey {
    Undo,
    Redo,
    Paragraph,
    LargeHeading,
    SmallHeading,
    BulletList,
    NumberedList,
    Quote,
    Code,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    InlineCode,
    Link,
    LeftAlign,
    CenterAlign,
    RightAlign,
    JustifyAlign,
    Image,
    HorizontalRule,
}

impl IconKey {
    pub fn key(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Paragraph => "paragraph",
            Self::LargeHeading => "large-heading",
            Self::SmallHeading => "small-heading",
            Self::BulletList => "bullet-list",
            Self::NumberedList => "numbered-list",
            Self::Quote => "quote",
            Self::Code => "code",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::InlineCode => "inline-code",
            Self::Link => "link",
            Self::LeftAlign => "left-align",
            Self::CenterAlign => "center-align",
            Self::RightAlign => "right-align",
            Self::JustifyAlign => "justify-align",
            Self::Image => "image",
            Self::HorizontalRule => "horizontal-rule",
        }
    }
}

/// Toolbar section an entry is rendered in. Sections are separated visually;
/// `BlockType` entries are also the subset shown by the block-type menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryGroup {
    History,
    BlockType,
    Mark,
    Align,
    Insert,
}

/// An action that needs one line of free text (a URL) before it can mutate
/// the engine.
#[derive(Clone)]
pub struct PromptAction {
    title: String,
    prefill: Option<PrefillFn>,
    on_active: Option<ApplyFn>,
    apply: InputApplyFn,
}

impl PromptAction {
    pub fn new(
        title: impl Into<String>,
        apply: impl Fn(&mut dyn Engine, &str) -> Result<(), CommandError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            prefill: None,
            on_active: None,
            apply: Arc::new(apply),
        }
    }

    /// Initial prompt value read from the engine, e.g. the current link href.
    pub fn prefill(
        mut self,
        prefill: impl Fn(&dyn Engine) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.prefill = Some(Arc::new(prefill));
        self
    }

    /// Runs instead of prompting when the entry is already active.
    pub fn on_active(
        mut self,
        action: impl Fn(&mut dyn Engine) -> Result<(), CommandError> + Send + Sync + 'static,
    ) -> Self {
        self.on_active = Some(Arc::new(action));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn initial_value(&self, engine: &dyn Engine) -> Option<String> {
        self.prefill.as_ref().and_then(|prefill| prefill(engine))
    }

    pub(crate) fn active_action(&self) -> Option<&ApplyFn> {
        self.on_active.as_ref()
    }

    pub(crate) fn apply(&self, engine: &mut dyn Engine, input: &str) -> Result<(), CommandError> {
        (self.apply)(engine, input)
    }
}

#[derive(Clone)]
pub enum EntryAction {
    Run(ApplyFn),
    Prompt(PromptAction),
}

#[derive(Clone)]
pub struct CommandEntry {
    id: String,
    label: String,
    icon: IconKey,
    group: EntryGroup,
    baseline: bool,
    action: EntryAction,
    is_active: PredicateFn,
    is_available: PredicateFn,
}

impl CommandEntry {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: IconKey,
        apply: impl Fn(&mut dyn Engine) -> Result<(), CommandError> + Send + Sync + 'static,
    ) -> Self {
        Self::with_action(id, label, icon, EntryAction::Run(Arc::new(apply)))
    }

    pub fn prompt(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: IconKey,
        prompt: PromptAction,
    ) -> Self {
        Self::with_action(id, label, icon, EntryAction::Prompt(prompt))
    }

    fn with_action(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: IconKey,
        action: EntryAction,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon,
            group: EntryGroup::Insert,
            baseline: false,
            action,
            is_active: Arc::new(|_: &dyn Engine| false),
            is_available: Arc::new(|_: &dyn Engine| true),
        }
    }

    pub fn group(mut self, group: EntryGroup) -> Self {
        self.group = group;
        self
    }

    /// Marks the "no special formatting" entry the query falls back to.
    pub fn baseline(mut self) -> Self {
        self.baseline = true;
        self
    }

    pub fn active_when(
        mut self,
        predicate: impl Fn(&dyn Engine) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.is_active = Arc::new(predicate);
        self
    }

    pub fn available_when(
        mut self,
        predicate: impl Fn(&dyn Engine) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.is_available = Arc::new(predicate);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> IconKey {
        self.icon
    }

    pub fn entry_group(&self) -> EntryGroup {
        self.group
    }

    pub fn is_baseline(&self) -> bool {
        self.baseline
    }

    pub fn action(&self) -> &EntryAction {
        &self.action
    }

    pub fn needs_input(&self) -> bool {
        matches!(self.action, EntryAction::Prompt(_))
    }

    pub fn is_active(&self, engine: &dyn Engine) -> bool {
        (self.is_active)(engine)
    }

    pub fn is_available(&self, engine: &dyn Engine) -> bool {
        (self.is_available)(engine)
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("group", &self.group)
            .field("baseline", &self.baseline)
            .field("needs_input", &self.needs_input())
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable list of toolbar entries. Insertion order is display
/// order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CommandEntry>,
    baseline: usize,
}

impl Catalog {
    pub fn new(entries: impl IntoIterator<Item = CommandEntry>) -> Result<Self, CatalogError> {
        let entries: Vec<CommandEntry> = entries.into_iter().collect();

        let mut seen: HashSet<&str> = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id()) {
                return Err(CatalogError::DuplicateCommandId(entry.id().to_string()));
            }
        }

        let baseline = entries
            .iter()
            .position(CommandEntry::is_baseline)
            .ok_or(CatalogError::MissingBaseline)?;

        Ok(Self { entries, baseline })
    }

    /// Sub-catalog of one toolbar section, validated like a fresh catalog.
    pub fn filtered(&self, group: EntryGroup) -> Result<Self, CatalogError> {
        Self::new(
            self.entries
                .iter()
                .filter(|entry| entry.entry_group() == group)
                .cloned(),
        )
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommandEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed catalog; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    pub fn baseline(&self) -> &CommandEntry {
        &self.entries[self.baseline]
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(CommandEntry::id)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CommandEntry;
    type IntoIter = std::slice::Iter<'a, CommandEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
