use serde::{Deserialize, Serialize};

use editors_pick_toolbar::CommandError;

const LOREM: &str = include_str!("lorem.txt");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph,
    Heading { level: u8 },
    BulletItem,
    OrderedItem,
    Quote,
    CodeBlock,
    HorizontalRule,
    Image { src: String },
}

impl BlockKind {
    /// Void blocks carry no text and accept no marks.
    pub fn is_void(&self) -> bool {
        matches!(self, BlockKind::HorizontalRule | BlockKind::Image { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self, BlockKind::BulletItem | BlockKind::OrderedItem)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" => Some(Align::Right),
            "justify" => Some(Align::Justify),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub code: bool,
}

impl Marks {
    pub fn has(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Strikethrough => self.strikethrough,
            Mark::Code => self.code,
        }
    }

    pub fn toggle(&mut self, mark: Mark) {
        let flag = match mark {
            Mark::Bold => &mut self.bold,
            Mark::Italic => &mut self.italic,
            Mark::Underline => &mut self.underline,
            Mark::Strikethrough => &mut self.strikethrough,
            Mark::Code => &mut self.code,
        };
        *flag = !*flag;
    }
}

/// One block of the sandbox document. Marks and links apply to the whole
/// block; the focused block stands in for the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub marks: Marks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Block {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            align: None,
            text: text.into(),
            marks: Marks::default(),
            link: None,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph, text)
    }

    pub fn is_void(&self) -> bool {
        self.kind.is_void()
    }

    pub fn effective_align(&self) -> Align {
        self.align.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDocument")]
pub struct SandboxDocument {
    blocks: Vec<Block>,
    cursor: usize,
}

/// Wire shape before the caret invariants are restored.
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    blocks: Vec<Block>,
    #[serde(default)]
    cursor: usize,
}

impl From<RawDocument> for SandboxDocument {
    fn from(raw: RawDocument) -> Self {
        let mut doc = Self::new(raw.blocks);
        doc.cursor = raw.cursor.min(doc.blocks.len() - 1);
        doc
    }
}

impl Default for SandboxDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl SandboxDocument {
    /// An empty document still holds one paragraph for the caret.
    pub fn new(blocks: Vec<Block>) -> Self {
        let blocks = if blocks.is_empty() {
            vec![Block::paragraph("")]
        } else {
            blocks
        };
        Self { blocks, cursor: 0 }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn lorem() -> Self {
        Self::new(
            LOREM
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(Block::paragraph)
                .collect(),
        )
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focused(&self) -> &Block {
        &self.blocks[self.cursor]
    }

    pub fn focused_mut(&mut self) -> &mut Block {
        &mut self.blocks[self.cursor]
    }

    /// The focused block, if it can hold text.
    pub fn focused_text_mut(&mut self) -> Result<&mut Block, CommandError> {
        let block = &mut self.blocks[self.cursor];
        if block.is_void() {
            return Err(CommandError::new("Selection is not inside a text block"));
        }
        Ok(block)
    }

    pub fn set_cursor(&mut self, index: usize) -> Result<(), CommandError> {
        if index >= self.blocks.len() {
            return Err(CommandError::new(format!(
                "Block index {index} out of range (0..{})",
                self.blocks.len()
            )));
        }
        self.cursor = index;
        Ok(())
    }

    /// Inserts after the focused block and moves the caret onto it.
    pub fn insert_after_cursor(&mut self, block: Block) {
        self.cursor += 1;
        self.blocks.insert(self.cursor, block);
    }

    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
