use serde::{Deserialize, Serialize};

const DEFAULT_MAX_UNDO: usize = 200;
const DEFAULT_MAX_TEXT_LEN: usize = 10_000;

/// Limits for an in-memory engine. Zero means "use the default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub max_undo: usize,
    /// Maximum number of characters in a single block.
    pub max_text_len: usize,
}

impl SandboxConfig {
    pub fn with_defaults(mut self) -> Self {
        if self.max_undo == 0 {
            self.max_undo = DEFAULT_MAX_UNDO;
        }
        if self.max_text_len == 0 {
            self.max_text_len = DEFAULT_MAX_TEXT_LEN;
        }
        self
    }
}
