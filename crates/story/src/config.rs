use std::path::Path;

use anyhow::{Context as _, Result};
use editors_pick_sandbox::SandboxConfig;
use editors_pick_toolbar::EditorFamily;
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "EDITORS_PICK_CONFIG";
pub const TAB_ENV: &str = "EDITORS_PICK_TAB";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub initial_tab: usize,
    pub window_title: String,
    pub sandbox: SandboxConfig,
    /// Start the schema editor on the lorem paragraphs rather than an empty
    /// document.
    pub seed_content: bool,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            initial_tab: 0,
            window_title: "Editor's Pick".to_string(),
            sandbox: SandboxConfig::default(),
            seed_content: true,
        }
    }
}

impl StoryConfig {
    /// Defaults, then the JSON file named by `EDITORS_PICK_CONFIG`, then the
    /// `EDITORS_PICK_TAB` override.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Ok(raw) = std::env::var(TAB_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(tab) => config.initial_tab = tab,
                Err(err) => tracing::warn!(value = %raw, %err, "ignoring {TAB_ENV}"),
            }
        }

        Ok(config.normalized())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn normalized(mut self) -> Self {
        self.initial_tab = self.initial_tab.min(EditorFamily::ALL.len() - 1);
        self.sandbox = self.sandbox.with_defaults();
        self
    }
}
