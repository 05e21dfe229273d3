use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::perception::features::DEFAULT_NESTED_DEPTH;
use crate::perception::BgMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// How background colours are detected for every grid.
    pub background: BgMode,
    /// Stop after this many hypotheses per task. `None` walks the whole catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hypotheses: Option<usize>,
    /// Nesting depth used when featurizing objects.
    pub nested_depth: usize,
    /// Candidates per test input kept when scoring.
    pub top_n: usize,
    /// Evaluate tasks on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            background: BgMode::Touch,
            max_hypotheses: None,
            nested_depth: DEFAULT_NESTED_DEPTH,
            top_n: 3,
            parallel: false,
        }
    }
}

impl SearchConfig {
    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
