use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{ArcError, Grid, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainPair {
    pub input: Grid,
    pub output: Grid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestExample {
    pub input: Grid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Grid>,
}

/// One puzzle: training pairs in file order, then test inputs with optional
/// ground truth (present only for local evaluation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    pub train: Vec<TrainPair>,
    pub test: Vec<TestExample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split { Train, Test }

impl FromStr for Split {
    type Err = ArcError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "train" => Ok(Split::Train),
            "test" => Ok(Split::Test),
            other => Err(ArcError::UnknownSplit(other.to_string())),
        }
    }
}

impl Task {
    pub fn new(id: impl Into<String>, train: Vec<(Grid, Grid)>, test: Vec<(Grid, Option<Grid>)>) -> Self {
        Self {
            id: id.into(),
            train: train.into_iter().map(|(input, output)| TrainPair { input, output }).collect(),
            test: test.into_iter().map(|(input, output)| TestExample { input, output }).collect(),
        }
    }

    pub fn inputs(&self) -> Vec<&Grid> {
        self.train.iter().map(|p| &p.input).collect()
    }

    pub fn outputs(&self) -> Vec<&Grid> {
        self.train.iter().map(|p| &p.output).collect()
    }

    pub fn pairs(&self) -> Vec<(&Grid, &Grid)> {
        self.train.iter().map(|p| (&p.input, &p.output)).collect()
    }

    pub fn test_inputs(&self) -> Vec<&Grid> {
        self.test.iter().map(|t| &t.input).collect()
    }

    /// `None` unless every test example carries its output.
    pub fn test_outputs(&self) -> Option<Vec<&Grid>> {
        if self.test.is_empty() { return None; }
        self.test.iter().map(|t| t.output.as_ref()).collect()
    }

    pub fn test_pairs(&self) -> Option<Vec<(&Grid, &Grid)>> {
        let outputs = self.test_outputs()?;
        Some(self.test.iter().map(|t| &t.input).zip(outputs).collect())
    }

    pub fn pairs_for(&self, split: Split) -> Result<Vec<(&Grid, &Grid)>> {
        match split {
            Split::Train => Ok(self.pairs()),
            Split::Test => self.test_pairs().ok_or(ArcError::MissingTestOutputs),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.train.is_empty() {
            return Err(ArcError::InvalidTask("no training pairs".into()));
        }
        let grids = self.train.iter().flat_map(|p| [&p.input, &p.output])
            .chain(self.test.iter().flat_map(|t| std::iter::once(&t.input).chain(t.output.iter())));
        for grid in grids {
            check_rectangular(grid)?;
        }
        Ok(())
    }

    pub fn from_json_str(id: &str, content: &str) -> anyhow::Result<Task> {
        let mut task: Task = serde_json::from_str(content)?;
        task.id = id.to_string();
        task.validate()?;
        Ok(task)
    }

    pub fn load(path: &Path) -> anyhow::Result<Task> {
        let content = std::fs::read_to_string(path)?;
        let id = path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        Task::from_json_str(id, &content)
    }
}

fn check_rectangular(grid: &Grid) -> Result<()> {
    if grid.is_empty() || grid[0].is_empty() {
        return Err(ArcError::InvalidTask("empty grid".into()));
    }
    let expected = grid[0].len();
    for (row, cells) in grid.iter().enumerate() {
        if cells.len() != expected {
            return Err(ArcError::RaggedGrid { row, expected, found: cells.len() });
        }
    }
    Ok(())
}
