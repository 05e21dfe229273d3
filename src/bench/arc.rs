use std::fmt;

use crate::config::SearchConfig;
use crate::core::{Grid, Result};
use crate::perception::task::{Split, Task};
use crate::synthesis::search::{predict_part_types, Catalog, SearchOutcome};

#[derive(Debug, Clone)]
pub struct ArcResult {
    pub task_id: String,
    pub solved: bool,
    pub method: String,
    pub tried: usize,
    /// Test examples whose output appears among the kept candidates.
    pub correct: usize,
    /// Test examples with known outputs.
    pub scored: usize,
}

/// True if any prediction equals the true output (shape and values).
pub fn score_example_predictions(output: &Grid, predictions: &[Grid]) -> bool {
    predictions.iter().any(|p| p == output)
}

pub fn score_task_predictions(task: &Task, predictions: &[Vec<Grid>], split: Split) -> Result<usize> {
    let examples = task.pairs_for(split)?;
    Ok(examples.iter().zip(predictions)
        .filter(|((_, output), preds)| score_example_predictions(output, preds))
        .count())
}

pub fn solve_arc_task(task: &Task, catalog: &Catalog, config: &SearchConfig) -> ArcResult {
    let outcome = predict_part_types(task, catalog, config);
    let kept: Vec<Vec<Grid>> = outcome.predictions().iter()
        .map(|preds| preds.iter().take(config.top_n).cloned().collect())
        .collect();

    let (correct, scored) = match score_task_predictions(task, &kept, Split::Test) {
        Ok(tp) => (tp, task.test.len()),
        Err(_) => (0, 0),
    };

    let method = match &outcome {
        SearchOutcome::Solved(s) => s.hypothesis.to_string(),
        SearchOutcome::Unsolved { .. } => "none".into(),
        SearchOutcome::NotAttempted => "skipped".into(),
    };

    ArcResult {
        task_id: task.id.clone(),
        solved: outcome.is_solved(),
        method,
        tried: outcome.tried(),
        correct,
        scored,
    }
}

/// Aggregate over many tasks: `tp` matched test examples out of `n` scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub tp: usize,
    pub n: usize,
}

impl Score {
    pub fn from_results(results: &[ArcResult]) -> Self {
        Score {
            tp: results.iter().map(|r| r.correct).sum(),
            n: results.iter().map(|r| r.scored).sum(),
        }
    }

    /// Fraction of scored test examples missed.
    pub fn error(&self) -> f64 {
        if self.n == 0 { return 0.0; }
        (self.n - self.tp) as f64 / self.n as f64
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tp, self.n)
    }
}
