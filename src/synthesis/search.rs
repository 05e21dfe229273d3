// Hypothesis search.
//
// A hypothesis is one (segmentation, extraction mode, augment) triple. It is
// accepted only if, for every training pair, the true output is exactly one
// of its candidates. The catalog is walked in a fixed nested order and the
// first accepted hypothesis wins, so the order doubles as a priority ranking.

use std::cmp::Reverse;
use std::fmt;

use log::{debug, trace, warn};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::core::types::area;
use crate::core::{Color, Grid, Mask};
use crate::perception::{detect_bg, BgMode, Segmentation, Task};
use super::augment::Augment;
use super::candidates::{get_candidates, ExtractionMode};
use super::checks::output_colors_from_input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hypothesis {
    pub segmentation: Segmentation,
    pub mode: ExtractionMode,
    pub augment: Augment,
}

impl Hypothesis {
    pub fn new(segmentation: Segmentation, mode: ExtractionMode, augment: Augment) -> Self {
        Self { segmentation, mode, augment }
    }

    pub fn candidates(&self, grid: &Grid, masks: &[Mask], bg: Color) -> Vec<Grid> {
        get_candidates(grid, masks, bg, self.mode, &self.augment)
    }

    /// Candidates for a grid with no precomputed segmentation.
    pub fn fresh_candidates(&self, grid: &Grid, bg_mode: BgMode) -> Vec<Grid> {
        let bg = detect_bg(grid, bg_mode);
        let masks = self.segmentation.segment(grid, bg);
        self.candidates(grid, &masks, bg)
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.segmentation, self.mode, self.augment)
    }
}

/// Ordered, immutable registry of everything the search may try.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub segmentations: Vec<Segmentation>,
    pub modes: Vec<ExtractionMode>,
    pub augments: Vec<Augment>,
}

impl Catalog {
    pub fn standard() -> Self {
        Self {
            segmentations: Segmentation::standard_variants(),
            modes: ExtractionMode::ALL.to_vec(),
            augments: Augment::standard_catalog(),
        }
    }

    pub fn len(&self) -> usize {
        self.segmentations.len() * self.modes.len() * self.augments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub hypothesis: Hypothesis,
    /// Ranked candidates, one list per test input.
    pub predictions: Vec<Vec<Grid>>,
    pub tried: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The precondition failed; no segmentation was run.
    NotAttempted,
    /// Nothing in the catalog (or within the budget) fit every training pair.
    Unsolved { tried: usize },
    Solved(Solution),
}

impl SearchOutcome {
    pub fn predictions(&self) -> &[Vec<Grid>] {
        match self {
            SearchOutcome::Solved(s) => &s.predictions,
            _ => &[],
        }
    }

    pub fn hypothesis(&self) -> Option<&Hypothesis> {
        match self {
            SearchOutcome::Solved(s) => Some(&s.hypothesis),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    pub fn tried(&self) -> usize {
        match self {
            SearchOutcome::NotAttempted => 0,
            SearchOutcome::Unsolved { tried } => *tried,
            SearchOutcome::Solved(s) => s.tried,
        }
    }
}

pub fn check_output_in_candidates(output: &Grid, candidates: &[Grid]) -> bool {
    candidates.iter().any(|c| c == output)
}

/// Drops duplicate grids (first occurrence kept) and orders by descending
/// cell count; equal areas keep discovery order.
pub fn rank_candidates(candidates: Vec<Grid>) -> Vec<Grid> {
    let mut seen: FxHashSet<Grid> = FxHashSet::default();
    let mut unique: Vec<Grid> = candidates.into_iter()
        .filter(|g| seen.insert(g.clone()))
        .collect();
    unique.sort_by_key(|g| Reverse(area(g)));
    unique
}

/// Consistency check of one hypothesis against every training pair, using
/// masks and backgrounds precomputed per training input. On success the
/// hypothesis is applied afresh to each test input; `None` means rejected.
/// Precomputed slices must have one entry per training pair.
pub fn predict_part(
    task: &Task,
    hypothesis: &Hypothesis,
    train_masks: &[Vec<Mask>],
    train_bgs: &[Color],
    bg_mode: BgMode,
) -> Option<Vec<Vec<Grid>>> {
    let pairs = task.pairs();
    if train_masks.len() != pairs.len() || train_bgs.len() != pairs.len() {
        warn!("task {}: precomputed data covers {} masks and {} backgrounds for {} training pairs",
            task.id, train_masks.len(), train_bgs.len(), pairs.len());
        return None;
    }

    for (i, ((input, output), (masks, &bg))) in pairs.into_iter().zip(train_masks.iter().zip(train_bgs)).enumerate() {
        let candidates = hypothesis.candidates(input, masks, bg);
        if candidates.is_empty() || !check_output_in_candidates(output, &candidates) {
            trace!("{}: rejected on training pair {}", hypothesis, i);
            return None;
        }
    }

    let predictions: Vec<Vec<Grid>> = task.test_inputs().into_iter()
        .map(|input| rank_candidates(hypothesis.fresh_candidates(input, bg_mode)))
        .collect();
    if predictions.is_empty() { None } else { Some(predictions) }
}

pub fn predict_part_types(task: &Task, catalog: &Catalog, config: &SearchConfig) -> SearchOutcome {
    if !output_colors_from_input(task) {
        debug!("task {}: outputs introduce new colours, not attempted", task.id);
        return SearchOutcome::NotAttempted;
    }

    let inputs = task.inputs();
    let bgs: Vec<Color> = inputs.iter().map(|g| detect_bg(g, config.background)).collect();
    let mut tried = 0usize;

    for &segmentation in &catalog.segmentations {
        let masks: Vec<Vec<Mask>> = inputs.iter().zip(&bgs)
            .map(|(g, &bg)| segmentation.segment(g, bg))
            .collect();

        for &mode in &catalog.modes {
            for &augment in &catalog.augments {
                if config.max_hypotheses.is_some_and(|max| tried >= max) {
                    warn!("task {}: hypothesis budget of {} exhausted", task.id, tried);
                    return SearchOutcome::Unsolved { tried };
                }
                tried += 1;

                let hypothesis = Hypothesis::new(segmentation, mode, augment);
                if let Some(predictions) = predict_part(task, &hypothesis, &masks, &bgs, config.background) {
                    debug!("task {}: solved by {} after {} hypotheses", task.id, hypothesis, tried);
                    return SearchOutcome::Solved(Solution { hypothesis, predictions, tried });
                }
            }
        }
    }

    debug!("task {}: unsolved after {} hypotheses", task.id, tried);
    SearchOutcome::Unsolved { tried }
}
