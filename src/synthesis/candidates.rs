// Candidate generation: one segmentation result + extraction mode + augment
// -> candidate output grids, one per non-empty mask, in mask order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{BoundingBox, Color, Grid, Mask};
use super::augment::Augment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// The object's bounding box cut out of the source grid.
    CropObjects,
    /// Source-sized grid keeping only the object's bounding box, the rest
    /// painted with the background colour.
    IsolateObject,
}

impl ExtractionMode {
    pub const ALL: [ExtractionMode; 2] = [ExtractionMode::CropObjects, ExtractionMode::IsolateObject];

    pub fn extract(&self, grid: &Grid, mask: &Mask, bg: Color) -> Option<Grid> {
        match self {
            ExtractionMode::CropObjects => cropped_object(grid, mask),
            ExtractionMode::IsolateObject => keep_one_object(grid, mask, bg),
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::CropObjects => write!(f, "crop"),
            ExtractionMode::IsolateObject => write!(f, "isolate"),
        }
    }
}

pub fn cropped_object(grid: &Grid, mask: &Mask) -> Option<Grid> {
    BoundingBox::of(mask).ok().map(|b| b.crop(grid))
}

pub fn keep_one_object(grid: &Grid, mask: &Mask, bg: Color) -> Option<Grid> {
    let b = BoundingBox::of(mask).ok()?;
    Some(grid.iter().enumerate()
        .map(|(r, row)| row.iter().enumerate()
            .map(|(c, &color)| if b.contains(r, c) { color } else { bg })
            .collect())
        .collect())
}

pub fn get_candidates(grid: &Grid, masks: &[Mask], bg: Color, mode: ExtractionMode, augment: &Augment) -> Vec<Grid> {
    masks.iter()
        .filter_map(|mask| mode.extract(grid, mask, bg))
        .map(|g| augment.apply(&g))
        .collect()
}
