// Background colour heuristics.
//
// A wrong guess here corrupts every segmentation of the grid, but detection
// itself never fails: when nothing qualifies the background is 0.

use serde::{Deserialize, Serialize};

use crate::core::types::{all_colors, dims, mask_where, most_common_color};
use crate::core::{Color, Grid, Mask};
use super::labeling::{label, Touch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BgMode {
    /// First colour (most common first, then ascending) owning an 8-connected
    /// region that reaches at least three border edges.
    #[default]
    Touch,
    /// Always 0.
    Black,
    /// Most frequent colour, no border check.
    MostCommon,
}

pub fn detect_bg(grid: &Grid, mode: BgMode) -> Color {
    match mode {
        BgMode::Black => 0,
        BgMode::MostCommon => most_common_color(grid).unwrap_or(0),
        BgMode::Touch => detect_touching_bg(grid),
    }
}

fn detect_touching_bg(grid: &Grid) -> Color {
    let Some(most_common) = most_common_color(grid) else { return 0 };
    let order = std::iter::once(most_common)
        .chain(all_colors(grid).into_iter().filter(|&c| c != most_common));

    for color in order {
        let regions = label(&mask_where(grid, |c| c == color), Touch::Corner);
        if regions.iter().any(touches_boundary) {
            return color;
        }
    }
    0
}

/// True when the mask reaches at least 3 of the 4 border edges. Corner cells
/// are excluded so a single corner cell never counts twice.
pub fn touches_boundary(mask: &Mask) -> bool {
    let (rows, cols) = dims(mask);
    if rows == 0 || cols == 0 { return false; }
    let inner_cols = 1..cols.saturating_sub(1);
    let inner_rows = 1..rows.saturating_sub(1);

    let top = inner_cols.clone().any(|c| mask[0][c]);
    let bottom = inner_cols.clone().any(|c| mask[rows - 1][c]);
    let left = inner_rows.clone().any(|r| mask[r][0]);
    let right = inner_rows.clone().any(|r| mask[r][cols - 1]);

    [top, bottom, left, right].iter().filter(|&&t| t).count() >= 3
}
