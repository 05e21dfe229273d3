// Segmentation strategies: grid + background colour -> object masks.
//
// Every strategy drops empty masks, so callers may rely on each returned mask
// having at least one set cell. Colour-layered strategies visit colours in
// ascending order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{all_colors, dims, empty_mask, mask_count, mask_is_empty, mask_where};
use crate::core::{Color, ColoredView, Grid, Mask};
use super::background::{detect_bg, BgMode};
use super::labeling::{label, Touch};
use super::rectangle::{fill_holes, largest_rectangle, remove_padding};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Scan column by column.
    #[default]
    Vertical,
    /// Scan row by row.
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segmentation {
    /// Label `cell != bg` directly, ignoring colour boundaries.
    Connectivity { touch: Touch },
    /// Label each non-background colour separately.
    ColorConnectivity { touch: Touch },
    /// One mask per non-background colour.
    Color,
    /// Bands of identical consecutive non-background lines.
    Rectangles { direction: Direction },
    /// Colour components (wall), holes filled, fitted to their largest rectangle.
    RectanglesDenoised,
    /// As `RectanglesDenoised` with the outer ring stripped.
    RectanglesDenoisedUnpadded,
}

impl Segmentation {
    /// The nine variants tried by the search, in priority order.
    pub fn standard_variants() -> Vec<Segmentation> {
        vec![
            Segmentation::Connectivity { touch: Touch::Wall },
            Segmentation::Connectivity { touch: Touch::Corner },
            Segmentation::ColorConnectivity { touch: Touch::Wall },
            Segmentation::ColorConnectivity { touch: Touch::Corner },
            Segmentation::Color,
            Segmentation::Rectangles { direction: Direction::Vertical },
            Segmentation::Rectangles { direction: Direction::Horizontal },
            Segmentation::RectanglesDenoised,
            Segmentation::RectanglesDenoisedUnpadded,
        ]
    }

    pub fn segment(&self, grid: &Grid, bg: Color) -> Vec<Mask> {
        match *self {
            Segmentation::Connectivity { touch } => by_connectivity(grid, touch, bg),
            Segmentation::ColorConnectivity { touch } => by_color_and_connectivity(grid, touch, bg),
            Segmentation::Color => by_color(grid, bg),
            Segmentation::Rectangles { direction } => rectangles(grid, direction, bg),
            Segmentation::RectanglesDenoised => rectangles_without_noise(grid, bg),
            Segmentation::RectanglesDenoisedUnpadded => rectangles_without_noise_without_padding(grid, bg),
        }
    }

    /// Segment with the background detected under `mode`.
    pub fn segment_detected(&self, grid: &Grid, mode: BgMode) -> Vec<Mask> {
        self.segment(grid, detect_bg(grid, mode))
    }
}

impl fmt::Display for Segmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segmentation::Connectivity { touch } => write!(f, "connectivity({:?})", touch),
            Segmentation::ColorConnectivity { touch } => write!(f, "color_connectivity({:?})", touch),
            Segmentation::Color => write!(f, "color"),
            Segmentation::Rectangles { direction } => write!(f, "rectangles({:?})", direction),
            Segmentation::RectanglesDenoised => write!(f, "rectangles_denoised"),
            Segmentation::RectanglesDenoisedUnpadded => write!(f, "rectangles_denoised_unpadded"),
        }
    }
}

pub fn by_connectivity(grid: &Grid, touch: Touch, bg: Color) -> Vec<Mask> {
    label(&mask_where(grid, |c| c != bg), touch)
}

pub fn by_color_and_connectivity(grid: &Grid, touch: Touch, bg: Color) -> Vec<Mask> {
    color_components(&to_view(grid, bg), touch)
}

/// Colour-then-connectivity over a view whose `None` cells are background.
pub fn color_components(view: &ColoredView, touch: Touch) -> Vec<Mask> {
    let mut seen = [false; 256];
    for cell in view.iter().flatten().flatten() {
        seen[*cell as usize] = true;
    }
    (0..=255u8)
        .filter(|&color| seen[color as usize])
        .flat_map(|color| {
            let layer: Mask = view.iter()
                .map(|row| row.iter().map(|&cell| cell == Some(color)).collect())
                .collect();
            label(&layer, touch)
        })
        .collect()
}

pub fn by_color(grid: &Grid, bg: Color) -> Vec<Mask> {
    all_colors(grid).into_iter()
        .filter(|&color| color != bg)
        .map(|color| mask_where(grid, |c| c == color))
        .collect()
}

pub fn rectangles(grid: &Grid, direction: Direction, bg: Color) -> Vec<Mask> {
    let (rows, cols) = dims(grid);
    let lines: Vec<Vec<Color>> = match direction {
        Direction::Horizontal => grid.clone(),
        Direction::Vertical => (0..cols).map(|c| grid.iter().map(|row| row[c]).collect()).collect(),
    };

    let mut bands: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut prev: Option<&Vec<Color>> = None;
    for (i, line) in lines.iter().enumerate() {
        if line.iter().any(|&c| c != bg) {
            if prev != Some(line) && !current.is_empty() {
                bands.push(std::mem::take(&mut current));
            }
            current.push(i);
        } else if !current.is_empty() {
            bands.push(std::mem::take(&mut current));
        }
        prev = Some(line);
    }
    if !current.is_empty() {
        bands.push(current);
    }

    bands.iter().map(|band| {
        let mut mask = empty_mask(rows, cols);
        for &i in band {
            match direction {
                Direction::Horizontal => {
                    for c in 0..cols { mask[i][c] = grid[i][c] != bg; }
                }
                Direction::Vertical => {
                    for r in 0..rows { mask[r][i] = grid[r][i] != bg; }
                }
            }
        }
        mask
    }).collect()
}

pub fn rectangles_without_noise(grid: &Grid, bg: Color) -> Vec<Mask> {
    by_color_and_connectivity(grid, Touch::Wall, bg).into_iter()
        .filter(|mask| mask_count(mask) > 1)
        .filter_map(|mask| largest_rectangle(&fill_holes(&mask)))
        .collect()
}

pub fn rectangles_without_noise_without_padding(grid: &Grid, bg: Color) -> Vec<Mask> {
    rectangles_without_noise(grid, bg).iter()
        .map(remove_padding)
        .filter(|mask| !mask_is_empty(mask))
        .collect()
}

fn to_view(grid: &Grid, bg: Color) -> ColoredView {
    grid.iter()
        .map(|row| row.iter().map(|&c| if c == bg { None } else { Some(c) }).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BoundingBox;

    #[test]
    fn connectivity_merges_touching_colors() {
        let g = vec![
            vec![0, 0, 0, 0],
            vec![0, 1, 2, 0],
            vec![0, 0, 0, 0],
            vec![3, 0, 0, 0],
        ];
        assert_eq!(by_connectivity(&g, Touch::Wall, 0).len(), 2);
        assert_eq!(by_color_and_connectivity(&g, Touch::Wall, 0).len(), 3);
        assert_eq!(by_color(&g, 0).len(), 3);
    }

    #[test]
    fn color_layers_ignore_distance() {
        let g = vec![vec![4, 0, 4], vec![0, 0, 0], vec![4, 0, 5]];
        let masks = by_color(&g, 0);
        assert_eq!(masks.len(), 2);
        assert_eq!(mask_count(&masks[0]), 3);
        assert_eq!(mask_count(&masks[1]), 1);
    }

    #[test]
    fn corner_touch_joins_diagonals() {
        let g = vec![vec![1, 0], vec![0, 1]];
        assert_eq!(by_color_and_connectivity(&g, Touch::Wall, 0).len(), 2);
        assert_eq!(by_color_and_connectivity(&g, Touch::Corner, 0).len(), 1);
    }

    #[test]
    fn vertical_scan_groups_identical_columns() {
        let g = vec![
            vec![1, 1, 0, 2, 3],
            vec![1, 1, 0, 2, 3],
        ];
        let masks = rectangles(&g, Direction::Vertical, 0);
        assert_eq!(masks.len(), 3);
        assert_eq!(BoundingBox::of(&masks[0]).unwrap(), BoundingBox { min_r: 0, max_r: 1, min_c: 0, max_c: 1 });
        assert_eq!(BoundingBox::of(&masks[1]).unwrap().min_c, 3);
        assert_eq!(BoundingBox::of(&masks[2]).unwrap().min_c, 4);
    }

    #[test]
    fn horizontal_scan_splits_on_background_rows() {
        let g = vec![
            vec![5, 5],
            vec![5, 5],
            vec![0, 0],
            vec![5, 5],
        ];
        let masks = rectangles(&g, Direction::Horizontal, 0);
        assert_eq!(masks.len(), 2);
        assert_eq!(mask_count(&masks[0]), 4);
        assert_eq!(mask_count(&masks[1]), 2);
    }

    #[test]
    fn denoised_rectangle_ignores_strays() {
        let g = vec![
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 3, 3, 3, 0, 0],
            vec![0, 3, 0, 3, 3, 0],
            vec![0, 3, 3, 3, 0, 0],
            vec![0, 0, 0, 0, 0, 7],
        ];
        let masks = rectangles_without_noise(&g, 0);
        // the single 7 is dropped, the ring is filled and trimmed of its spur
        assert_eq!(masks.len(), 1);
        assert_eq!(BoundingBox::of(&masks[0]).unwrap(), BoundingBox { min_r: 1, max_r: 3, min_c: 1, max_c: 3 });
        assert_eq!(mask_count(&masks[0]), 9);

        let unpadded = rectangles_without_noise_without_padding(&g, 0);
        assert_eq!(unpadded.len(), 1);
        assert_eq!(mask_count(&unpadded[0]), 1);
        assert!(unpadded[0][2][2]);
    }

    #[test]
    fn unpadding_drops_thin_rectangles() {
        let g = vec![vec![0, 0, 0], vec![2, 2, 2], vec![0, 0, 0]];
        assert_eq!(rectangles_without_noise(&g, 0).len(), 1);
        assert!(rectangles_without_noise_without_padding(&g, 0).is_empty());
    }

    #[test]
    fn every_strategy_returns_non_empty_masks() {
        let grids = vec![
            vec![vec![0, 1, 1, 0], vec![2, 2, 0, 3], vec![0, 0, 0, 3], vec![4, 0, 4, 4]],
            vec![vec![6, 6, 6], vec![6, 6, 6]],
            vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]],
        ];
        for g in &grids {
            for bg in 0..=9 {
                for seg in Segmentation::standard_variants() {
                    for mask in seg.segment(g, bg) {
                        assert!(mask_count(&mask) >= 1, "{} produced an empty mask", seg);
                        assert_eq!(dims(&mask), dims(g));
                    }
                }
            }
        }
    }

    #[test]
    fn nine_variants_in_priority_order() {
        let variants = Segmentation::standard_variants();
        assert_eq!(variants.len(), 9);
        assert_eq!(variants[0], Segmentation::Connectivity { touch: Touch::Wall });
        assert_eq!(variants[8], Segmentation::RectanglesDenoisedUnpadded);
    }
}
