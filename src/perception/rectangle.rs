// Rectangle recovery for noisy masks.
//
// `largest_rectangle` is the histogram DP: for each set cell keep the run of
// set cells upward (height) and leftward (width), then walk up the height
// tracking the narrowest width seen to score every rectangle whose bottom-right
// corner is that cell. Among equal areas the first one found in row-major
// scan order wins.

use crate::core::types::{dims, empty_mask};
use crate::core::{BoundingBox, Mask};

pub fn largest_rectangle(mask: &Mask) -> Option<Mask> {
    let (rows, cols) = dims(mask);
    let mut height = vec![vec![0usize; cols]; rows];
    let mut width = vec![vec![0usize; cols]; rows];
    let mut best: Option<(usize, BoundingBox)> = None;

    for r in 0..rows {
        for c in 0..cols {
            if !mask[r][c] { continue; }
            height[r][c] = if r == 0 { 1 } else { height[r - 1][c] + 1 };
            width[r][c] = if c == 0 { 1 } else { width[r][c - 1] + 1 };

            let mut min_w = width[r][c];
            for dh in 0..height[r][c] {
                min_w = min_w.min(width[r - dh][c]);
                let area = (dh + 1) * min_w;
                if best.map_or(true, |(a, _)| area > a) {
                    let rect = BoundingBox { min_r: r - dh, max_r: r, min_c: c + 1 - min_w, max_c: c };
                    best = Some((area, rect));
                }
            }
        }
    }
    best.map(|(_, rect)| rect.to_mask(rows, cols))
}

/// Sets every unset cell that cannot reach the border through unset cells
/// (4-connected), closing interior holes.
pub fn fill_holes(mask: &Mask) -> Mask {
    let (rows, cols) = dims(mask);
    let mut outside = vec![vec![false; cols]; rows];
    let mut stack = Vec::new();

    for r in 0..rows {
        for c in 0..cols {
            let on_border = r == 0 || c == 0 || r + 1 == rows || c + 1 == cols;
            if on_border && !mask[r][c] {
                outside[r][c] = true;
                stack.push((r, c));
            }
        }
    }

    while let Some((r, c)) = stack.pop() {
        for (dr, dc) in [(0i32, 1i32), (0, -1), (1, 0), (-1, 0)] {
            let nr = r as i32 + dr;
            let nc = c as i32 + dc;
            if nr >= 0 && nr < rows as i32 && nc >= 0 && nc < cols as i32 {
                let (nr, nc) = (nr as usize, nc as usize);
                if !outside[nr][nc] && !mask[nr][nc] {
                    outside[nr][nc] = true;
                    stack.push((nr, nc));
                }
            }
        }
    }

    outside.iter().map(|row| row.iter().map(|&o| !o).collect()).collect()
}

/// Strips the outermost one-cell ring of the mask's bounding box. The result
/// is empty when the box is two cells or less along either axis.
pub fn remove_padding(mask: &Mask) -> Mask {
    let (rows, cols) = dims(mask);
    let mut out = empty_mask(rows, cols);
    let Ok(b) = BoundingBox::of(mask) else { return out };
    for row in out.iter_mut().take(b.max_r).skip(b.min_r + 1) {
        for cell in row.iter_mut().take(b.max_c).skip(b.min_c + 1) {
            *cell = true;
        }
    }
    out
}
