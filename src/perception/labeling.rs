// Connected-component labeling over binary masks.
//
// Components are numbered in raster order of their first cell, so the
// returned list is stable for a given mask.

use serde::{Deserialize, Serialize};

use crate::core::types::{dims, empty_mask};
use crate::core::Mask;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Touch {
    /// Edge-adjacent cells connect (4-connectivity).
    Wall,
    /// Edge- or corner-adjacent cells connect (8-connectivity).
    Corner,
}

const WALL: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const CORNER: [(i32, i32); 8] = [(0, 1), (0, -1), (1, 0), (-1, 0), (1, 1), (1, -1), (-1, 1), (-1, -1)];

impl Touch {
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Touch::Wall => &WALL,
            Touch::Corner => &CORNER,
        }
    }
}

/// One disjoint mask per component of `mask`; unset cells are background.
pub fn label(mask: &Mask, touch: Touch) -> Vec<Mask> {
    let (rows, cols) = dims(mask);
    let mut visited = vec![vec![false; cols]; rows];
    let mut components = Vec::new();

    for r in 0..rows {
        for c in 0..cols {
            if visited[r][c] || !mask[r][c] { continue; }

            let mut component = empty_mask(rows, cols);
            let mut stack = vec![(r, c)];
            visited[r][c] = true;

            while let Some((cr, cc)) = stack.pop() {
                component[cr][cc] = true;
                for &(dr, dc) in touch.offsets() {
                    let nr = cr as i32 + dr;
                    let nc = cc as i32 + dc;
                    if nr >= 0 && nr < rows as i32 && nc >= 0 && nc < cols as i32 {
                        let (nr, nc) = (nr as usize, nc as usize);
                        if !visited[nr][nc] && mask[nr][nc] {
                            visited[nr][nc] = true;
                            stack.push((nr, nc));
                        }
                    }
                }
            }
            components.push(component);
        }
    }
    components
}
