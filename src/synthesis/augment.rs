// Whole-grid post-processing transforms applied to each extracted candidate.
//
// The catalog order matters: the search walks it front to back and keeps the
// first entry that fits, so cheap transforms (identity, rotations) come first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::dims;
use crate::core::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Reverse the order of rows.
    Rows,
    /// Reverse the order of columns.
    Cols,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Augment {
    Identity,
    /// Quarter turns counter-clockwise; negative turns go clockwise.
    Rotate(i8),
    Flip(Axis),
    /// `Rows`: transpose. `Cols`: anti-transpose.
    FlipDiagonal(Axis),
    /// Every cell becomes an `n0 x n1` block.
    Zoom(usize, usize),
    /// Tile the whole grid `n0 x n1` times.
    Repeat(usize, usize),
    ReverseZoom(usize, usize),
    ReverseRepeat(usize, usize),
}

const RANGE4: std::ops::RangeInclusive<usize> = 1..=4;
const RANGE10: std::ops::RangeInclusive<usize> = 1..=10;

impl Augment {
    pub fn apply(&self, grid: &Grid) -> Grid {
        match *self {
            Augment::Identity => grid.clone(),
            Augment::Rotate(turns) => rotate(grid, turns),
            Augment::Flip(Axis::Rows) => flip_rows(grid),
            Augment::Flip(Axis::Cols) => flip_cols(grid),
            Augment::FlipDiagonal(Axis::Rows) => transpose(grid),
            Augment::FlipDiagonal(Axis::Cols) => rotate_ccw(&flip_rows(grid)),
            Augment::Zoom(n0, n1) => zoom(grid, n0, n1),
            Augment::Repeat(n0, n1) => repeat(grid, n0, n1),
            Augment::ReverseZoom(n0, n1) => reverse_zoom(grid, n0, n1),
            Augment::ReverseRepeat(n0, n1) => reverse_repeat(grid, n0, n1),
        }
    }

    pub fn inverse(&self) -> Augment {
        match *self {
            Augment::Rotate(turns) => Augment::Rotate(-turns),
            Augment::Zoom(n0, n1) => Augment::ReverseZoom(n0, n1),
            Augment::Repeat(n0, n1) => Augment::ReverseRepeat(n0, n1),
            Augment::ReverseZoom(n0, n1) => Augment::Zoom(n0, n1),
            Augment::ReverseRepeat(n0, n1) => Augment::Repeat(n0, n1),
            other => other,
        }
    }

    /// Forward catalog used by the search: 40 entries.
    pub fn standard_catalog() -> Vec<Augment> {
        let mut catalog = vec![Augment::Identity];
        catalog.extend([1, 2, 3].map(Augment::Rotate));
        catalog.extend([Axis::Rows, Axis::Cols].map(Augment::Flip));
        catalog.extend([Axis::Rows, Axis::Cols].map(Augment::FlipDiagonal));
        catalog.extend(pairs(RANGE4).map(|(a, b)| Augment::Zoom(a, b)));
        catalog.extend(pairs(RANGE4).map(|(a, b)| Augment::Repeat(a, b)));
        catalog
    }

    /// Undo catalog: maps outputs back towards inputs.
    pub fn reversed_catalog() -> Vec<Augment> {
        let mut catalog = vec![Augment::Identity];
        catalog.extend([-1, -2, -3].map(Augment::Rotate));
        catalog.extend([Axis::Rows, Axis::Cols].map(Augment::Flip));
        catalog.extend([Axis::Rows, Axis::Cols].map(Augment::FlipDiagonal));
        catalog.extend(pairs(RANGE10).map(|(a, b)| Augment::ReverseZoom(a, b)));
        catalog.extend(pairs(RANGE10).map(|(a, b)| Augment::ReverseRepeat(a, b)));
        catalog
    }
}

impl fmt::Display for Augment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Augment::Identity => write!(f, "identity"),
            Augment::Rotate(t) => write!(f, "rotate({})", t),
            Augment::Flip(a) => write!(f, "flip({:?})", a),
            Augment::FlipDiagonal(a) => write!(f, "flip_diagonal({:?})", a),
            Augment::Zoom(a, b) => write!(f, "zoom({}, {})", a, b),
            Augment::Repeat(a, b) => write!(f, "repeat({}, {})", a, b),
            Augment::ReverseZoom(a, b) => write!(f, "reverse_zoom({}, {})", a, b),
            Augment::ReverseRepeat(a, b) => write!(f, "reverse_repeat({}, {})", a, b),
        }
    }
}

fn pairs(range: std::ops::RangeInclusive<usize>) -> impl Iterator<Item = (usize, usize)> {
    let inner = range.clone();
    range.flat_map(move |a| inner.clone().map(move |b| (a, b)))
}

// --- Transform implementations ---

pub fn rotate(g: &Grid, turns: i8) -> Grid {
    (0..turns.rem_euclid(4)).fold(g.clone(), |acc, _| rotate_ccw(&acc))
}

fn rotate_ccw(g: &Grid) -> Grid {
    if g.is_empty() { return g.clone(); }
    let rows = g.len();
    let cols = g[0].len();
    (0..cols).rev().map(|c| (0..rows).map(|r| g[r][c]).collect()).collect()
}

fn flip_rows(g: &Grid) -> Grid {
    g.iter().rev().cloned().collect()
}

fn flip_cols(g: &Grid) -> Grid {
    g.iter().map(|row| row.iter().rev().cloned().collect()).collect()
}

fn transpose(g: &Grid) -> Grid {
    if g.is_empty() { return g.clone(); }
    let cols = g[0].len();
    (0..cols).map(|c| g.iter().map(|row| row[c]).collect()).collect()
}

pub fn zoom(g: &Grid, n0: usize, n1: usize) -> Grid {
    let mut result = Vec::with_capacity(g.len() * n0);
    for row in g {
        let wide: Vec<u8> = row.iter().flat_map(|&c| std::iter::repeat(c).take(n1)).collect();
        for _ in 0..n0 {
            result.push(wide.clone());
        }
    }
    result
}

pub fn repeat(g: &Grid, n0: usize, n1: usize) -> Grid {
    let tiled: Vec<Vec<u8>> = g.iter()
        .map(|row| {
            let mut new_row = Vec::with_capacity(row.len() * n1);
            for _ in 0..n1 { new_row.extend(row.iter()); }
            new_row
        })
        .collect();
    let mut result = Vec::with_capacity(tiled.len() * n0);
    for _ in 0..n0 { result.extend(tiled.iter().cloned()); }
    result
}

/// Samples every `n0`-th row and `n1`-th column; exact inverse of `zoom`.
pub fn reverse_zoom(g: &Grid, n0: usize, n1: usize) -> Grid {
    let (rows, cols) = dims(g);
    if n0 == 0 || n1 == 0 { return Vec::new(); }
    let (k0, k1) = (rows / n0, cols / n1);
    if k0 == 0 || k1 == 0 { return Vec::new(); }
    (0..k0).map(|i| (0..k1).map(|j| g[i * n0][j * n1]).collect()).collect()
}

/// Top-left tile of an `n0 x n1` tiling; exact inverse of `repeat`.
pub fn reverse_repeat(g: &Grid, n0: usize, n1: usize) -> Grid {
    let (rows, cols) = dims(g);
    if n0 == 0 || n1 == 0 { return Vec::new(); }
    let (k0, k1) = (rows / n0, cols / n1);
    if k0 == 0 || k1 == 0 { return Vec::new(); }
    g[..k0].iter().map(|row| row[..k1].to_vec()).collect()
}

// --- Output-only detectors ---

/// Splits a grid into `l0 x l1` tiles, row-major. Trailing partial tiles are dropped.
pub fn equal_shape_subgrids(g: &Grid, l0: usize, l1: usize) -> Vec<Grid> {
    let (rows, cols) = dims(g);
    if l0 == 0 || l1 == 0 { return Vec::new(); }
    let mut tiles = Vec::new();
    for i in 0..rows / l0 {
        for j in 0..cols / l1 {
            tiles.push(
                g[i * l0..(i + 1) * l0].iter()
                    .map(|row| row[j * l1..(j + 1) * l1].to_vec())
                    .collect(),
            );
        }
    }
    tiles
}

fn factor_fits(rows: usize, cols: usize, n0: usize, n1: usize) -> bool {
    n0 > 0 && n1 > 0
        && rows % n0 == 0 && cols % n1 == 0
        && (n0, n1) != (1, 1)
        && (n0, n1) != (rows, cols)
}

/// True when `g` is some grid zoomed by `(n0, n1)`.
pub fn detect_zoom(g: &Grid, n0: usize, n1: usize) -> bool {
    let (rows, cols) = dims(g);
    if !factor_fits(rows, cols, n0, n1) { return false; }
    equal_shape_subgrids(g, n0, n1).iter().all(|block| {
        let first = block[0][0];
        block.iter().flatten().all(|&c| c == first)
    })
}

/// True when `g` is some grid tiled `(n0, n1)` times.
pub fn detect_repeat(g: &Grid, n0: usize, n1: usize) -> bool {
    let (rows, cols) = dims(g);
    if !factor_fits(rows, cols, n0, n1) { return false; }
    let tiles = equal_shape_subgrids(g, rows / n0, cols / n1);
    tiles.iter().all(|t| *t == tiles[0])
}
