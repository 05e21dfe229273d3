// Grid primitives shared by every stage.
//
// A Grid holds colour codes (0..=9 in practice). A Mask is a binary grid of
// the same shape as its source. A ColoredView is a grid where cells outside an
// object are `None` (the "off-object" sentinel).

pub type Color = u8;
pub type Grid = Vec<Vec<Color>>;
pub type Mask = Vec<Vec<bool>>;
pub type ColoredView = Vec<Vec<Option<Color>>>;

pub fn dims<T>(grid: &[Vec<T>]) -> (usize, usize) {
    if grid.is_empty() { (0, 0) } else { (grid.len(), grid[0].len()) }
}

pub fn area<T>(grid: &[Vec<T>]) -> usize {
    let (rows, cols) = dims(grid);
    rows * cols
}

pub fn empty_mask(rows: usize, cols: usize) -> Mask {
    vec![vec![false; cols]; rows]
}

pub fn mask_where(grid: &Grid, pred: impl Fn(Color) -> bool) -> Mask {
    grid.iter().map(|row| row.iter().map(|&c| pred(c)).collect()).collect()
}

pub fn mask_count(mask: &Mask) -> usize {
    mask.iter().map(|row| row.iter().filter(|&&m| m).count()).sum()
}

pub fn mask_is_empty(mask: &Mask) -> bool {
    mask.iter().all(|row| row.iter().all(|&m| !m))
}

/// Colours present in the grid, ascending.
pub fn all_colors(grid: &Grid) -> Vec<Color> {
    let mut seen = [false; 256];
    for row in grid {
        for &c in row {
            seen[c as usize] = true;
        }
    }
    (0..=255u8).filter(|&c| seen[c as usize]).collect()
}

/// `(colour, count)` pairs, ascending by colour, over the cells selected by `mask`
/// (all cells when `mask` is `None`).
pub fn color_counts(grid: &Grid, mask: Option<&Mask>) -> Vec<(Color, usize)> {
    let mut counts = [0usize; 256];
    for (r, row) in grid.iter().enumerate() {
        for (c, &color) in row.iter().enumerate() {
            if mask.map_or(true, |m| m[r][c]) {
                counts[color as usize] += 1;
            }
        }
    }
    counts.iter().enumerate()
        .filter(|(_, &n)| n > 0)
        .map(|(color, &n)| (color as Color, n))
        .collect()
}

// Ties resolve to the smallest colour.
pub fn most_common(counts: &[(Color, usize)]) -> Option<Color> {
    let mut best: Option<(Color, usize)> = None;
    for &(color, n) in counts {
        if best.map_or(true, |(_, bn)| n > bn) {
            best = Some((color, n));
        }
    }
    best.map(|(c, _)| c)
}

pub fn least_common(counts: &[(Color, usize)]) -> Option<Color> {
    let mut best: Option<(Color, usize)> = None;
    for &(color, n) in counts {
        if best.map_or(true, |(_, bn)| n < bn) {
            best = Some((color, n));
        }
    }
    best.map(|(c, _)| c)
}

pub fn most_common_color(grid: &Grid) -> Option<Color> {
    most_common(&color_counts(grid, None))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub min_r: usize,
    pub max_r: usize,
    pub min_c: usize,
    pub max_c: usize,
}

impl BoundingBox {
    /// Tight box around the set cells; an empty mask has none.
    pub fn of(mask: &Mask) -> crate::core::Result<Self> {
        let mut bbox: Option<BoundingBox> = None;
        for (r, row) in mask.iter().enumerate() {
            for (c, _) in row.iter().enumerate().filter(|(_, &m)| m) {
                bbox = Some(match bbox {
                    None => BoundingBox { min_r: r, max_r: r, min_c: c, max_c: c },
                    Some(b) => BoundingBox {
                        min_r: b.min_r.min(r),
                        max_r: b.max_r.max(r),
                        min_c: b.min_c.min(c),
                        max_c: b.max_c.max(c),
                    },
                });
            }
        }
        bbox.ok_or(crate::core::ArcError::EmptyMask)
    }

    pub fn height(&self) -> usize { self.max_r - self.min_r + 1 }
    pub fn width(&self) -> usize { self.max_c - self.min_c + 1 }
    pub fn area(&self) -> usize { self.height() * self.width() }

    pub fn contains(&self, r: usize, c: usize) -> bool {
        r >= self.min_r && r <= self.max_r && c >= self.min_c && c <= self.max_c
    }

    pub fn crop<T: Clone>(&self, grid: &[Vec<T>]) -> Vec<Vec<T>> {
        sub_grid(grid, self.min_r, self.max_r, self.min_c, self.max_c)
    }

    /// Mask of `rows` x `cols` with exactly this box set.
    pub fn to_mask(&self, rows: usize, cols: usize) -> Mask {
        (0..rows).map(|r| (0..cols).map(|c| self.contains(r, c)).collect()).collect()
    }
}

pub fn sub_grid<T: Clone>(grid: &[Vec<T>], min_r: usize, max_r: usize, min_c: usize, max_c: usize) -> Vec<Vec<T>> {
    grid[min_r..=max_r].iter().map(|row| row[min_c..=max_c].to_vec()).collect()
}
