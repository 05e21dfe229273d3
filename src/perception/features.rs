// Object feature extraction.
//
// An Object is a read-only bundle derived from (grid, mask): bounding box,
// colour histogram, cropped views and, one level down, the objects nested
// inside it. Nothing here mutates the source grid.

use serde::Serialize;

use crate::core::types::{color_counts, dims, least_common, mask_count, most_common};
use crate::core::{ArcError, BoundingBox, Color, ColoredView, Grid, Mask, Result};
use super::labeling::Touch;
use super::segment::color_components;

/// Nesting stops after this many levels unless a caller asks otherwise.
pub const DEFAULT_NESTED_DEPTH: usize = 1;

pub fn rectangle_mask(mask: &Mask) -> Result<Mask> {
    let (rows, cols) = dims(mask);
    Ok(BoundingBox::of(mask)?.to_mask(rows, cols))
}

pub fn is_rectangle(mask: &Mask) -> Result<bool> {
    Ok(rectangle_mask(mask)? == *mask)
}

/// Source colours inside the mask, `None` outside.
pub fn colored_view(grid: &Grid, mask: &Mask) -> ColoredView {
    grid.iter().zip(mask)
        .map(|(row, mrow)| row.iter().zip(mrow).map(|(&c, &m)| m.then_some(c)).collect())
        .collect()
}

/// Splits a mask into its border (first and last set cell of every row and
/// column) and the remaining inner cells.
pub fn object_parts(mask: &Mask) -> (Mask, Mask) {
    let (rows, cols) = dims(mask);
    let mut border = vec![vec![false; cols]; rows];
    for r in 0..rows {
        let set: Vec<usize> = (0..cols).filter(|&c| mask[r][c]).collect();
        if let (Some(&first), Some(&last)) = (set.first(), set.last()) {
            border[r][first] = true;
            border[r][last] = true;
        }
    }
    for c in 0..cols {
        let set: Vec<usize> = (0..rows).filter(|&r| mask[r][c]).collect();
        if let (Some(&first), Some(&last)) = (set.first(), set.last()) {
            border[first][c] = true;
            border[last][c] = true;
        }
    }
    let inner = mask.iter().zip(&border)
        .map(|(mrow, brow)| mrow.iter().zip(brow).map(|(&m, &b)| m && !b).collect())
        .collect();
    (border, inner)
}

/// Features of an object without looking inside it.
#[derive(Debug, Clone)]
pub struct BaseObject<'a> {
    grid: &'a Grid,
    pub mask: Mask,
    pub bbox: BoundingBox,
    pub rectangle_mask: Mask,
    pub colored: ColoredView,
    pub cropped_mask: Mask,
    pub cropped_object: ColoredView,
    pub size: usize,
    pub is_rectangle: bool,
    pub color_counts: Vec<(Color, usize)>,
    pub most_common_color: Color,
    pub least_common_color: Color,
}

impl<'a> BaseObject<'a> {
    pub fn new(grid: &'a Grid, mask: Mask) -> Result<Self> {
        let bbox = BoundingBox::of(&mask)?;
        let (rows, cols) = dims(&mask);
        let rectangle_mask = bbox.to_mask(rows, cols);
        let colored = colored_view(grid, &mask);
        let counts = color_counts(grid, Some(&mask));
        let most_common_color = most_common(&counts).ok_or(ArcError::EmptyMask)?;
        let least_common_color = least_common(&counts).ok_or(ArcError::EmptyMask)?;

        Ok(Self {
            grid,
            cropped_mask: bbox.crop(&mask),
            cropped_object: bbox.crop(&colored),
            size: mask_count(&mask),
            is_rectangle: rectangle_mask == mask,
            rectangle_mask,
            colored,
            color_counts: counts,
            most_common_color,
            least_common_color,
            bbox,
            mask,
        })
    }

    /// Another object over the same source grid.
    pub fn sibling(&self, mask: Mask) -> Result<BaseObject<'a>> {
        BaseObject::new(self.grid, mask)
    }

    pub fn height(&self) -> usize { self.bbox.height() }
    pub fn width(&self) -> usize { self.bbox.width() }
    pub fn area(&self) -> usize { self.bbox.area() }
    pub fn n_colors(&self) -> usize { self.color_counts.len() }
}

#[derive(Debug, Clone)]
pub struct Object<'a> {
    pub base: BaseObject<'a>,
    /// Components inside the object once its dominant colour is blanked.
    pub nested_objects: Vec<Object<'a>>,
    /// Union of the object's cells not of its dominant colour, when any.
    pub nested_object: Option<BaseObject<'a>>,
}

impl<'a> Object<'a> {
    pub fn new(grid: &'a Grid, mask: Mask) -> Result<Self> {
        Self::with_depth(grid, mask, DEFAULT_NESTED_DEPTH)
    }

    /// `depth` bounds the recursion: at 0 no nested objects are extracted.
    pub fn with_depth(grid: &'a Grid, mask: Mask, depth: usize) -> Result<Self> {
        let base = BaseObject::new(grid, mask)?;
        if depth == 0 {
            return Ok(Self { base, nested_objects: Vec::new(), nested_object: None });
        }

        let dominant = base.most_common_color;
        let inner: ColoredView = base.colored.iter().enumerate()
            .map(|(r, row)| row.iter().enumerate().map(|(c, &cell)| {
                cell.filter(|&color| color != dominant && base.bbox.contains(r, c))
            }).collect())
            .collect();

        let nested_objects = color_components(&inner, Touch::Wall).into_iter()
            .map(|m| Object::with_depth(grid, m, depth - 1))
            .collect::<Result<Vec<_>>>()?;

        let nested_object = if base.n_colors() > 1 {
            let union: Mask = inner.iter()
                .map(|row| row.iter().map(Option::is_some).collect())
                .collect();
            Some(base.sibling(union)?)
        } else {
            None
        };

        Ok(Self { base, nested_objects, nested_object })
    }

    pub fn features(&self) -> FeatureRecord {
        let b = &self.base;
        let nested = self.nested_object.as_ref();
        FeatureRecord {
            size: b.size,
            height: b.height(),
            width: b.width(),
            area: b.area(),
            n_colors: b.n_colors(),
            min_r: b.bbox.min_r,
            max_r: b.bbox.max_r,
            min_c: b.bbox.min_c,
            max_c: b.bbox.max_c,
            nested_object_size: nested.map(|n| n.size),
            nested_objects_count: self.nested_objects.len(),
            cropped_map: mask_to_bits(&b.cropped_mask),
            cropped_object: view_to_cells(&b.cropped_object),
            is_rectangle: b.is_rectangle,
            most_common_color: b.most_common_color,
            least_common_color: b.least_common_color,
            nested_object_shape: nested.map(|n| mask_to_bits(&n.cropped_mask)),
            nested_object_most_common_color: nested.map(|n| n.most_common_color),
        }
    }
}

pub fn make_objects<'a>(grid: &'a Grid, masks: Vec<Mask>, depth: usize) -> Result<Vec<Object<'a>>> {
    masks.into_iter().map(|m| Object::with_depth(grid, m, depth)).collect()
}

/// Exported view of an object. Off-object cells of `cropped_object` are -1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRecord {
    pub size: usize,
    pub height: usize,
    pub width: usize,
    pub area: usize,
    pub n_colors: usize,
    pub min_r: usize,
    pub max_r: usize,
    pub min_c: usize,
    pub max_c: usize,
    pub nested_object_size: Option<usize>,
    pub nested_objects_count: usize,
    pub cropped_map: Vec<Vec<u8>>,
    pub cropped_object: Vec<Vec<i16>>,
    pub is_rectangle: bool,
    pub most_common_color: Color,
    pub least_common_color: Color,
    pub nested_object_shape: Option<Vec<Vec<u8>>>,
    pub nested_object_most_common_color: Option<Color>,
}

fn mask_to_bits(mask: &Mask) -> Vec<Vec<u8>> {
    mask.iter().map(|row| row.iter().map(|&m| m as u8).collect()).collect()
}

fn view_to_cells(view: &ColoredView) -> Vec<Vec<i16>> {
    view.iter()
        .map(|row| row.iter().map(|cell| cell.map_or(-1, |c| c as i16)).collect())
        .collect()
}
