pub mod error;
pub mod types;

pub use error::{ArcError, Result};
pub use types::{BoundingBox, Color, ColoredView, Grid, Mask};
