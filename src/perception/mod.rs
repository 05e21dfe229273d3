pub mod background;
pub mod features;
pub mod labeling;
pub mod rectangle;
pub mod segment;
pub mod task;

pub use background::{detect_bg, BgMode};
pub use labeling::Touch;
pub use segment::{Direction, Segmentation};
pub use task::Task;
