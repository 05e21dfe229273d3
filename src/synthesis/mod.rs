pub mod augment;
pub mod candidates;
pub mod checks;
pub mod search;

pub use augment::Augment;
pub use candidates::ExtractionMode;
pub use search::{predict_part, predict_part_types, Catalog, Hypothesis, SearchOutcome, Solution};
