use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArcError {
    EmptyMask,
    RaggedGrid { row: usize, expected: usize, found: usize },
    InvalidTask(String),
    UnknownSplit(String),
    MissingTestOutputs,
}

impl fmt::Display for ArcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMask => write!(f, "object mask has no set cells"),
            Self::RaggedGrid { row, expected, found } => {
                write!(f, "ragged grid: row {} has {} cells, expected {}", row, found, expected)
            }
            Self::InvalidTask(msg) => write!(f, "invalid task: {}", msg),
            Self::UnknownSplit(name) => write!(f, "unknown data split: {:?} (expected train or test)", name),
            Self::MissingTestOutputs => write!(f, "task has no test outputs"),
        }
    }
}

impl std::error::Error for ArcError {}

pub type Result<T> = std::result::Result<T, ArcError>;
