pub mod arc;
pub mod runner;
