pub mod core;
pub mod perception;
pub mod synthesis;
pub mod bench;
pub mod config;
