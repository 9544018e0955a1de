// Declare all modules
pub mod config;
pub mod directory;
pub mod opportunities;
pub mod storage;
pub mod utils;

// No re-exports here as they're handled in lib.rs
