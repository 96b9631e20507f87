//! Infrastructure layer - storage-backed implementations of domain interfaces

pub mod file_history;

pub use file_history::FileHistorySource;
