//! Utility helpers: JSON file reading and writing.
pub mod files;

pub use files::{read_json_file, write_json_file};
