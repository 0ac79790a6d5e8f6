//! quizsmith-store — JSON file persistence and result history.

pub mod history;
pub mod json;

pub use json::{JsonStore, StoreError};
