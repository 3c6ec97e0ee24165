//! lingomark-core: Answer correction engine and quiz data model.
//!
//! This crate turns learner answers into classified text segments for
//! highlighted rendering, and loads and reports on quiz submissions.

pub mod correction;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod spans;
pub mod summary;
