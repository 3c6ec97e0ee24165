//! lingomark-report: Rendering of correction segments and reports.
//!
//! Segments map one-to-one onto styled inline runs: `<span>` elements in
//! HTML, markers in plain text.

pub mod html;
pub mod text;
