//! CLI library components for sheetsift.

pub mod logging;
pub mod render;
pub mod report;
