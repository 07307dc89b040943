//! Glyph-image letter runs.

pub(crate) mod catalog;
pub(crate) mod planner;
