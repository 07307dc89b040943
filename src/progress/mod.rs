//! Tri-color countdown progress bar.

pub(crate) mod bands;
pub(crate) mod segmenter;
