//! Vertical Zhuyin columns beside Han characters.

pub(crate) mod column;
