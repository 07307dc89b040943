//! Character classification and Zhuyin lookup.

pub(crate) mod resolver;
pub(crate) mod table;
