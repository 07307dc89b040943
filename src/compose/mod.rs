//! Card layout: configuration, style, placement and the combined clip plan.

pub(crate) mod clip;
pub(crate) mod composer;
pub(crate) mod config;
pub(crate) mod model;
pub(crate) mod style;
pub(crate) mod underline;
