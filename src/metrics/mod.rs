//! Text measurement seam.

pub(crate) mod parley_metrics;
pub(crate) mod text;
