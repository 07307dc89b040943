//! Countdown labels and overlay event scheduling.

pub(crate) mod formatter;
