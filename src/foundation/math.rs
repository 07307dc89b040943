/// Round to the nearest pixel, ties to even.
pub(crate) fn round_px(v: f64) -> i64 {
    if !v.is_finite() {
        return 0;
    }
    v.round_ties_even() as i64
}

/// Round a time boundary to 6 decimal places so plans serialize identically.
pub(crate) fn round6(v: f64) -> f64 {
    let r = (v * 1_000_000.0).round() / 1_000_000.0;
    // Normalize -0.0 so serialized output never carries a sign on zero.
    if r == 0.0 { 0.0 } else { r }
}

/// Clamp a signed pixel quantity into `u32`.
pub(crate) fn px_u32(v: i64) -> u32 {
    u32::try_from(v.max(0)).unwrap_or(u32::MAX)
}
