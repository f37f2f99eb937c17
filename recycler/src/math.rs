//! Float helpers that stay available without `std`.

pub(crate) fn abs(v: f32) -> f32 {
    if v < 0.0 { -v } else { v }
}

/// `ceil(numerator / denominator)` as a count. `denominator` must be positive.
pub(crate) fn ceil_ratio(numerator: f32, denominator: f32) -> usize {
    let q = numerator / denominator;
    if !(q > 0.0) {
        return 0;
    }
    let floor = q as usize;
    if (floor as f32) < q { floor + 1 } else { floor }
}

/// Replaces negative and NaN extents with zero.
pub(crate) fn extent(v: f32) -> f32 {
    debug_assert!(!v.is_infinite(), "extents must be finite; got {v}");
    if v > 0.0 { v } else { 0.0 }
}
