//! Index arithmetic shared by the diffusion and search stages.

/// Manhattan length of a window offset.
#[inline]
pub(crate) fn manhattan(u: isize, v: isize) -> usize {
    u.unsigned_abs() + v.unsigned_abs()
}

/// Shifts `x` by `delta`, returning `None` when the result leaves `[0, len)`.
#[inline]
pub(crate) fn shift_index(x: usize, delta: isize, len: usize) -> Option<usize> {
    let shifted = x.checked_add_signed(delta)?;
    (shifted < len).then_some(shifted)
}

/// Inclusive span `[2x - 1, 2x + 2]` covered by a parent coordinate at the
/// next finer level, clamped to `[0, len)`.
///
/// `len` must be non-zero.
#[inline]
pub(crate) fn upsampled_span(x: usize, len: usize) -> (usize, usize) {
    debug_assert!(len > 0);
    let last = len - 1;
    let lo = (2 * x).saturating_sub(1).min(last);
    let hi = (2 * x + 2).min(last);
    (lo, hi)
}

/// Returns true when `next` is `prev` halved, rounding either way.
#[inline]
pub(crate) fn is_half_of(prev: usize, next: usize) -> bool {
    next == prev / 2 || next == prev.div_ceil(2)
}
