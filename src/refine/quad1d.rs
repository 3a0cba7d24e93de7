//! Quadratic 1D fitting for subpixel disparity refinement.

/// Estimates the sub-sample offset of a cost minimum from a quadratic fit.
///
/// Given costs at `x = -1, 0, +1` (`fm`, `f0`, `fp`), returns the offset `dx`
/// in `[-1, 1]` of the vertex when the fitted parabola opens upwards. Flat,
/// concave or non-finite fits return `None`.
pub fn quad_min_offset_1d(fm: f32, f0: f32, fp: f32) -> Option<f32> {
    if !fm.is_finite() || !f0.is_finite() || !fp.is_finite() {
        return None;
    }

    let denom = fm - 2.0 * f0 + fp;
    let eps = 1e-6f32;
    if denom <= eps {
        return None;
    }

    let dx = 0.5 * (fm - fp) / denom;
    if dx.is_finite() && dx.abs() <= 1.0 {
        Some(dx)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::quad_min_offset_1d;

    #[test]
    fn symmetric_valley_has_zero_offset() {
        let dx = quad_min_offset_1d(0.4, 0.1, 0.4).unwrap();
        assert!(dx.abs() < 1e-6);
    }

    #[test]
    fn shifted_valley_recovers_vertex() {
        let f = |x: f32| 0.2 + (x + 0.3).powi(2);
        let dx = quad_min_offset_1d(f(-1.0), f(0.0), f(1.0)).unwrap();
        assert!((dx + 0.3).abs() < 1e-5);
    }

    #[test]
    fn flat_or_peaked_costs_are_rejected() {
        assert!(quad_min_offset_1d(0.5, 0.5, 0.5).is_none());
        assert!(quad_min_offset_1d(0.1, 0.5, 0.1).is_none());
        assert!(quad_min_offset_1d(f32::NAN, 0.5, 0.1).is_none());
    }
}
