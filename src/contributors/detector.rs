use ndarray::Array2;

use super::sinc;

/// Detector MTF
///
/// `|sinc(fn)|`, the integrating aperture of a square pixel
pub fn detector(fn2d: &Array2<f64>) -> Array2<f64> {
    fn2d.mapv(|f| sinc(f).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn detector_unit_at_origin() {
        assert_eq!(detector(&array![[0f64]])[[0, 0]], 1f64);
    }

    #[test]
    fn detector_at_nyquist() {
        let h = detector(&array![[0.5, 2f64.sqrt() / 2f64]]);
        assert_abs_diff_eq!(h[[0, 0]], 2f64 / std::f64::consts::PI, epsilon = 1e-15);
        assert!(h[[0, 1]] < h[[0, 0]]);
    }

    #[test]
    fn detector_bounded() {
        let fn2d = Array2::from_shape_fn((20, 30), |(i, j)| 0.17 * i as f64 + 0.05 * j as f64);
        assert!(detector(&fn2d)
            .iter()
            .all(|x| (0f64..=1f64).contains(x)));
    }
}
