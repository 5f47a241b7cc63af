//! Platform motion contributions
//!
//! The smear happens along-track only during the integration time,
//! the motion blur (jitter) is isotropic.

use ndarray::{Array1, Array2};

use super::sinc;

/// Smearing MTF
///
/// `sinc(ksmear·fnAlt)` along-track, replicated across the `ncolumns` ACT columns
pub fn smearing(fn_alt: &Array1<f64>, ncolumns: usize, ksmear: f64) -> Array2<f64> {
    let h_alt = fn_alt.mapv(|f| sinc(ksmear * f));
    Array2::from_shape_fn((h_alt.len(), ncolumns), |(i, _)| h_alt[i])
}

/// Motion blur MTF
///
/// `sinc(kmotion·fn)`
pub fn motion(fn2d: &Array2<f64>, kmotion: f64) -> Array2<f64> {
    fn2d.mapv(|f| sinc(kmotion * f))
}
