//! MTF contributors
//!
//! Analytical models of the six independent contributions to the system MTF.
//! Each model maps a frequency grid to a surface of the same shape.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

mod detector;
mod motion;
mod optics;
pub use detector::detector;
pub use motion::{motion, smearing};
pub use optics::{defocus, diffraction, wfe_aberrations, Aberrations};

/// Normalised sinc: `sin(πx)/(πx)` with `sinc(0) = 1`
pub fn sinc(x: f64) -> f64 {
    if x == 0f64 {
        1f64
    } else {
        let pix = PI * x;
        pix.sin() / pix
    }
}

/// Physical parameters of the MTF contributors
///
/// The default is the ideal instrument: no defocus, no wavefront error, no smear and no motion blur
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributorParams {
    /// Defocus coefficient (defocus/(f/N)), 0-2 is low defocusing
    pub defocus: f64,
    /// Wavefront error aberrations
    pub aberrations: Aberrations,
    /// Amplitude of the low-frequency smear in ALT [pixels]
    pub ksmear: f64,
    /// Amplitude of the high-frequency motion blur in ALT and ACT
    pub kmotion: f64,
}
impl ContributorParams {
    pub fn defocus(self, defocus: f64) -> Self {
        Self { defocus, ..self }
    }
    pub fn aberrations(self, aberrations: Aberrations) -> Self {
        Self {
            aberrations,
            ..self
        }
    }
    pub fn smear(self, ksmear: f64) -> Self {
        Self { ksmear, ..self }
    }
    pub fn motion(self, kmotion: f64) -> Self {
        Self { kmotion, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sinc_values() {
        assert_eq!(sinc(0f64), 1f64);
        assert_abs_diff_eq!(sinc(1f64), 0f64, epsilon = 1e-15);
        assert_abs_diff_eq!(sinc(0.5), 2f64 / PI, epsilon = 1e-15);
        assert_abs_diff_eq!(sinc(-0.5), sinc(0.5));
        assert_abs_diff_eq!(sinc(1e-12), 1f64, epsilon = 1e-15);
    }

    #[test]
    fn params_builder() {
        let params = ContributorParams::default()
            .defocus(0.5)
            .smear(1.)
            .motion(0.25)
            .aberrations(Aberrations::new(1., 30e-9, 1., 20e-9));
        assert_eq!(params.defocus, 0.5);
        assert_eq!(params.ksmear, 1.);
        assert_eq!(params.kmotion, 0.25);
        assert_eq!(params.aberrations.w_hf, 20e-9);
    }
}
