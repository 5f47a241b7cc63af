//! Optics contributions: diffraction, defocus and wavefront error aberrations
//!
//! All three are functions of the relative frequency `fr = f/fc`.

use std::f64::consts::PI;

use ndarray::Array2;
use scilib::math::bessel;
use serde::{Deserialize, Serialize};

// below this argument 2J1(x)/x is 1 to machine precision
const DEFOCUS_LIMIT: f64 = 1e-8;

/// Circular aperture diffraction, zero at and beyond the cut-off
fn diffraction_at(r: f64) -> f64 {
    if r >= 1f64 {
        return 0f64;
    }
    if r == 0f64 {
        return 1f64;
    }
    (2f64 / PI * (r.acos() - r * (1f64 - r * r).sqrt())).clamp(0f64, 1f64)
}

fn defocus_at(r: f64, coefficient: f64) -> f64 {
    let r = r.clamp(0f64, 1f64);
    let x = PI * coefficient * r * (1f64 - r);
    if x.abs() < DEFOCUS_LIMIT {
        1f64
    } else {
        (2f64 * bessel::j_n(1, x) / x).clamp(0f64, 1f64)
    }
}

/// Optics diffraction MTF
///
/// `2/π (acos(fr) - fr √(1-fr²))`, set to 0 for `fr ≥ 1`
pub fn diffraction(fr2d: &Array2<f64>) -> Array2<f64> {
    fr2d.mapv(diffraction_at)
}

/// Defocus MTF
///
/// `2J1(x)/x` with `x = π·defocus·fr(1-fr)`; the indeterminate form at `x = 0`
/// (zero frequency, cut-off frequency or no defocus) evaluates to its limit 1.
/// Past the first zero of J1 the contrast is lost and the MTF is set to 0.
pub fn defocus(fr2d: &Array2<f64>, coefficient: f64) -> Array2<f64> {
    fr2d.mapv(|r| defocus_at(r, coefficient))
}

/// Wavefront error budget
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aberrations {
    /// empirical coefficient for the low-frequency wavefront errors
    pub k_lf: f64,
    /// RMS of the low-frequency wavefront errors [m]
    pub w_lf: f64,
    /// empirical coefficient for the high-frequency wavefront errors
    pub k_hf: f64,
    /// RMS of the high-frequency wavefront errors [m]
    pub w_hf: f64,
}
impl Aberrations {
    pub fn new(k_lf: f64, w_lf: f64, k_hf: f64, w_hf: f64) -> Self {
        Self {
            k_lf,
            w_lf,
            k_hf,
            w_hf,
        }
    }
    /// Weighted squared wavefront error in waves
    pub fn weight(&self, wavelength: f64) -> f64 {
        self.k_lf * (self.w_lf / wavelength).powi(2) + self.k_hf * (self.w_hf / wavelength).powi(2)
    }
}

/// Wavefront error aberrations MTF
///
/// `exp(-fr(1-fr)(kLF(wLF/λ)² + kHF(wHF/λ)²))`
pub fn wfe_aberrations(
    fr2d: &Array2<f64>,
    wavelength: f64,
    aberrations: &Aberrations,
) -> Array2<f64> {
    let weight = aberrations.weight(wavelength);
    fr2d.mapv(|r| {
        let r = r.clamp(0f64, 1f64);
        (-r * (1f64 - r) * weight).exp()
    })
}
