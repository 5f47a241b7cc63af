//! System MTF
//!
//! Compositing of the MTF contributors into the system MTF:
//! frequency grid → contributors → product of the contributors.

use std::fmt;

use ndarray::{Array2, Axis};
use strum_macros::EnumIter;

use crate::{
    contributors::{self, ContributorParams},
    cuts::{MtfCuts, Nyquist},
    frequency::{FrequencyGrid, FrequencySpec},
};

#[derive(Debug, thiserror::Error)]
pub enum MtfError {
    #[error("{contributor} MTF is {found:?}, expected {expected:?}")]
    ShapeMismatch {
        contributor: Contributor,
        expected: (usize, usize),
        found: (usize, usize),
    },
}
type Result<T> = std::result::Result<T, MtfError>;

/// System MTF contributors
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Contributor {
    Diffraction,
    Defocus,
    Wfe,
    Detector,
    Smear,
    Motion,
    System,
}
impl fmt::Display for Contributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Contributor::*;
        match self {
            Diffraction => write!(f, "Diffraction"),
            Defocus => write!(f, "Defocus"),
            Wfe => write!(f, "WFE"),
            Detector => write!(f, "Detector"),
            Smear => write!(f, "Smear"),
            Motion => write!(f, "Motion"),
            System => write!(f, "System"),
        }
    }
}

/// The six MTF contributors evaluated on the same frequency grid
#[derive(Debug, Clone)]
pub struct Contributors {
    pub diffraction: Array2<f64>,
    pub defocus: Array2<f64>,
    pub wfe: Array2<f64>,
    pub detector: Array2<f64>,
    pub smear: Array2<f64>,
    pub motion: Array2<f64>,
}
impl Contributors {
    pub fn compute(grid: &FrequencyGrid, wavelength: f64, params: &ContributorParams) -> Self {
        log::debug!("Calculation of the diffraction MTF");
        let diffraction = contributors::diffraction(&grid.fr2d);
        log::debug!("Calculation of the defocus MTF");
        let defocus = contributors::defocus(&grid.fr2d, params.defocus);
        log::debug!("Calculation of the WFE aberrations MTF");
        let wfe = contributors::wfe_aberrations(&grid.fr2d, wavelength, &params.aberrations);
        log::debug!("Calculation of the detector MTF");
        let detector = contributors::detector(&grid.fn2d);
        log::debug!("Calculation of the smearing MTF");
        let (_, ncolumns) = grid.shape();
        let smear = contributors::smearing(&grid.fn_alt, ncolumns, params.ksmear);
        log::debug!("Calculation of the motion blur MTF");
        let motion = contributors::motion(&grid.fn2d, params.kmotion);
        Self {
            diffraction,
            defocus,
            wfe,
            detector,
            smear,
            motion,
        }
    }
    /// Iterator over the contributors and their MTF
    pub fn iter(&self) -> impl Iterator<Item = (Contributor, &Array2<f64>)> + '_ {
        [
            (Contributor::Diffraction, &self.diffraction),
            (Contributor::Defocus, &self.defocus),
            (Contributor::Wfe, &self.wfe),
            (Contributor::Detector, &self.detector),
            (Contributor::Smear, &self.smear),
            (Contributor::Motion, &self.motion),
        ]
        .into_iter()
    }
    /// Returns the MTF of a given contributor, `None` for [Contributor::System]
    pub fn get(&self, contributor: Contributor) -> Option<&Array2<f64>> {
        self.iter()
            .find(|(c, _)| *c == contributor)
            .map(|(_, mtf)| mtf)
    }
}

/// Elementwise product of MTF surfaces
///
/// Every surface must have the given `shape`.
/// No range check is applied: each contributor is responsible for its own bounds.
pub fn compose<'a, I>(surfaces: I, shape: (usize, usize)) -> Result<Array2<f64>>
where
    I: IntoIterator<Item = (Contributor, &'a Array2<f64>)>,
{
    surfaces
        .into_iter()
        .try_fold(Array2::ones(shape), |h, (contributor, mtf)| {
            if mtf.dim() != shape {
                Err(MtfError::ShapeMismatch {
                    contributor,
                    expected: shape,
                    found: mtf.dim(),
                })
            } else {
                Ok(h * mtf)
            }
        })
}

/// Moves the zero frequency from the center to the first sample of both axes
///
/// Converts a centered MTF into the native ordering of a 2D FFT of the same shape.
pub fn ifftshift(surface: &Array2<f64>) -> Array2<f64> {
    let (nlines, ncolumns) = surface.dim();
    let mut shifted = surface.to_owned();
    for (axis, n) in [(Axis(0), nlines), (Axis(1), ncolumns)] {
        let k = n / 2;
        let mut rolled = shifted.clone();
        rolled
            .slice_axis_mut(axis, (..n - k).into())
            .assign(&shifted.slice_axis(axis, (k..).into()));
        rolled
            .slice_axis_mut(axis, (n - k..).into())
            .assign(&shifted.slice_axis(axis, (..k).into()));
        shifted = rolled;
    }
    shifted
}

/// System MTF and its contributors
#[derive(Debug, Clone)]
pub struct SystemMtf {
    spec: FrequencySpec,
    grid: FrequencyGrid,
    contributors: Contributors,
    system: Array2<f64>,
}
impl SystemMtf {
    pub fn spec(&self) -> &FrequencySpec {
        &self.spec
    }
    pub fn grid(&self) -> &FrequencyGrid {
        &self.grid
    }
    pub fn contributors(&self) -> &Contributors {
        &self.contributors
    }
    /// The system MTF `[ALT, ACT]`, zero frequency at the center
    pub fn system(&self) -> &Array2<f64> {
        &self.system
    }
    /// The system MTF in the native FFT ordering
    pub fn fft_ordered(&self) -> Array2<f64> {
        ifftshift(&self.system)
    }
    /// ACT and ALT cuts through the center of all the MTFs
    pub fn cuts(&self) -> MtfCuts {
        MtfCuts::new(self)
    }
    /// System MTF at the Nyquist frequency
    pub fn nyquist(&self) -> Nyquist {
        self.cuts().nyquist()
    }
}

/// Computes the system MTF
pub fn system_mtf(spec: &FrequencySpec, params: &ContributorParams) -> Result<SystemMtf> {
    log::info!("Calculation of the System MTF");

    log::debug!("Calculation of 2D relative frequencies");
    let grid = FrequencyGrid::new(spec);

    let contributors = Contributors::compute(&grid, spec.wavelength(), params);

    log::debug!("Calculation of the System MTF by multiplying the different contributors");
    let system = compose(contributors.iter(), grid.shape())?;

    let mtf = SystemMtf {
        spec: *spec,
        grid,
        contributors,
        system,
    };
    let Nyquist { act, alt } = mtf.nyquist();
    log::info!("MTF@Nyquist: ACT {act:.3?}, ALT {alt:.3?}");

    Ok(mtf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{contributors::Aberrations, frequency::FrequencyError};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;

    fn reference_spec() -> FrequencySpec {
        FrequencySpec::new(100, 100, 0.5, 550e-9, 1.0, 13e-6).unwrap()
    }

    fn realistic_params() -> ContributorParams {
        ContributorParams::default()
            .defocus(0.5)
            .aberrations(Aberrations::new(1., 30e-9, 1., 20e-9))
            .smear(1.)
            .motion(0.25)
    }

    #[test]
    fn ideal_instrument() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mtf = system_mtf(&reference_spec(), &ContributorParams::default()).unwrap();
        let c = mtf.contributors();
        assert_relative_eq!(
            *mtf.system(),
            &c.diffraction * &c.detector,
            max_relative = 1e-14
        );
        assert_abs_diff_eq!(mtf.system()[[50, 50]], 1f64, epsilon = 1e-6);
    }

    #[test]
    fn zero_diameter() {
        assert!(matches!(
            FrequencySpec::new(100, 100, 0.0, 550e-9, 1.0, 13e-6),
            Err(FrequencyError::NonPositive { .. })
        ));
    }

    #[test]
    fn product_of_contributors() {
        let mtf = system_mtf(&reference_spec(), &realistic_params()).unwrap();
        let c = mtf.contributors();
        let expected = &c.motion * &c.smear * &c.detector * &c.wfe * &c.defocus * &c.diffraction;
        assert_relative_eq!(*mtf.system(), expected, max_relative = 1e-14);
        let reversed = compose(
            c.iter().collect::<Vec<_>>().into_iter().rev(),
            mtf.grid().shape(),
        )
        .unwrap();
        assert_relative_eq!(*mtf.system(), reversed, max_relative = 1e-14);
    }

    #[test]
    fn bounded_system() {
        let mtf = system_mtf(&reference_spec(), &realistic_params()).unwrap();
        for (_, h) in mtf.contributors().iter() {
            assert!(h.iter().all(|x| (0f64..=1f64).contains(x)));
        }
        assert!(mtf.system().iter().all(|x| (0f64..=1f64).contains(x)));
    }

    #[test]
    fn beyond_cutoff() {
        // fc = 0.01/(550e-9 x 1) is lower than the Nyquist frequency
        let spec = FrequencySpec::new(64, 64, 0.01, 550e-9, 1.0, 13e-6).unwrap();
        let mtf = system_mtf(&spec, &realistic_params()).unwrap();
        assert!(mtf.grid().fr2d.iter().any(|r| *r > 1f64));
        assert!(mtf.system().iter().all(|x| x.is_finite()));
        mtf.grid()
            .fr2d
            .iter()
            .zip(mtf.system().iter())
            .filter(|(r, _)| **r >= 1f64)
            .for_each(|(_, h)| assert_eq!(*h, 0f64));
    }

    #[test]
    fn shape_mismatch() {
        let a = Array2::<f64>::ones((4, 5));
        let b = Array2::<f64>::ones((5, 4));
        match compose([(Contributor::Diffraction, &a), (Contributor::Smear, &b)], (4, 5)) {
            Err(MtfError::ShapeMismatch {
                contributor,
                expected,
                found,
            }) => {
                assert_eq!(contributor, Contributor::Smear);
                assert_eq!(expected, (4, 5));
                assert_eq!(found, (5, 4));
            }
            _ => panic!("expected a shape mismatch"),
        }
    }

    #[test]
    fn contributor_lookup() {
        let mtf = system_mtf(&reference_spec(), &realistic_params()).unwrap();
        let c = mtf.contributors();
        assert_eq!(c.get(Contributor::Wfe), Some(&c.wfe));
        assert!(c.get(Contributor::System).is_none());
        assert_eq!(c.iter().count(), 6);
    }

    #[test]
    fn fft_ordering() {
        let h = array![[0., 1., 2.], [3., 4., 5.], [6., 7., 8.], [9., 10., 11.]];
        assert_eq!(
            ifftshift(&h),
            array![[7., 8., 6.], [10., 11., 9.], [1., 2., 0.], [4., 5., 3.]]
        );
        let mtf = system_mtf(&reference_spec(), &realistic_params()).unwrap();
        let shifted = mtf.fft_ordered();
        assert_eq!(shifted[[0, 0]], mtf.system()[[50, 50]]);
        assert_eq!(shifted.dim(), mtf.system().dim());
    }
}
