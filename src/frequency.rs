//! Spatial frequency grids
//!
//! The grids are laid out `[ALT, ACT]`: the along-track axis runs over the rows
//! (TOA lines) and the across-track axis over the columns.
//! Every MTF surface computed from a [FrequencyGrid] shares that ordering.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FrequencyError {
    #[error("{name} must be strictly positive and finite, found {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("the number of {0} must be at least 1")]
    EmptyAxis(&'static str),
}
type Result<T> = std::result::Result<T, FrequencyError>;

fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0f64 {
        Ok(value)
    } else {
        Err(FrequencyError::NonPositive { name, value })
    }
}

/// Image size and optical parameters the frequency grid is derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencySpec {
    nlines: usize,
    ncolumns: usize,
    /// telescope diameter [m]
    diameter: f64,
    /// central wavelength of the band [m]
    wavelength: f64,
    /// focal length [m]
    focal_length: f64,
    /// pixel size [m]
    pixel_size: f64,
}
impl FrequencySpec {
    /// Validates the parameters of a new frequency grid
    ///
    /// All the physical scalars must be strictly positive and both image dimensions non-zero
    pub fn new(
        nlines: usize,
        ncolumns: usize,
        diameter: f64,
        wavelength: f64,
        focal_length: f64,
        pixel_size: f64,
    ) -> Result<Self> {
        if nlines == 0 {
            return Err(FrequencyError::EmptyAxis("lines"));
        }
        if ncolumns == 0 {
            return Err(FrequencyError::EmptyAxis("columns"));
        }
        Ok(Self {
            nlines,
            ncolumns,
            diameter: positive("telescope diameter", diameter)?,
            wavelength: positive("wavelength", wavelength)?,
            focal_length: positive("focal length", focal_length)?,
            pixel_size: positive("pixel size", pixel_size)?,
        })
    }
    pub fn nlines(&self) -> usize {
        self.nlines
    }
    pub fn ncolumns(&self) -> usize {
        self.ncolumns
    }
    /// Grid shape `(nlines, ncolumns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nlines, self.ncolumns)
    }
    pub fn diameter(&self) -> f64 {
        self.diameter
    }
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }
    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }
    /// Optics cut-off frequency `D/(λf)` [cycles/m]
    pub fn cutoff_frequency(&self) -> f64 {
        self.diameter / (self.wavelength * self.focal_length)
    }
}

/// Frequency axis of `n` samples from `-1/(2w)` up to, but excluding, `1/(2w)` [cycles/m]
pub fn frequency_axis(n: usize, pixel_size: f64) -> Array1<f64> {
    let step = 1f64 / n as f64 / pixel_size;
    let start = -1f64 / (2f64 * pixel_size);
    Array1::from_shape_fn(n, |k| start + k as f64 * step)
}

fn radial(alt: &Array1<f64>, act: &Array1<f64>) -> Array2<f64> {
    Array2::from_shape_fn((alt.len(), act.len()), |(i, j)| {
        (alt[i] * alt[i] + act[j] * act[j]).sqrt()
    })
}

/// 2D normalised and relative frequencies
#[derive(Debug, Clone)]
pub struct FrequencyGrid {
    /// normalised frequencies 2D `f/(1/w)`
    pub fn2d: Array2<f64>,
    /// relative frequencies 2D `f/fc`
    pub fr2d: Array2<f64>,
    /// 1D normalised frequencies ACT `f/(1/w)`
    pub fn_act: Array1<f64>,
    /// 1D normalised frequencies ALT `f/(1/w)`
    pub fn_alt: Array1<f64>,
    cutoff: f64,
}
impl FrequencyGrid {
    pub fn new(spec: &FrequencySpec) -> Self {
        let w = spec.pixel_size();
        let f_alt = frequency_axis(spec.nlines(), w);
        let f_act = frequency_axis(spec.ncolumns(), w);

        let fc = spec.cutoff_frequency();
        let fr_alt = &f_alt / fc;
        let fr_act = &f_act / fc;

        let fn_alt = &f_alt / (1f64 / w);
        let fn_act = &f_act / (1f64 / w);

        Self {
            fn2d: radial(&fn_alt, &fn_act),
            fr2d: radial(&fr_alt, &fr_act),
            fn_act,
            fn_alt,
            cutoff: fc,
        }
    }
    /// Grid shape `(nlines, ncolumns)`
    pub fn shape(&self) -> (usize, usize) {
        self.fn2d.dim()
    }
    /// Optics cut-off frequency [cycles/m]
    pub fn cutoff_frequency(&self) -> f64 {
        self.cutoff
    }
}

/// Validates the inputs and builds the frequency grid in one go
pub fn frequency_grid(
    nlines: usize,
    ncolumns: usize,
    diameter: f64,
    wavelength: f64,
    focal_length: f64,
    pixel_size: f64,
) -> Result<FrequencyGrid> {
    let spec = FrequencySpec::new(
        nlines,
        ncolumns,
        diameter,
        wavelength,
        focal_length,
        pixel_size,
    )?;
    Ok(FrequencyGrid::new(&spec))
}
