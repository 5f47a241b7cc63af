//! Diagnostic cuts
//!
//! 1D cuts through the center of the MTF surfaces:
//! the ACT cut is the row at `nlines/2` and the ALT cut the column at `ncolumns/2`.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2, Axis};

use crate::system::{Contributor, SystemMtf};

/// Nyquist frequency [cycles/pixel]
pub const NYQUIST: f64 = 0.5;
const SNAP: f64 = 1e-9;

/// ACT and ALT cuts through the center of an MTF surface
pub fn center_cuts(surface: &Array2<f64>) -> (Array1<f64>, Array1<f64>) {
    let (nlines, ncolumns) = surface.dim();
    (
        surface.index_axis(Axis(0), nlines / 2).to_owned(),
        surface.index_axis(Axis(1), ncolumns / 2).to_owned(),
    )
}

/// MTF cuts along one direction
#[derive(Debug, Clone, Default)]
pub struct Cut {
    /// normalised frequencies `f/(1/w)`
    pub frequency: Array1<f64>,
    pub mtf: BTreeMap<Contributor, Array1<f64>>,
}
impl Cut {
    pub fn new(frequency: Array1<f64>) -> Self {
        Self {
            frequency,
            ..Default::default()
        }
    }
    pub fn get(&self, contributor: Contributor) -> Option<&Array1<f64>> {
        self.mtf.get(&contributor)
    }
    /// Linear interpolation of a contributor cut at the given frequency
    ///
    /// Returns `None` if the frequency is outside the cut range
    pub fn at(&self, frequency: f64, contributor: Contributor) -> Option<f64> {
        let mtf = self.get(contributor)?;
        let f = &self.frequency;
        let n = f.len();
        if n == 0 {
            return None;
        }
        // snaps to the end samples that are only off by rounding
        let frequency = if (frequency - f[0]).abs() < SNAP {
            f[0]
        } else if (frequency - f[n - 1]).abs() < SNAP {
            f[n - 1]
        } else {
            frequency
        };
        if frequency < f[0] || frequency > f[n - 1] {
            return None;
        }
        if n == 1 {
            return Some(mtf[0]);
        }
        let k = (1..n).find(|&k| f[k] >= frequency)?;
        let t = (frequency - f[k - 1]) / (f[k] - f[k - 1]);
        Some(mtf[k - 1] + t * (mtf[k] - mtf[k - 1]))
    }
    /// MTF of a contributor at the Nyquist frequency
    ///
    /// The frequency axis stops one sample short of +Nyquist but starts at -Nyquist;
    /// the MTFs being even, the negative side is used when the positive one is not sampled
    pub fn nyquist(&self, contributor: Contributor) -> Option<f64> {
        self.at(NYQUIST, contributor)
            .or_else(|| self.at(-NYQUIST, contributor))
    }
}

/// System MTF at Nyquist frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nyquist {
    pub act: Option<f64>,
    pub alt: Option<f64>,
}

/// ACT and ALT cuts through the center of the system MTF and its contributors
#[derive(Debug, Clone)]
pub struct MtfCuts {
    pub act: Cut,
    pub alt: Cut,
}
impl MtfCuts {
    pub fn new(mtf: &SystemMtf) -> Self {
        let grid = mtf.grid();
        let mut act = Cut::new(grid.fn_act.clone());
        let mut alt = Cut::new(grid.fn_alt.clone());
        for (contributor, surface) in mtf
            .contributors()
            .iter()
            .chain(Some((Contributor::System, mtf.system())))
        {
            let (act_cut, alt_cut) = center_cuts(surface);
            act.mtf.insert(contributor, act_cut);
            alt.mtf.insert(contributor, alt_cut);
        }
        Self { act, alt }
    }
    /// System MTF at the Nyquist frequency along ACT and ALT
    pub fn nyquist(&self) -> Nyquist {
        Nyquist {
            act: self.act.nyquist(Contributor::System),
            alt: self.alt.nyquist(Contributor::System),
        }
    }
}
