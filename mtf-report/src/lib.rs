//! System MTF report
//!
//! Computes the system MTF of the imager bands, exports the MTF arrays and plots
//! and gathers the MTF at Nyquist frequency into `mtf_nyquist.csv`.

use std::{
    fmt,
    fs::create_dir_all,
    io,
    path::{Path, PathBuf},
};

use ism_mtf::{system_mtf, Band, IsmConfig, NpyExport, Nyquist, PlotExport};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to compute the MTF of band {1}")]
    Mtf(#[source] ism_mtf::Error, Band),
    #[error("failed to create report folder: {1:?}")]
    ReportPath(#[source] io::Error, PathBuf),
    #[error("failed to write {1:?}")]
    Write(#[source] io::Error, PathBuf),
    #[error("failed to write the MTF summary")]
    Csv(#[from] csv::Error),
}
type Result<T> = std::result::Result<T, ReportError>;

/// Report settings
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// lines of the TOA
    pub nlines: usize,
    /// columns of the TOA
    pub ncolumns: usize,
    /// output directory
    pub outdir: PathBuf,
    /// plot the MTF cuts
    pub plot: bool,
    /// save the system MTF arrays
    pub npy: bool,
}
impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            nlines: 100,
            ncolumns: 150,
            outdir: PathBuf::from("mtf"),
            plot: false,
            npy: false,
        }
    }
}

/// MTF at Nyquist frequency of a band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    #[serde(rename = "band")]
    pub band: String,
    #[serde(rename = "wavelength [m]")]
    pub wavelength: f64,
    #[serde(rename = "MTF@Nyquist ACT")]
    pub act: Option<f64>,
    #[serde(rename = "MTF@Nyquist ALT")]
    pub alt: Option<f64>,
}
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nyquist = |x: Option<f64>| x.map_or_else(|| "-".to_string(), |x| format!("{x:.3}"));
        write!(
            f,
            " - {:8} ({:4.0}nm): ACT {:>6}, ALT {:>6}",
            self.band,
            self.wavelength * 1e9,
            nyquist(self.act),
            nyquist(self.alt)
        )
    }
}

/// Computes and exports the system MTF of one band
pub fn band_mtf(config: &IsmConfig, band: Band, options: &ReportOptions) -> Result<Summary> {
    let spec = config
        .frequency_spec(band, options.nlines, options.ncolumns)
        .map_err(|e| ReportError::Mtf(e.into(), band))?;
    let mtf = system_mtf(&spec, &config.contributors).map_err(|e| ReportError::Mtf(e.into(), band))?;

    let name = band.to_string();
    let Nyquist { act, alt } = mtf.nyquist();
    log::info!("Band {name} - MTF@Nyquist ACT: {act:.3?}, ALT: {alt:.3?}");

    if options.npy {
        mtf.export_with(&NpyExport::new(&options.outdir), &name);
    }
    if options.plot {
        mtf.export_with(&PlotExport::new(&options.outdir), &name);
    }

    Ok(Summary {
        band: name,
        wavelength: spec.wavelength(),
        act,
        alt,
    })
}

/// Writes the summary of all the bands to a CSV file
pub fn write_summary<P: AsRef<Path>>(path: P, summaries: &[Summary]) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;
    for summary in summaries {
        wtr.serialize(summary)?;
    }
    wtr.flush()
        .map_err(|e| ReportError::Write(e, path.to_path_buf()))
}

/// Computes the system MTF of all the `bands`
///
/// The bands are processed in parallel, the summary is written to `mtf_nyquist.csv`
pub fn report(config: &IsmConfig, bands: &[Band], options: &ReportOptions) -> Result<Vec<Summary>> {
    create_dir_all(&options.outdir)
        .map_err(|e| ReportError::ReportPath(e, options.outdir.clone()))?;
    let summaries = bands
        .par_iter()
        .map(|&band| band_mtf(config, band, options))
        .collect::<Result<Vec<Summary>>>()?;
    write_summary(options.outdir.join("mtf_nyquist.csv"), &summaries)?;
    Ok(summaries)
}
