//! MTF exports
//!
//! Sinks persisting a [SystemMtf] for a given band.
//! Exports run after the computation and a failure never alters the MTF.

use std::{
    fs::{create_dir_all, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use ndarray::Array2;
use npyz::WriterBuilder;

use crate::system::SystemMtf;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create {1:?}")]
    Create(#[source] io::Error, PathBuf),
    #[error("failed to write {1:?}")]
    Write(#[source] io::Error, PathBuf),
    #[cfg(feature = "plot")]
    #[error("failed to draw {1:?}: {0}")]
    Plot(String, PathBuf),
}
type Result<T> = std::result::Result<T, ExportError>;

/// MTF output sink
pub trait Export {
    /// Saves the MTF of `band`, returning the path to the file that was written
    fn export(&self, mtf: &SystemMtf, band: &str) -> Result<PathBuf>;
}

impl SystemMtf {
    /// Exports the MTF with the given sink
    ///
    /// Failures are logged as warnings
    pub fn export_with<E: Export>(&self, sink: &E, band: &str) -> Option<PathBuf> {
        match sink.export(self, band) {
            Ok(path) => {
                log::info!("MTF saved: {:?}", path);
                Some(path)
            }
            Err(e) => {
                log::warn!("MTF export failed for band {band}: {e}");
                let mut source = std::error::Error::source(&e);
                while let Some(cause) = source {
                    log::warn!(" caused by: {cause}");
                    source = cause.source();
                }
                None
            }
        }
    }
}

/// Creates `directory` if needed and returns the path to `filename` in it
pub(crate) fn output_path(directory: &Path, filename: String) -> Result<PathBuf> {
    create_dir_all(directory).map_err(|e| ExportError::Create(e, directory.to_path_buf()))?;
    Ok(directory.join(filename))
}

/// Writes a 2D array in the NPY format (C order)
pub fn write_npy<W: Write>(surface: &Array2<f64>, writer: W) -> io::Result<()> {
    let (nlines, ncolumns) = surface.dim();
    let mut npy = npyz::WriteOptions::<f64>::new()
        .default_dtype()
        .shape(&[nlines as u64, ncolumns as u64])
        .writer(writer)
        .begin_nd()?;
    npy.extend(surface.iter().copied())?;
    npy.finish()
}

/// Saves the system MTF to `mtf_{band}.npy`
#[derive(Debug, Clone)]
pub struct NpyExport {
    directory: PathBuf,
}
impl NpyExport {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }
}
impl Export for NpyExport {
    fn export(&self, mtf: &SystemMtf, band: &str) -> Result<PathBuf> {
        let path = output_path(&self.directory, format!("mtf_{band}.npy"))?;
        let file = File::create(&path).map_err(|e| ExportError::Create(e, path.clone()))?;
        write_npy(mtf.system(), BufWriter::new(file))
            .map_err(|e| ExportError::Write(e, path.clone()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{contributors::ContributorParams, frequency::FrequencySpec, system::system_mtf};
    use std::env;

    fn mtf() -> SystemMtf {
        let spec = FrequencySpec::new(12, 9, 0.15, 0.665e-6, 0.5262, 30e-6).unwrap();
        system_mtf(&spec, &ContributorParams::default().smear(1.)).unwrap()
    }

    #[test]
    fn npy_layout() {
        let surface = Array2::from_shape_fn((2, 3), |(i, j)| (3 * i + j) as f64);
        let mut buffer = vec![];
        write_npy(&surface, &mut buffer).unwrap();
        let npy = npyz::NpyFile::new(&buffer[..]).unwrap();
        assert_eq!(npy.shape(), &[2, 3]);
        assert_eq!(npy.into_vec::<f64>().unwrap(), vec![0., 1., 2., 3., 4., 5.]);
    }

    #[test]
    fn npy_export() {
        let mtf = mtf();
        let directory = env::temp_dir().join("ism-mtf_npy_export");
        let path = mtf
            .export_with(&NpyExport::new(&directory), "VNIR-1")
            .unwrap();
        assert_eq!(path, directory.join("mtf_VNIR-1.npy"));
        let npy = npyz::NpyFile::new(File::open(&path).unwrap()).unwrap();
        assert_eq!(npy.shape(), &[12, 9]);
        let data = npy.into_vec::<f64>().unwrap();
        assert_eq!(data, mtf.system().iter().copied().collect::<Vec<f64>>());
    }

    #[test]
    fn failed_export_is_not_fatal() {
        let mtf = mtf();
        // a regular file cannot be used as the output directory
        let blocker = env::temp_dir().join("ism-mtf_not_a_directory");
        File::create(&blocker).unwrap();
        assert!(mtf.export_with(&NpyExport::new(&blocker), "VNIR-0").is_none());
        assert_eq!(mtf.system().dim(), (12, 9));
    }
}
