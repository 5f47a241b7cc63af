//! Instrument configuration
//!
//! The physical parameters of the imager, per spectral band.
//! The configuration is loaded from a pickle file whose path may be given by the
//! environment variable `ISM_CONFIG`.

use std::{
    env::{self, VarError},
    fmt,
    fs::File,
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_pickle as pickle;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::{
    contributors::{Aberrations, ContributorParams},
    frequency::{FrequencyError, FrequencySpec},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(r#""ISM_CONFIG" env var is not set"#)]
    Env(#[from] VarError),
    #[error("failed to open {1:?}")]
    Open(#[source] io::Error, PathBuf),
    #[error("failed to (de)serialize the configuration")]
    Pickle(#[from] pickle::Error),
    #[error(r#"band {0} is not recognized, expected "VNIR-0", "VNIR-1", "VNIR-2" or "VNIR-3""#)]
    Band(String),
    #[error("invalid frequency grid parameters")]
    Frequency(#[from] FrequencyError),
}
type Result<T> = std::result::Result<T, ConfigError>;

/// Imager spectral bands
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "VNIR-0")]
    Vnir0,
    #[serde(rename = "VNIR-1")]
    Vnir1,
    #[serde(rename = "VNIR-2")]
    Vnir2,
    #[serde(rename = "VNIR-3")]
    Vnir3,
}
impl Band {
    /// Central wavelength of the band [m]
    pub fn wavelength(&self) -> f64 {
        use Band::*;
        match self {
            Vnir0 => 0.49e-6,
            Vnir1 => 0.665e-6,
            Vnir2 => 0.865e-6,
            Vnir3 => 0.945e-6,
        }
    }
}
impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Band::*;
        match self {
            Vnir0 => write!(f, "VNIR-0"),
            Vnir1 => write!(f, "VNIR-1"),
            Vnir2 => write!(f, "VNIR-2"),
            Vnir3 => write!(f, "VNIR-3"),
        }
    }
}
impl TryFrom<&str> for Band {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self> {
        Band::iter()
            .find(|band| band.to_string().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ConfigError::Band(value.to_string()))
    }
}

/// Telescope and detector geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// telescope diameter [m]
    pub diameter: f64,
    /// focal length [m]
    pub focal_length: f64,
    /// pixel size [m]
    pub pixel_size: f64,
}
impl Default for Instrument {
    fn default() -> Self {
        Self {
            diameter: 0.150,
            focal_length: 0.5262,
            pixel_size: 30e-6,
        }
    }
}

/// Image simulation module configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsmConfig {
    pub instrument: Instrument,
    pub bands: Vec<Band>,
    pub contributors: ContributorParams,
}
impl Default for IsmConfig {
    fn default() -> Self {
        Self {
            instrument: Default::default(),
            bands: Band::iter().collect(),
            contributors: ContributorParams::default()
                .defocus(0.5)
                .aberrations(Aberrations::new(1., 30e-9, 1., 20e-9))
                .smear(1.)
                .motion(0.25),
        }
    }
}
impl IsmConfig {
    /// Loads the configuration from a pickle file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading {:?}...", path);
        let mut file = File::open(path).map_err(|e| ConfigError::Open(e, path.to_path_buf()))?;
        Ok(pickle::from_reader(&mut file, Default::default())?)
    }
    /// Loads the configuration from the file which path is given by the env variable `ISM_CONFIG`
    pub fn from_env() -> Result<Self> {
        let path = env::var("ISM_CONFIG")?;
        Self::load(path)
    }
    /// Saves the configuration to a pickle file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file =
            File::create(path).map_err(|e| ConfigError::Open(e, path.to_path_buf()))?;
        pickle::to_writer(&mut file, self, Default::default())?;
        Ok(())
    }
    /// Frequency grid parameters of a `nlines`x`ncolumns` image in the given band
    pub fn frequency_spec(&self, band: Band, nlines: usize, ncolumns: usize) -> Result<FrequencySpec> {
        let Instrument {
            diameter,
            focal_length,
            pixel_size,
        } = self.instrument;
        Ok(FrequencySpec::new(
            nlines,
            ncolumns,
            diameter,
            band.wavelength(),
            focal_length,
            pixel_size,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_names() {
        assert_eq!(Band::try_from("VNIR-2").unwrap(), Band::Vnir2);
        assert_eq!(Band::try_from(" vnir-3 ").unwrap(), Band::Vnir3);
        assert!(matches!(Band::try_from("SWIR-1"), Err(ConfigError::Band(_))));
        let names: Vec<_> = Band::iter().map(|b| b.to_string()).collect();
        assert_eq!(names, vec!["VNIR-0", "VNIR-1", "VNIR-2", "VNIR-3"]);
    }

    #[test]
    fn band_spec() {
        let config = IsmConfig::default();
        let spec = config.frequency_spec(Band::Vnir1, 100, 150).unwrap();
        assert_eq!(spec.shape(), (100, 150));
        assert_eq!(spec.wavelength(), 0.665e-6);
        assert_eq!(spec.diameter(), 0.150);
        assert_eq!(spec.focal_length(), 0.5262);
        assert_eq!(spec.pixel_size(), 30e-6);
    }

    #[test]
    fn invalid_instrument() {
        let mut config = IsmConfig::default();
        config.instrument.diameter = 0.;
        assert!(matches!(
            config.frequency_spec(Band::Vnir0, 10, 10),
            Err(ConfigError::Frequency(_))
        ));
    }

    #[test]
    fn pickle_round_trip() {
        let mut config = IsmConfig::default();
        config.bands = vec![Band::Vnir3, Band::Vnir0];
        config.contributors.kmotion = 0.1;
        let path = env::temp_dir().join("ism-mtf_config.pkl");
        config.save(&path).unwrap();
        assert_eq!(IsmConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file() {
        let path = env::temp_dir().join("ism-mtf_missing").join("config.pkl");
        assert!(matches!(IsmConfig::load(path), Err(ConfigError::Open(..))));
    }
}
