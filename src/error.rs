use crate::{
    config::ConfigError, export::ExportError, frequency::FrequencyError, system::MtfError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `frequency` module")]
    Frequency(#[from] FrequencyError),
    #[error("Error in the `system` module")]
    Mtf(#[from] MtfError),
    #[error("Error in the `export` module")]
    Export(#[from] ExportError),
    #[error("Error in the `config` module")]
    Config(#[from] ConfigError),
}
