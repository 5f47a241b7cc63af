use std::path::PathBuf;

use ism_mtf::{config::ConfigError, Band, IsmConfig};
use mtf_report::{report, ReportOptions};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "mtf-report", about = "Imager system MTF per spectral band")]
struct Opt {
    /// Path to the pickled ISM configuration, defaults to the `ISM_CONFIG` env variable
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,
    /// Lines of the TOA
    #[structopt(long, default_value = "100")]
    nlines: usize,
    /// Columns of the TOA
    #[structopt(long, default_value = "150")]
    ncolumns: usize,
    /// Output directory
    #[structopt(short, long, default_value = "mtf", parse(from_os_str))]
    outdir: PathBuf,
    /// Bands to process, all the configured bands if none
    #[structopt(short, long)]
    band: Vec<String>,
    /// Plot the ACT/ALT cuts of the MTF
    #[structopt(short, long)]
    plot: bool,
    /// Save the system MTF arrays
    #[structopt(long)]
    npy: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let config = match opt.config {
        Some(path) => IsmConfig::load(path)?,
        None => match IsmConfig::from_env() {
            Ok(config) => config,
            Err(ConfigError::Env(_)) => {
                log::info!("ISM_CONFIG is not set, using the default configuration");
                IsmConfig::default()
            }
            Err(e) => return Err(e.into()),
        },
    };
    let bands = if opt.band.is_empty() {
        config.bands.clone()
    } else {
        opt.band
            .iter()
            .map(|band| Band::try_from(band.as_str()))
            .collect::<Result<Vec<Band>, ConfigError>>()?
    };

    let summaries = report(
        &config,
        &bands,
        &ReportOptions {
            nlines: opt.nlines,
            ncolumns: opt.ncolumns,
            outdir: opt.outdir,
            plot: opt.plot,
            npy: opt.npy,
        },
    )?;

    println!("MTF@Nyquist:");
    summaries.iter().for_each(|summary| println!("{summary}"));

    Ok(())
}
