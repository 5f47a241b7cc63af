/*!
# Imager System MTF

Analytical model of the Modulation Transfer Function (MTF) of a pushbroom imager,
used to blur the top-of-atmosphere radiances of the image simulation module.

The system MTF is the product of six contributors evaluated on the image frequency grid:
 - optics diffraction, defocus and wavefront error aberrations,
 - detector pixel aperture,
 - along-track smearing and motion blur.

All the 2D arrays are indexed `[ALT, ACT]` i.e. `[line, column]`.

```rust,no_run
use ism_mtf::{system_mtf, Band, IsmConfig, NpyExport};

let config = IsmConfig::default();
let spec = config.frequency_spec(Band::Vnir0, 100, 150)?;
let mtf = system_mtf(&spec, &config.contributors)?;
println!("MTF@Nyquist: {:?}", mtf.nyquist());
mtf.export_with(&NpyExport::new("ism"), "VNIR-0");
# Ok::<(), ism_mtf::Error>(())
```
*/

pub mod config;
pub mod contributors;
pub mod cuts;
mod error;
pub mod export;
pub mod frequency;
#[cfg(feature = "plot")]
pub mod plot;
pub mod system;

pub use config::{Band, Instrument, IsmConfig};
pub use contributors::{Aberrations, ContributorParams};
pub use cuts::{center_cuts, Cut, MtfCuts, Nyquist, NYQUIST};
pub use error::Error;
pub use export::{Export, NpyExport};
pub use frequency::{frequency_grid, FrequencyGrid, FrequencySpec};
#[cfg(feature = "plot")]
pub use plot::PlotExport;
pub use system::{compose, system_mtf, Contributor, Contributors, SystemMtf};
