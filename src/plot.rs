//! MTF plots
//!
//! ACT and ALT cuts of the system MTF and of its contributors, side by side

use std::{
    error::Error,
    path::{Path, PathBuf},
};

use plotters::prelude::*;

use crate::{
    cuts::{Cut, NYQUIST},
    export::{output_path, Export, ExportError},
    system::{Contributor, SystemMtf},
};

const FREQUENCY_RANGE: std::ops::Range<f64> = 0f64..0.55;
const MTF_RANGE: std::ops::Range<f64> = 0f64..1.05;

fn color(contributor: Contributor) -> RGBColor {
    use Contributor::*;
    let idx = match contributor {
        Diffraction => 0,
        Defocus => 1,
        Wfe => 2,
        Detector => 3,
        Smear => 4,
        Motion => 5,
        System => return BLACK,
    };
    let color = colorous::CATEGORY10[idx];
    RGBColor(color.r, color.g, color.b)
}

/// Cut samples at non-negative frequencies
fn positive_frequencies<'a>(
    cut: &'a Cut,
    contributor: Contributor,
) -> impl Iterator<Item = (f64, f64)> + 'a {
    cut.frequency
        .iter()
        .zip(cut.get(contributor).into_iter().flat_map(|mtf| mtf.iter()))
        .filter(|(f, _)| **f >= 0f64)
        .map(|(&f, &h)| (f, h))
}

fn draw_cut<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    cut: &Cut,
    title: &str,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 20))
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .margin(10)
        .build_cartesian_2d(FREQUENCY_RANGE, MTF_RANGE)?;
    chart
        .configure_mesh()
        .x_desc("Spatial frequency f/(1/w)")
        .y_desc("MTF")
        .draw()?;

    for contributor in cut.mtf.keys().copied() {
        let rgb = color(contributor);
        let width = if contributor == Contributor::System { 3 } else { 2 };
        chart
            .draw_series(LineSeries::new(
                positive_frequencies(cut, contributor),
                rgb.stroke_width(width),
            ))?
            .label(contributor.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &rgb));
    }
    let grey = BLACK.mix(0.5);
    chart
        .draw_series(LineSeries::new(
            vec![(NYQUIST, MTF_RANGE.start), (NYQUIST, MTF_RANGE.end)],
            &grey,
        ))?
        .label("Nyquist")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &grey));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .position(SeriesLabelPosition::LowerLeft)
        .draw()?;
    Ok(())
}

fn draw(mtf: &SystemMtf, band: &str, path: &Path) -> Result<(), Box<dyn Error>> {
    let cuts = mtf.cuts();
    let root = BitMapBackend::new(path, (1400, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(&format!("System MTF Analysis for {band}"), ("sans-serif", 24))?;
    let panels = root.split_evenly((1, 2));
    draw_cut(&panels[0], &cuts.act, "MTF at ACT Direction")?;
    draw_cut(&panels[1], &cuts.alt, "MTF at ALT Direction")?;
    root.present()?;
    Ok(())
}

/// Plots the MTF cuts to `mtf_{band}.png`
#[derive(Debug, Clone)]
pub struct PlotExport {
    directory: PathBuf,
}
impl PlotExport {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }
}
impl Export for PlotExport {
    fn export(&self, mtf: &SystemMtf, band: &str) -> Result<PathBuf, ExportError> {
        let path = output_path(&self.directory, format!("mtf_{band}.png"))?;
        draw(mtf, band, &path).map_err(|e| ExportError::Plot(e.to_string(), path.clone()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{contributors::ContributorParams, frequency::FrequencySpec, system::system_mtf};
    use ndarray::array;
    use std::env;

    #[test]
    fn only_positive_frequencies_are_drawn() {
        let mut cut = Cut::new(array![-0.5, -0.25, 0., 0.25]);
        cut.mtf
            .insert(Contributor::Motion, array![0.2, 0.6, 1., 0.7]);
        let points: Vec<_> = positive_frequencies(&cut, Contributor::Motion).collect();
        assert_eq!(points, vec![(0., 1.), (0.25, 0.7)]);
        assert_eq!(positive_frequencies(&cut, Contributor::Wfe).count(), 0);
    }

    #[test]
    fn system_is_black() {
        assert_eq!(color(Contributor::System), BLACK);
        assert_eq!(color(Contributor::Diffraction), RGBColor(0x1f, 0x77, 0xb4));
    }

    #[test]
    fn png_export() {
        let spec = FrequencySpec::new(40, 30, 0.15, 0.865e-6, 0.5262, 30e-6).unwrap();
        let mtf = system_mtf(&spec, &ContributorParams::default().smear(1.).motion(0.25)).unwrap();
        let directory = env::temp_dir().join("ism-mtf_png_export");
        let path = PlotExport::new(&directory).export(&mtf, "VNIR-2").unwrap();
        assert_eq!(path, directory.join("mtf_VNIR-2.png"));
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
