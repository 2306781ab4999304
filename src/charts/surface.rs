//! Render Surface Module
//! Destinations that display proportion charts as soon as they are produced.

use crate::charts::{ProportionChart, StaticChartRenderer};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Where a freshly built chart is shown.
pub trait RenderSurface {
    fn show(&mut self, chart: &ProportionChart) -> Result<()>;
}

/// Keeps every shown chart in memory, in display order.
#[derive(Debug, Default)]
pub struct ChartRecorder {
    pub charts: Vec<ProportionChart>,
}

impl ChartRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for ChartRecorder {
    fn show(&mut self, chart: &ProportionChart) -> Result<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}

/// Writes each shown chart as a numbered PNG into a directory.
pub struct PngDirectory {
    dir: PathBuf,
    renderer: StaticChartRenderer,
    written: Vec<PathBuf>,
}

impl PngDirectory {
    pub fn new(dir: impl AsRef<Path>, renderer: StaticChartRenderer) -> Result<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
            renderer,
            written: Vec::new(),
        })
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn file_name(index: usize, chart: &ProportionChart) -> String {
        let stem: String = chart
            .column
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        format!("{:02}_{}.png", index + 1, stem)
    }
}

impl RenderSurface for PngDirectory {
    fn show(&mut self, chart: &ProportionChart) -> Result<()> {
        let path = self.dir.join(Self::file_name(self.written.len(), chart));
        self.renderer.save_proportion_png(chart, &path)?;
        log::debug!("Wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}
