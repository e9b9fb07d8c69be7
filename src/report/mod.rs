//! Output artifacts of a scripted experiment: the JSON summary of the last
//! collected point and a multi-panel chart of the whole time series.

pub mod chart;

use std::fs;
use std::path::{Path, PathBuf};

use charming::HtmlRenderer;
use charming::theme::Theme;
use tracing::info;

use crate::models::{ExperimentSummary, ExperimentSummaryPoint};
use crate::utils::{AnalyzeError, Result};

pub use chart::{SeriesData, build_chart};

const CHART_WIDTH: u64 = 1000;
const CHART_HEIGHT: u64 = 800;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Writes `summary` as pretty JSON, creating parent directories as needed.
pub fn write_summary(path: &Path, summary: &ExperimentSummary) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_string_pretty(summary)?)?;
    info!("Wrote summary to {}", path.display());
    Ok(())
}

/// Renders the time series chart as HTML to `path`. Returns the written path.
pub fn render_chart(
    experiment_name: &str,
    path: &Path,
    points: &[ExperimentSummaryPoint],
) -> Result<PathBuf> {
    if points.is_empty() {
        return Err(AnalyzeError::NoSamples);
    }
    let output = path.to_path_buf();
    ensure_parent(&output)?;

    let chart = build_chart(experiment_name, &SeriesData::from_points(points));
    let mut renderer =
        HtmlRenderer::new(experiment_name, CHART_WIDTH, CHART_HEIGHT).theme(Theme::Default);
    renderer
        .save(&chart, &output)
        .map_err(|e| AnalyzeError::Chart(format!("{e}")))?;

    info!(
        "Generated chart at {} ({} samples)",
        output.display(),
        points.len()
    );
    Ok(output)
}
