//! PNG chart rendering.
//!
//! All analyzers hand this module a bucketed numeric series; it renders a
//! raster image with `plotters` and never looks at the corpus itself. The x
//! axis is always the ordered list of bucket labels, indexed 0..n.

use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;

use crate::config::ChartConfig;

const SERIES_COLORS: [RGBColor; 3] = [
    RGBColor(70, 130, 180),  // steel blue
    RGBColor(205, 92, 92),   // indian red
    RGBColor(60, 140, 80),   // muted green
];

fn draw_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!("chart rendering failed: {}", e)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Bar chart of one value per bucket.
pub fn render_bar_chart(
    config: &ChartConfig,
    path: &Path,
    title: &str,
    y_desc: &str,
    labels: &[String],
    values: &[f64],
) -> Result<()> {
    ensure_parent(path)?;

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let n = labels.len().max(1) as i32;
    let max_y = values.iter().cloned().fold(0.0f64, f64::max);
    let max_y = if max_y > 0.0 { max_y * 1.15 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(0i32..n, 0f64..max_y)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(y_desc)
        .x_labels(labels.len().clamp(1, 12))
        .x_label_formatter(&|x| bucket_label(labels, *x))
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, v)| {
            Rectangle::new(
                [(i as i32, 0.0), (i as i32 + 1, *v)],
                SERIES_COLORS[0].mix(0.6).filled(),
            )
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Two-panel sentiment chart: mean polarity line with a ±1 std band on top,
/// message counts per bucket below.
#[allow(clippy::too_many_arguments)]
pub fn render_sentiment_chart(
    config: &ChartConfig,
    path: &Path,
    title: &str,
    labels: &[String],
    means: &[f64],
    stds: &[f64],
    counts: &[u64],
) -> Result<()> {
    ensure_parent(path)?;

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let split_at = (config.height as f64 * 0.62) as i32;
    let (upper, lower) = root.split_vertically(split_at);

    let n = labels.len().max(1) as i32;

    // Upper panel: mean polarity with std band.
    let band_lo = means
        .iter()
        .zip(stds)
        .map(|(m, s)| m - s)
        .fold(-1.0f64, f64::min);
    let band_hi = means
        .iter()
        .zip(stds)
        .map(|(m, s)| m + s)
        .fold(1.0f64, f64::max);

    let mut polarity = ChartBuilder::on(&upper)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(12)
        .x_label_area_size(24)
        .y_label_area_size(56)
        .build_cartesian_2d(0i32..n, (band_lo - 0.1)..(band_hi + 0.1))
        .map_err(draw_err)?;

    polarity
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_desc("Mean polarity")
        .draw()
        .map_err(draw_err)?;

    let mut band: Vec<(i32, f64)> = means
        .iter()
        .zip(stds)
        .enumerate()
        .map(|(i, (m, s))| (i as i32, m + s))
        .collect();
    band.extend(
        means
            .iter()
            .zip(stds)
            .enumerate()
            .rev()
            .map(|(i, (m, s))| (i as i32, m - s)),
    );
    polarity
        .draw_series(std::iter::once(Polygon::new(
            band,
            SERIES_COLORS[0].mix(0.2),
        )))
        .map_err(draw_err)?;

    // Zero line for orientation.
    polarity
        .draw_series(LineSeries::new(
            vec![(0, 0.0), (n, 0.0)],
            &BLACK.mix(0.4),
        ))
        .map_err(draw_err)?;

    polarity
        .draw_series(LineSeries::new(
            means.iter().enumerate().map(|(i, m)| (i as i32, *m)),
            ShapeStyle::from(&SERIES_COLORS[0]).stroke_width(2),
        ))
        .map_err(draw_err)?;
    polarity
        .draw_series(
            means
                .iter()
                .enumerate()
                .map(|(i, m)| Circle::new((i as i32, *m), 3, SERIES_COLORS[0].filled())),
        )
        .map_err(draw_err)?;

    // Lower panel: message counts.
    let max_count = counts.iter().copied().max().unwrap_or(0) as f64;
    let max_count = if max_count > 0.0 { max_count * 1.2 } else { 1.0 };

    let mut volume = ChartBuilder::on(&lower)
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(0i32..n, 0f64..max_count)
        .map_err(draw_err)?;

    volume
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Messages")
        .x_labels(labels.len().clamp(1, 12))
        .x_label_formatter(&|x| bucket_label(labels, *x))
        .draw()
        .map_err(draw_err)?;

    volume
        .draw_series(counts.iter().enumerate().map(|(i, c)| {
            Rectangle::new(
                [(i as i32, 0.0), (i as i32 + 1, *c as f64)],
                SERIES_COLORS[1].mix(0.6).filled(),
            )
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Overlay one mean-polarity line per scoring method on a single chart.
pub fn render_comparison_chart(
    config: &ChartConfig,
    path: &Path,
    title: &str,
    labels: &[String],
    series: &[(String, Vec<f64>)],
) -> Result<()> {
    ensure_parent(path)?;

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let n = labels.len().max(1) as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(0i32..n, -1.1f64..1.1f64)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Mean polarity")
        .x_labels(labels.len().clamp(1, 12))
        .x_label_formatter(&|x| bucket_label(labels, *x))
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            vec![(0, 0.0), (n, 0.0)],
            &BLACK.mix(0.4),
        ))
        .map_err(draw_err)?;

    for (idx, (name, values)) in series.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, v)| (i as i32, *v)),
                ShapeStyle::from(&color).stroke_width(2),
            ))
            .map_err(draw_err)?
            .label(name.clone())
            .legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 18, y)],
                    ShapeStyle::from(&color).stroke_width(2),
                )
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(&BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// A chart that states there was nothing to plot. Used so an empty corpus
/// still produces the requested artifact instead of crashing.
pub fn render_empty_chart(config: &ChartConfig, path: &Path, title: &str) -> Result<()> {
    ensure_parent(path)?;

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    root.draw(&Text::new(
        title.to_string(),
        (24, 24),
        ("sans-serif", 24).into_font(),
    ))
    .map_err(draw_err)?;
    root.draw(&Text::new(
        "no data".to_string(),
        (config.width as i32 / 2 - 36, config.height as i32 / 2),
        ("sans-serif", 20).into_font(),
    ))
    .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

fn bucket_label(labels: &[String], x: i32) -> String {
    if x < 0 {
        return String::new();
    }
    labels.get(x as usize).cloned().unwrap_or_default()
}
