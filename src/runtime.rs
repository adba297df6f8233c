// Runtime executor: chart spec + table -> PNG bytes

use anyhow::{anyhow, Context, Result};
use plotters::style::RGBColor;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::data::Table;
use crate::graph::{self, Canvas};
use crate::parser::ast::ChartSpec;
use crate::stats::{self, GroupSummary};
use crate::ChartDefaults;

/// Base canvas edge in pixels; the aspect ratio scales the width only.
const BASE_SIZE: f64 = 400.0;

const FONT_SIZE_BOUNDS: (f64, f64) = (8.0, 30.0);
const ASPECT_BOUNDS: (f64, f64) = (0.5, 2.0);
const JITTER_BOUNDS: (f64, f64) = (0.0, 0.5);
const POINT_SIZE_BOUNDS: (f64, f64) = (10.0, 300.0);

/// Result of one render attempt. A missing column selection is a benign
/// guard state, not an error.
#[derive(Debug)]
pub enum ChartOutcome {
    Image(Vec<u8>),
    Prompt(String),
}

/// Render a chart specification against a table.
///
/// Pure apart from the jitter RNG; pass a seed for byte-identical output.
pub fn render_chart(
    spec: &ChartSpec,
    table: &Table,
    defaults: &ChartDefaults,
    seed: Option<u64>,
) -> Result<ChartOutcome> {
    // Guard state: nothing selected yet
    let (group_col, value_col) = match (&spec.bars.group, &spec.bars.value) {
        (Some(g), Some(v)) => (g, v),
        _ => {
            return Ok(ChartOutcome::Prompt(
                "Select a group column and a value column to draw the chart.".to_string(),
            ))
        }
    };

    let summaries = stats::aggregate(table, group_col, value_col)
        .context("Failed to aggregate table")?;

    let font_size = clamp(
        spec.theme.font_size.unwrap_or(defaults.font_size),
        FONT_SIZE_BOUNDS,
    );
    let aspect = clamp(spec.theme.aspect.unwrap_or(defaults.aspect), ASPECT_BOUNDS);
    let width = (BASE_SIZE * aspect) as u32;
    let height = BASE_SIZE as u32;

    let fills = resolve_fills(&summaries, &spec.colors, &defaults.bar_color)?;

    let mut canvas = Canvas::new(
        width,
        height,
        spec.labels.title.clone(),
        group_col.clone(),
        spec.labels.y.clone(),
        font_size as i32,
        summaries.iter().map(|s| s.key.clone()).collect(),
        collect_y_extent(&summaries, spec),
    )?;

    let means: Vec<f64> = summaries.iter().map(|s| s.mean).collect();
    canvas.add_bar_layer(&means, &fills)?;

    // Two independent whisker overlays; both may stack at the same x.
    if spec.error_bars.std_dev {
        let spans: Vec<Option<f64>> = summaries.iter().map(|s| s.std_dev).collect();
        canvas.add_whisker_layer(&means, &spans)?;
    }
    if spec.error_bars.std_err {
        let spans: Vec<Option<f64>> = summaries.iter().map(|s| s.std_err).collect();
        canvas.add_whisker_layer(&means, &spans)?;
    }

    if let Some(points) = &spec.points {
        let jitter = clamp(points.jitter.unwrap_or(defaults.jitter), JITTER_BOUNDS);
        let size = clamp(points.size.unwrap_or(defaults.point_size), POINT_SIZE_BOUNDS);
        let color = graph::parse_color(
            points.color.as_deref().unwrap_or(&defaults.point_color),
        )?;

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let normal = Normal::new(0.0, jitter)
            .map_err(|e| anyhow!("Invalid jitter strength {}: {}", jitter, e))?;

        let mut scatter = Vec::new();
        for (idx, summary) in summaries.iter().enumerate() {
            let x_center = idx as f64 + 0.5;
            for &value in &summary.values {
                scatter.push((x_center + normal.sample(&mut rng), value));
            }
        }

        // Map the area-flavored size option to a pixel radius.
        canvas.add_point_layer(&scatter, color, size.sqrt().round() as i32)?;
    }

    Ok(ChartOutcome::Image(canvas.render()?))
}

fn clamp(value: f64, (lo, hi): (f64, f64)) -> f64 {
    value.max(lo).min(hi)
}

/// Resolve each group's fill in group order. Later overrides win; groups
/// without an override default independently.
fn resolve_fills(
    summaries: &[GroupSummary],
    overrides: &[(String, String)],
    default_color: &str,
) -> Result<Vec<RGBColor>> {
    summaries
        .iter()
        .map(|summary| {
            let chosen = overrides
                .iter()
                .rev()
                .find(|(key, _)| key == &summary.key)
                .map(|(_, color)| color.as_str())
                .unwrap_or(default_color);
            graph::parse_color(chosen)
                .context(format!("Invalid color for group '{}'", summary.key))
        })
        .collect()
}

/// Everything the y-axis must cover: the baseline, every mean, every drawn
/// whisker extent, and the raw values when the scatter is on.
fn collect_y_extent(summaries: &[GroupSummary], spec: &ChartSpec) -> Vec<f64> {
    let mut all_y = vec![0.0];
    for summary in summaries {
        all_y.push(summary.mean);
        if spec.error_bars.std_dev {
            if let Some(sd) = summary.std_dev {
                all_y.push(summary.mean - sd);
                all_y.push(summary.mean + sd);
            }
        }
        if spec.error_bars.std_err {
            if let Some(sem) = summary.std_err {
                all_y.push(summary.mean - sem);
                all_y.push(summary.mean + sem);
            }
        }
        if spec.points.is_some() {
            all_y.extend(summary.values.iter().copied());
        }
    }
    all_y
}
