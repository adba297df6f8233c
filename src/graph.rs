use anyhow::{anyhow, Context, Result};
use image::ImageEncoder;
use plotters::element::ErrorBar;
use plotters::prelude::*;
use std::ops::Range;

/// Cap width of a whisker in pixels.
const WHISKER_CAP: u32 = 5;
/// Fraction of one category slot occupied by a bar.
const BAR_WIDTH: f64 = 0.8;

/// Canvas for layered bar-chart rendering: bars, whiskers, scatter. Each
/// layer call draws onto a shared RGB buffer; `render` consumes the canvas
/// and encodes it, so no surface survives past one invocation.
pub struct Canvas {
    buffer: Vec<u8>,
    width: u32,
    height: u32,
    y_range: Range<f64>,
    categories: Vec<String>,
    title: Option<String>,
    x_label: String,
    y_label: Option<String>,
    font_size: i32,
    initialized: bool,
}

impl Canvas {
    /// Create a new canvas. `all_y_data` must cover every value any layer
    /// will draw (bar tops, whisker extents, raw points) plus the baseline.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width: u32,
        height: u32,
        title: Option<String>,
        x_label: String,
        y_label: Option<String>,
        font_size: i32,
        categories: Vec<String>,
        all_y_data: Vec<f64>,
    ) -> Result<Self> {
        if categories.is_empty() || all_y_data.is_empty() {
            anyhow::bail!("Cannot create canvas with no data points");
        }

        let y_min = all_y_data.iter().cloned().fold(f64::INFINITY, f64::min);
        let y_max = all_y_data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let y_range = if y_min == y_max {
            (y_min - 1.0)..(y_max + 1.0)
        } else {
            let padding = (y_max - y_min) * 0.05;
            (y_min - padding)..(y_max + padding)
        };

        let buffer = vec![0u8; (width * height * 3) as usize];

        Ok(Canvas {
            buffer,
            width,
            height,
            y_range,
            categories,
            title,
            x_label,
            y_label,
            font_size,
            initialized: false,
        })
    }

    /// Add the bar layer: one bar per category, mean height, per-bar fill,
    /// black edge.
    pub fn add_bar_layer(&mut self, means: &[f64], fills: &[RGBColor]) -> Result<()> {
        if means.len() != self.categories.len() || fills.len() != self.categories.len() {
            anyhow::bail!(
                "Bars need one mean and one fill per category (categories: {}, means: {}, fills: {})",
                self.categories.len(),
                means.len(),
                fills.len()
            );
        }

        let root = BitMapBackend::with_buffer(&mut self.buffer, (self.width, self.height))
            .into_drawing_area();

        if !self.initialized {
            root.fill(&WHITE).context("Failed to fill background")?;
        }

        let num_categories = self.categories.len();
        let x_range = 0.0..(num_categories as f64);

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                self.title.as_deref().unwrap_or(""),
                ("sans-serif", self.font_size),
            )
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, self.y_range.clone())
            .context("Failed to build chart")?;

        if !self.initialized {
            let categories = self.categories.clone();
            chart
                .configure_mesh()
                .x_labels(num_categories)
                .x_label_formatter(&|x| {
                    let idx = *x as usize;
                    if idx < categories.len() {
                        categories[idx].clone()
                    } else {
                        String::new()
                    }
                })
                .x_desc(self.x_label.clone())
                .y_desc(self.y_label.clone().unwrap_or_default())
                .axis_desc_style(("sans-serif", self.font_size))
                .label_style(("sans-serif", self.font_size))
                .draw()
                .context("Failed to draw mesh")?;
            self.initialized = true;
        }

        for (cat_idx, (&mean, &fill)) in means.iter().zip(fills).enumerate() {
            let x_center = cat_idx as f64 + 0.5;
            let corners = [
                (x_center - BAR_WIDTH / 2.0, 0.0),
                (x_center + BAR_WIDTH / 2.0, mean),
            ];
            chart
                .draw_series(std::iter::once(Rectangle::new(corners, fill.filled())))
                .context("Failed to draw bar")?;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    corners,
                    BLACK.stroke_width(1),
                )))
                .context("Failed to draw bar edge")?;
        }

        root.present().context("Failed to present drawing")?;

        Ok(())
    }

    /// Add one whisker layer: a symmetric error bar per category where the
    /// half-length is defined. Categories with `None` get no whisker.
    pub fn add_whisker_layer(&mut self, means: &[f64], spans: &[Option<f64>]) -> Result<()> {
        if means.len() != self.categories.len() || spans.len() != self.categories.len() {
            anyhow::bail!(
                "Whiskers need one mean and one span per category (categories: {}, means: {}, spans: {})",
                self.categories.len(),
                means.len(),
                spans.len()
            );
        }

        let root = BitMapBackend::with_buffer(&mut self.buffer, (self.width, self.height))
            .into_drawing_area();

        let num_categories = self.categories.len();
        let x_range = 0.0..(num_categories as f64);

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                self.title.as_deref().unwrap_or(""),
                ("sans-serif", self.font_size),
            )
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, self.y_range.clone())
            .context("Failed to build chart")?;

        for (cat_idx, (&mean, span)) in means.iter().zip(spans).enumerate() {
            if let Some(span) = span {
                let x_center = cat_idx as f64 + 0.5;
                chart
                    .draw_series(std::iter::once(ErrorBar::new_vertical(
                        x_center,
                        mean - span,
                        mean,
                        mean + span,
                        BLACK.filled(),
                        WHISKER_CAP,
                    )))
                    .context("Failed to draw whisker")?;
            }
        }

        root.present().context("Failed to present drawing")?;

        Ok(())
    }

    /// Add a scatter layer of raw observations (already jittered in x).
    pub fn add_point_layer(
        &mut self,
        points: &[(f64, f64)],
        color: RGBColor,
        radius: i32,
    ) -> Result<()> {
        let root = BitMapBackend::with_buffer(&mut self.buffer, (self.width, self.height))
            .into_drawing_area();

        let num_categories = self.categories.len();
        let x_range = 0.0..(num_categories as f64);

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                self.title.as_deref().unwrap_or(""),
                ("sans-serif", self.font_size),
            )
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, self.y_range.clone())
            .context("Failed to build chart")?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), radius, color.filled())),
            )
            .context("Failed to draw point series")?;

        root.present().context("Failed to present drawing")?;

        Ok(())
    }

    /// Finalize and encode the canvas as PNG. Consumes the canvas; the
    /// drawing buffer is released with it.
    pub fn render(self) -> Result<Vec<u8>> {
        let mut png_bytes = Vec::new();
        {
            let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
            encoder
                .write_image(&self.buffer, self.width, self.height, image::ColorType::Rgb8)
                .context("Failed to encode PNG")?;
        }

        Ok(png_bytes)
    }
}

/// Parse a color string to RGBColor. Accepts #RRGGBB hex and a few names.
pub fn parse_color(color_str: &str) -> Result<RGBColor> {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow!("Invalid hex color '{}'", color_str));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        return Ok(RGBColor(r, g, b));
    }

    match color_str {
        "red" => Ok(RED),
        "green" => Ok(GREEN),
        "blue" => Ok(BLUE),
        "black" => Ok(BLACK),
        "yellow" => Ok(YELLOW),
        "cyan" => Ok(CYAN),
        "magenta" => Ok(MAGENTA),
        "white" => Ok(WHITE),
        _ => Err(anyhow!("Unknown color '{}'", color_str)),
    }
}
