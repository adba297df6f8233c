// Library exports for groupbar

pub mod csv_reader;
pub mod data;
pub mod graph;
pub mod parser;
pub mod runtime;
pub mod stats;

use serde::Deserialize;

/// Default fill for every bar before a per-group override.
pub const DEFAULT_BAR_COLOR: &str = "#4CAF50";
/// Default color for the jittered scatter overlay.
pub const DEFAULT_POINT_COLOR: &str = "#000000";

/// Render defaults, overridable from a JSON file (`--defaults`) and then
/// per-render by the DSL. Every field falls back independently.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartDefaults {
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_aspect")]
    pub aspect: f64,
    #[serde(default = "default_jitter")]
    pub jitter: f64,
    #[serde(default = "default_point_size")]
    pub point_size: f64,
    #[serde(default = "default_bar_color")]
    pub bar_color: String,
    #[serde(default = "default_point_color")]
    pub point_color: String,
}

fn default_font_size() -> f64 { 12.0 }
fn default_aspect() -> f64 { 1.0 }
fn default_jitter() -> f64 { 0.1 }
fn default_point_size() -> f64 { 50.0 }
fn default_bar_color() -> String { DEFAULT_BAR_COLOR.to_string() }
fn default_point_color() -> String { DEFAULT_POINT_COLOR.to_string() }

impl Default for ChartDefaults {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            aspect: default_aspect(),
            jitter: default_jitter(),
            point_size: default_point_size(),
            bar_color: default_bar_color(),
            point_color: default_point_color(),
        }
    }
}
