// Abstract syntax for the chart DSL

/// Complete chart specification assembled from the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub bars: BarsCommand,
    pub labels: Labels,
    pub theme: Theme,
    pub error_bars: ErrorBars,
    pub points: Option<PointsCommand>,
    /// Per-group fill overrides in user order; later entries win.
    pub colors: Vec<(String, String)>,
}

/// The required bars command. Both columns are individually optional so
/// "nothing selected yet" is representable as a guard state, not an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarsCommand {
    pub group: Option<String>,
    pub value: Option<String>,
}

/// Chart title and y-axis label. The x-axis label is always the group
/// column name and is not settable here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Labels {
    pub title: Option<String>,
    pub y: Option<String>,
}

/// Font size and canvas aspect ratio.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Theme {
    pub font_size: Option<f64>,
    pub aspect: Option<f64>,
}

/// Independent whisker toggles; both may be on at once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorBars {
    pub std_dev: bool,
    pub std_err: bool,
}

/// Jittered raw-value scatter overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointsCommand {
    pub jitter: Option<f64>,
    pub color: Option<String>,
    pub size: Option<f64>,
}
