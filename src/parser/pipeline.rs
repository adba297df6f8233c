// Pipeline parser for the chart DSL

use super::ast::{BarsCommand, ChartSpec, ErrorBars, Labels, PointsCommand, Theme};
use super::bars::parse_bars;
use super::colors::parse_colors;
use super::errorbar::parse_errorbars;
use super::labels::parse_labs;
use super::lexer::ws;
use super::points::parse_points;
use super::theme::parse_theme;
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{eof, map},
    error::{Error, ErrorKind},
    multi::separated_list0,
    IResult,
};

#[derive(Debug)]
enum PipelineComponent {
    Bars(BarsCommand),
    Labels(Labels),
    Theme(Theme),
    ErrorBars(ErrorBars),
    Points(PointsCommand),
    Colors(Vec<(String, String)>),
}

fn parse_pipeline_component(input: &str) -> IResult<&str, PipelineComponent> {
    alt((
        map(parse_bars, PipelineComponent::Bars),
        map(parse_labs, PipelineComponent::Labels),
        map(parse_theme, PipelineComponent::Theme),
        map(parse_errorbars, PipelineComponent::ErrorBars),
        map(parse_points, PipelineComponent::Points),
        map(parse_colors, PipelineComponent::Colors),
    ))(input)
}

/// Parse a complete chart specification
/// Format: component | component | ...
///
/// Exactly one bars(...) command is required. Later labs/theme/errorbars/
/// points commands override earlier ones; colors commands accumulate.
pub fn parse_chart_spec(input: &str) -> IResult<&str, ChartSpec> {
    let (input, components) = separated_list0(ws(tag("|")), parse_pipeline_component)(input)?;

    // Consume trailing whitespace and ensure end of input
    let (input, _) = ws(eof)(input)?;

    let mut bars = None;
    let mut labels = Labels::default();
    let mut theme = Theme::default();
    let mut error_bars = ErrorBars::default();
    let mut points = None;
    let mut colors: Vec<(String, String)> = Vec::new();

    for comp in components {
        match comp {
            PipelineComponent::Bars(b) => bars = Some(b),
            PipelineComponent::Labels(l) => labels = l,
            PipelineComponent::Theme(t) => theme = t,
            PipelineComponent::ErrorBars(e) => error_bars = e,
            PipelineComponent::Points(p) => points = Some(p),
            PipelineComponent::Colors(c) => colors.extend(c),
        }
    }

    // Validation: the bars command is required
    let bars = match bars {
        Some(b) => b,
        None => return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify))),
    };

    Ok((
        input,
        ChartSpec {
            bars,
            labels,
            theme,
            error_bars,
            points,
            colors,
        },
    ))
}
