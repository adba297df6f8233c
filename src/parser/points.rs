// points() command parser

use super::ast::PointsCommand;
use super::lexer::{number_literal, string_literal, ws};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::map,
    multi::separated_list0,
    sequence::preceded,
    IResult,
};

enum ArgValue {
    Number(f64),
    String(String),
}

/// Parse the raw-value scatter overlay
/// Format: points() or points(jitter: 0.1, color: "#000000", size: 50)
pub fn parse_points(input: &str) -> IResult<&str, PointsCommand> {
    let (input, _) = ws(tag("points"))(input)?;
    let (input, _) = ws(char('('))(input)?;

    let (input, args) = separated_list0(
        ws(char(',')),
        alt((
            map(preceded(ws(tag("jitter:")), ws(number_literal)), |v| {
                ("jitter", ArgValue::Number(v))
            }),
            map(preceded(ws(tag("color:")), ws(string_literal)), |v| {
                ("color", ArgValue::String(v))
            }),
            map(preceded(ws(tag("size:")), ws(number_literal)), |v| {
                ("size", ArgValue::Number(v))
            }),
        )),
    )(input)?;

    let (input, _) = ws(char(')'))(input)?;

    let mut points = PointsCommand::default();
    for (key, val) in args {
        match (key, val) {
            ("jitter", ArgValue::Number(v)) => points.jitter = Some(v),
            ("color", ArgValue::String(v)) => points.color = Some(v),
            ("size", ArgValue::Number(v)) => points.size = Some(v),
            _ => {}
        }
    }

    Ok((input, points))
}
