// colors() command parser

use super::lexer::{column_name, string_literal, ws};
use nom::{
    bytes::complete::tag,
    character::complete::char,
    multi::separated_list0,
    sequence::separated_pair,
    IResult,
};

/// Parse per-group fill overrides
/// Format: colors("A": "#ff0000", B: "#00ff00") — keys may be quoted or bare
pub fn parse_colors(input: &str) -> IResult<&str, Vec<(String, String)>> {
    let (input, _) = ws(tag("colors"))(input)?;
    let (input, _) = ws(char('('))(input)?;

    let (input, pairs) = separated_list0(
        ws(char(',')),
        separated_pair(ws(column_name), char(':'), ws(string_literal)),
    )(input)?;

    let (input, _) = ws(char(')'))(input)?;

    Ok((input, pairs))
}
