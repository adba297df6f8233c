// theme() command parser

use super::ast::Theme;
use super::lexer::{number_literal, ws};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::map,
    multi::separated_list0,
    sequence::preceded,
    IResult,
};

/// Parse theme settings
/// Format: theme(font_size: 12, aspect: 1.0)
pub fn parse_theme(input: &str) -> IResult<&str, Theme> {
    let (input, _) = ws(tag("theme"))(input)?;
    let (input, _) = ws(char('('))(input)?;

    let (input, args) = separated_list0(
        ws(char(',')),
        alt((
            map(preceded(ws(tag("font_size:")), ws(number_literal)), |v| {
                ("font_size", v)
            }),
            map(preceded(ws(tag("aspect:")), ws(number_literal)), |v| {
                ("aspect", v)
            }),
        )),
    )(input)?;

    let (input, _) = ws(char(')'))(input)?;

    let mut theme = Theme::default();
    for (key, val) in args {
        match key {
            "font_size" => theme.font_size = Some(val),
            "aspect" => theme.aspect = Some(val),
            _ => {}
        }
    }

    Ok((input, theme))
}
