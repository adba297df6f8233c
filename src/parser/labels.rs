// labs() command parser

use super::ast::Labels;
use super::lexer::{string_literal, ws};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::map,
    multi::separated_list0,
    sequence::preceded,
    IResult,
};

/// Parse chart labels
/// Format: labs(title: "...", y: "...")
pub fn parse_labs(input: &str) -> IResult<&str, Labels> {
    let (input, _) = ws(tag("labs"))(input)?;
    let (input, _) = ws(char('('))(input)?;

    let (input, args) = separated_list0(
        ws(char(',')),
        alt((
            map(preceded(ws(tag("title:")), ws(string_literal)), |v| {
                ("title", v)
            }),
            map(preceded(ws(tag("y:")), ws(string_literal)), |v| ("y", v)),
        )),
    )(input)?;

    let (input, _) = ws(char(')'))(input)?;

    let mut labels = Labels::default();
    for (key, val) in args {
        match key {
            "title" => labels.title = Some(val),
            "y" => labels.y = Some(val),
            _ => {}
        }
    }

    Ok((input, labels))
}
