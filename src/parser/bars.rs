// bars() command parser

use super::ast::BarsCommand;
use super::lexer::{column_name, ws};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::map,
    multi::separated_list0,
    sequence::preceded,
    IResult,
};

/// Parse the bars command
/// Format: bars(group: col, value: col) — both arguments optional, any order
pub fn parse_bars(input: &str) -> IResult<&str, BarsCommand> {
    let (input, _) = ws(tag("bars"))(input)?;
    let (input, _) = ws(char('('))(input)?;

    let (input, args) = separated_list0(
        ws(char(',')),
        alt((
            map(preceded(ws(tag("group:")), ws(column_name)), |v| {
                ("group", v)
            }),
            map(preceded(ws(tag("value:")), ws(column_name)), |v| {
                ("value", v)
            }),
        )),
    )(input)?;

    let (input, _) = ws(char(')'))(input)?;

    let mut bars = BarsCommand::default();
    for (key, val) in args {
        match key {
            "group" => bars.group = Some(val),
            "value" => bars.value = Some(val),
            _ => {}
        }
    }

    Ok((input, bars))
}
