// errorbars() command parser

use super::ast::ErrorBars;
use super::lexer::ws;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    multi::separated_list0,
    IResult,
};

/// Parse whisker toggles
/// Format: errorbars(sd), errorbars(sem) or errorbars(sd, sem)
pub fn parse_errorbars(input: &str) -> IResult<&str, ErrorBars> {
    let (input, _) = ws(tag("errorbars"))(input)?;
    let (input, _) = ws(char('('))(input)?;

    let (input, flags) = separated_list0(
        ws(char(',')),
        alt((ws(tag("sem")), ws(tag("sd")))),
    )(input)?;

    let (input, _) = ws(char(')'))(input)?;

    let mut bars = ErrorBars::default();
    for flag in flags {
        match flag {
            "sd" => bars.std_dev = true,
            "sem" => bars.std_err = true,
            _ => {}
        }
    }

    Ok((input, bars))
}
