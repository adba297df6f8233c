// Shared token parsers for the chart DSL

use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, multispace0},
    combinator::map,
    error::ParseError,
    number::complete::double,
    sequence::delimited,
    IResult,
};

/// Wrap a parser so it eats surrounding whitespace.
pub fn ws<'a, F, O, E: ParseError<&'a str>>(
    inner: F,
) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: FnMut(&'a str) -> IResult<&'a str, O, E>,
{
    delimited(multispace0, inner, multispace0)
}

/// Bare identifier: alphanumerics and underscores (unicode-friendly, so
/// accented column names work without quoting).
pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        String::from,
    )(input)
}

/// Double-quoted string literal; no escape handling.
pub fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('"'), take_till(|c| c == '"'), char('"')),
        String::from,
    )(input)
}

/// Numeric literal as f64.
pub fn number_literal(input: &str) -> IResult<&str, f64> {
    double(input)
}

/// A column name: quoted when it contains spaces or punctuation, bare
/// otherwise.
pub fn column_name(input: &str) -> IResult<&str, String> {
    alt((string_literal, identifier))(input)
}
