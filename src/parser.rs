//! Input line parser
//!
//! Splits one line of input into a command name and its arguments.
//! Two spellings are accepted:
//!
//! ```text
//! add(5, 3)            call syntax, comma separated
//! add 5 3              word syntax, whitespace separated
//! menu                 no arguments
//! save_history("my history.csv")
//! ```
//!
//! Words that parse as numbers become [`Arg::Number`], everything else
//! (paths, quoted strings) becomes [`Arg::Text`].

use nom::{
    branch::alt,
    bytes::complete::{escaped, take_while, take_while1},
    character::complete::{char, multispace0, multispace1, none_of, one_of},
    combinator::{all_consuming, map, opt, recognize},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use thiserror::Error;

use crate::command::Arg;

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Empty input")]
    Empty,
    #[error("Invalid command format: {0}")]
    Syntax(String),
}

/// A command name with its positional arguments
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub name: String,
    pub args: Vec<Arg>,
}

/// Command name: letters, digits and underscores, not starting with a digit
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

/// Double-quoted string, `\"` and `\\` escaped
fn quoted(input: &str) -> IResult<&str, Arg> {
    map(
        delimited(
            char('"'),
            opt(escaped(none_of("\"\\"), '\\', one_of("\"\\"))),
            char('"'),
        ),
        |content: Option<&str>| {
            let content = content.unwrap_or("");
            Arg::Text(content.replace("\\\"", "\"").replace("\\\\", "\\"))
        },
    )(input)
}

/// Unquoted argument inside parentheses
fn paren_word(input: &str) -> IResult<&str, Arg> {
    map(
        recognize(pair(
            none_of("\",()"),
            take_while(|c: char| c != ',' && c != ')' && !c.is_whitespace()),
        )),
        Arg::from_word,
    )(input)
}

/// Unquoted whitespace-delimited argument
fn bare_word(input: &str) -> IResult<&str, Arg> {
    map(
        recognize(pair(none_of("\"()"), take_while(|c: char| !c.is_whitespace()))),
        Arg::from_word,
    )(input)
}

/// `( arg, arg, ... )`
fn call_args(input: &str) -> IResult<&str, Vec<Arg>> {
    delimited(
        pair(char('('), multispace0),
        separated_list0(
            tuple((multispace0, char(','), multispace0)),
            alt((quoted, paren_word)),
        ),
        pair(multispace0, char(')')),
    )(input)
}

/// ` arg arg ...`
fn word_args(input: &str) -> IResult<&str, Vec<Arg>> {
    many0(preceded(multispace1, alt((quoted, bare_word))))(input)
}

fn command_line(input: &str) -> IResult<&str, ParsedLine> {
    let (input, _) = multispace0(input)?;
    let (input, name) = identifier(input)?;
    let (input, args) = alt((preceded(multispace0, call_args), word_args))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((
        input,
        ParsedLine {
            name: name.to_string(),
            args,
        },
    ))
}

/// Parse one line of input
pub fn parse_line(line: &str) -> Result<ParsedLine, ParseError> {
    if line.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    all_consuming(command_line)(line)
        .map(|(_, parsed)| parsed)
        .map_err(|_| ParseError::Syntax(line.trim().to_string()))
}
