//! Numeric literal grammar for CDU fields.
//!
//! Numbers in CDU files follow the loose conventions of the Fortran tools that
//! produced them: an optional sign, a mantissa where either side of the decimal
//! point may be empty (`100.`, `.5`), and an optional exponent introduced by
//! `E` or `D` (`1.5D-3`).

use winnow::{
    Parser as _,
    ascii::{digit0, digit1},
    combinator::{alt, opt, preceded},
    error::{ContextError, ErrMode},
    token::one_of,
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Parse the signed mantissa, returning the matched slice.
fn mantissa<'s>(input: &mut &'s str) -> IResult<&'s str> {
    (
        opt(one_of(['+', '-'])),
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
    )
        .take()
        .parse_next(input)
}

/// Parse an `E`/`D` exponent, returning the signed digits.
fn exponent<'s>(input: &mut &'s str) -> IResult<&'s str> {
    preceded(
        one_of(['e', 'E', 'd', 'D']),
        (opt(one_of(['+', '-'])), digit1).take(),
    )
    .parse_next(input)
}

/// Parse a complete numeric literal.
///
/// Surrounding whitespace is ignored; any other trailing content makes the
/// literal invalid.
///
/// # Examples
///
/// ```
/// use cdu_core::number::parse_number;
///
/// assert_eq!(parse_number("-1.0"), Some(-1.0));
/// assert_eq!(parse_number(" 100. "), Some(100.0));
/// assert_eq!(parse_number("1.5D-3"), Some(1.5e-3));
/// assert_eq!(parse_number("K"), None);
/// ```
pub fn parse_number(text: &str) -> Option<f64> {
    let mut input = text.trim();

    let mantissa = mantissa.parse_next(&mut input).ok()?;
    let exponent = opt(exponent).parse_next(&mut input).ok()?;

    if !input.is_empty() {
        return None;
    }

    let literal = match exponent {
        Some(exponent) => format!("{mantissa}e{exponent}"),
        None => mantissa.to_string(),
    };

    literal.parse().ok()
}

/// Parse a non-negative integer field such as a block number or diagram id.
///
/// # Examples
///
/// ```
/// use cdu_core::number::parse_integer;
///
/// assert_eq!(parse_integer("0012"), Some(12));
/// assert_eq!(parse_integer("12a"), None);
/// assert_eq!(parse_integer(""), None);
/// ```
pub fn parse_integer(text: &str) -> Option<u32> {
    let mut input = text.trim();

    let digits: &str = digit1::<_, ContextError>.parse_next(&mut input).ok()?;

    if !input.is_empty() {
        return None;
    }

    digits.parse().ok()
}
