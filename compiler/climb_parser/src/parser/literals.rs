//! Numeric literal scanning.

use nom::character::complete::digit1;
use nom::combinator::map_res;
use nom::IResult;

/// Scans the maximal run of ASCII digits at the start of `input` as a number.
///
/// There is no sign and no decimal point. Runs longer than an integer type can
/// hold are still accepted and round like any other `f64`.
///
/// # Examples
///
/// ```
/// use climb_parser::parser::literals::scan_number;
///
/// assert_eq!(scan_number("042+1"), Ok(("+1", 42.0)));
/// assert!(scan_number("(1)").is_err());
/// ```
pub fn scan_number(input: &str) -> IResult<&str, f64> {
    map_res(digit1, |s: &str| s.parse::<f64>())(input)
}
