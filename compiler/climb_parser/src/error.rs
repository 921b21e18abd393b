//! Error types for evaluation and operator registration.

use std::fmt;
use thiserror::Error;

/// What the parser was looking for when it gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A digit or an opening parenthesis.
    Operand,
    /// The `)` closing a parenthesized group.
    ClosingParen,
    /// Nothing: the expression was complete but input remained.
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Operand => f.write_str("a number or '('"),
            Expected::ClosingParen => f.write_str("')'"),
            Expected::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// Malformed input at a specific position.
///
/// `position` is a byte offset into the source. `found` is `None` when the
/// input ended before the expression was complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.describe())]
pub struct SyntaxError {
    /// Byte offset of the offending character.
    pub position: usize,
    /// The offending character, if any input was left.
    pub found: Option<char>,
    /// What would have been accepted instead.
    pub expected: Expected,
}

impl SyntaxError {
    pub(crate) fn new(position: usize, found: Option<char>, expected: Expected) -> Self {
        Self {
            position,
            found,
            expected,
        }
    }

    /// True when the failure was running out of input.
    pub fn is_unexpected_end(&self) -> bool {
        self.found.is_none()
    }

    fn describe(&self) -> String {
        match self.found {
            Some(c) => format!(
                "can't parse at pos {} with symbol '{}': expected {}",
                self.position, c, self.expected
            ),
            None => format!(
                "unexpected end of input at pos {}: expected {}",
                self.position, self.expected
            ),
        }
    }
}

/// Errors raised while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input is not a valid expression.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Parentheses nest deeper than the configured limit.
    #[error("maximum nesting depth of {limit} exceeded at pos {position}")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
        /// Byte offset of the `(` that crossed the limit.
        position: usize,
    },
}

impl ParseError {
    /// Byte offset the error points at.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Syntax(e) => e.position,
            ParseError::NestingTooDeep { position, .. } => *position,
        }
    }

    /// The syntax error, if that is what this is.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            ParseError::Syntax(e) => Some(e),
            ParseError::NestingTooDeep { .. } => None,
        }
    }
}

/// Errors raised while registering an operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The anchor operator is not in the table.
    #[error("unknown operator '{0}'")]
    UnknownOperator(char),

    /// The symbol already names an operator.
    #[error("operator '{0}' is already registered")]
    AlreadyRegistered(char),

    /// Digits, parentheses and whitespace cannot be operators.
    #[error("'{0}' is reserved and cannot be used as an operator")]
    ReservedSymbol(char),
}

/// Result type for evaluation
pub type ParseResult<T> = Result<T, ParseError>;
