//! Recursive-descent evaluator over the raw character sequence.
//!
//! Priority is the recursion parameter: `parse_at_priority(p)` reads operands at
//! `p + 1` and folds every operator of tier `p` between them, left to right.
//! Above the tightest tier the descent reads a number or a parenthesized group.

use std::sync::Arc;

use crate::error::{Expected, ParseError, ParseResult, RegistryError, SyntaxError};
use crate::registry::{BinaryOperation, OperatorTable, Priority};

pub mod cursor;
pub mod literals;

pub use cursor::Cursor;

/// Parser limits.
///
/// Stack use grows with `max_nesting_depth` times the number of priority tiers
/// in the table, since every parenthesized group descends the whole tier
/// ladder again. Tables with very many tiers need a lower nesting limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest allowed parenthesis nesting. Does not bound the tier count.
    pub max_nesting_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: 256,
        }
    }
}

/// Evaluates one expression against an operator table.
///
/// The evaluator is single-use: [`parse`](Self::parse) consumes the input, and
/// calling it again resumes from wherever the cursor stopped.
#[derive(Debug, Clone)]
pub struct ExpressionEvaluator<'src> {
    table: OperatorTable,
    config: ParserConfig,
    source: &'src str,
    position: usize,
}

impl<'src> ExpressionEvaluator<'src> {
    /// An evaluator over `source` with the default operators.
    pub fn new(source: &'src str) -> Self {
        Self::with_table(source, OperatorTable::new())
    }

    /// An evaluator over `source` with a prepared operator table.
    pub fn with_table(source: &'src str, table: OperatorTable) -> Self {
        Self {
            table,
            config: ParserConfig::default(),
            source,
            position: 0,
        }
    }

    /// Replace the parser limits.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers `symbol` one tier above `after`. See
    /// [`OperatorTable::add_operation`].
    pub fn add_operation<F>(
        &mut self,
        symbol: char,
        implementation: F,
        after: char,
    ) -> Result<Priority, RegistryError>
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        self.table.add_operation(symbol, implementation, after)
    }

    /// The operator table in use.
    pub fn table(&self) -> &OperatorTable {
        &self.table
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Evaluates the input from the cursor to the end.
    ///
    /// # Errors
    ///
    /// A [`SyntaxError`] at the first character that cannot continue the
    /// expression, including leftover input after a complete expression and
    /// a missing `)`.
    pub fn parse(&mut self) -> ParseResult<f64> {
        let mut parser = Parser {
            table: &self.table,
            config: self.config,
            cursor: Cursor::at(self.source, self.position),
            depth: 0,
        };
        let result = parser.parse_complete();
        self.position = parser.cursor.position();
        result
    }
}

struct Parser<'t, 'src> {
    table: &'t OperatorTable,
    config: ParserConfig,
    cursor: Cursor<'src>,
    depth: usize,
}

impl Parser<'_, '_> {
    fn parse_complete(&mut self) -> ParseResult<f64> {
        log::debug!("=== parse ===");
        log::debug!("Input: {:?}", self.cursor.rest());
        let value = self.parse_expression()?;
        match self.cursor.peek() {
            None => {
                log::debug!("parse result: {value}");
                Ok(value)
            }
            Some(found) => Err(self.error(Some(found), Expected::EndOfInput)),
        }
    }

    fn parse_expression(&mut self) -> ParseResult<f64> {
        self.parse_at_priority(Priority::LOWEST)
    }

    fn parse_at_priority(&mut self, priority: Priority) -> ParseResult<f64> {
        if priority > self.table.max_priority() {
            return self.parse_value();
        }
        match self.cursor.peek() {
            Some(c) if starts_operand(c) => {}
            found => return Err(self.error(found, Expected::Operand)),
        }

        let mut res = self.parse_at_priority(priority.next())?;
        while let Some((symbol, operation)) = self.operator_at(priority) {
            self.cursor.bump(symbol);
            let rhs = self.parse_at_priority(priority.next())?;
            let folded = operation(res, rhs);
            log::trace!("fold {res} {symbol} {rhs} = {folded} (priority {priority})");
            res = folded;
        }
        Ok(res)
    }

    /// The operator under the cursor, if it belongs to `priority`.
    fn operator_at(&self, priority: Priority) -> Option<(char, BinaryOperation)> {
        let symbol = self.cursor.peek()?;
        self.table
            .operation_at(symbol, priority)
            .map(|operation| (symbol, Arc::clone(operation)))
    }

    fn parse_value(&mut self) -> ParseResult<f64> {
        match self.cursor.peek() {
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            Some('(') => self.parse_group(),
            found => Err(self.error(found, Expected::Operand)),
        }
    }

    fn parse_group(&mut self) -> ParseResult<f64> {
        let open = self.cursor.position();
        if self.depth >= self.config.max_nesting_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.config.max_nesting_depth,
                position: open,
            });
        }
        self.cursor.bump('(');
        self.depth += 1;
        let value = self.parse_expression()?;
        self.depth -= 1;

        match self.cursor.peek() {
            Some(')') => {
                self.cursor.bump(')');
                Ok(value)
            }
            found => Err(self.error(found, Expected::ClosingParen)),
        }
    }

    fn parse_number(&mut self) -> ParseResult<f64> {
        let rest = self.cursor.rest();
        match literals::scan_number(rest) {
            Ok((remaining, value)) => {
                self.cursor.advance(rest.len() - remaining.len());
                Ok(value)
            }
            Err(_) => Err(self.error(self.cursor.peek(), Expected::Operand)),
        }
    }

    fn error(&self, found: Option<char>, expected: Expected) -> ParseError {
        let err = SyntaxError::new(self.cursor.position(), found, expected);
        log::debug!("parse failed: {err}");
        err.into()
    }
}

fn starts_operand(c: char) -> bool {
    c.is_ascii_digit() || c == '('
}
