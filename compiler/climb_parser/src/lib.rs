//! Recursive-descent evaluator for arithmetic over non-negative integers.
//!
//! Operators live in an [`OperatorTable`] grouped into priority tiers. New
//! left-associative binary operators can be slotted in directly above any
//! registered operator, and the descent picks them up without further changes.
//!
//! ```
//! use climb_parser::ExpressionEvaluator;
//!
//! let mut evaluator = ExpressionEvaluator::new("2*3^2");
//! evaluator.add_operation('^', f64::powf, '*').unwrap();
//! assert_eq!(evaluator.parse().unwrap(), 18.0);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod parser;
pub mod registry;

pub use error::{Expected, ParseError, RegistryError, SyntaxError};
pub use parser::{ExpressionEvaluator, ParserConfig};
pub use registry::{BinaryOperation, OperatorTable, Priority};


#[cfg(test)]
pub(crate) use tests::init_test_logger;
