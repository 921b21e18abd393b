//! Driver pieces for the `climb` binary: operator definitions from the
//! command line, diagnostics rendering, the REPL session and the self-test.

pub mod diagnostics;
pub mod opdef;
pub mod repl;
pub mod selftest;

pub use diagnostics::render_snippet;
pub use opdef::{build_table, OperatorDef, OperatorDefError};
pub use repl::ReplSession;
