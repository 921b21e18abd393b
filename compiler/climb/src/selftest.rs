use climb_parser::{OperatorTable, ParseError};
use thiserror::Error;

use crate::opdef::{OperatorDef, OperatorDefError};

/// One reference expression, the operators it needs, and its value.
pub struct Case {
    pub input: &'static str,
    pub expected: f64,
    pub operators: &'static [(char, &'static str, char)],
}

pub const CASES: &[Case] = &[
    Case {
        input: "1",
        expected: 1.0,
        operators: &[],
    },
    Case {
        input: "1+1",
        expected: 2.0,
        operators: &[],
    },
    Case {
        input: "2*2+2",
        expected: 6.0,
        operators: &[],
    },
    Case {
        input: "2+2*2",
        expected: 6.0,
        operators: &[],
    },
    Case {
        input: "2*(2+2)",
        expected: 8.0,
        operators: &[],
    },
    Case {
        input: "2*(2/2)",
        expected: 2.0,
        operators: &[],
    },
    Case {
        input: "2*3^2",
        expected: 18.0,
        operators: &[('^', "pow", '*')],
    },
    Case {
        input: "9@2*3",
        expected: 9.0,
        operators: &[('@', "max", '+')],
    },
];

#[derive(Debug, Error)]
pub enum SelftestFailure {
    #[error("{input}: expected {expected}, got {actual}")]
    WrongValue {
        input: &'static str,
        expected: f64,
        actual: f64,
    },

    #[error("{input}: {source}")]
    Parse {
        input: &'static str,
        source: ParseError,
    },

    #[error("{input}: {source}")]
    Setup {
        input: &'static str,
        source: OperatorDefError,
    },
}

/// Runs every case in [`CASES`], stopping at the first failure.
pub fn run() -> Result<usize, SelftestFailure> {
    for case in CASES {
        check(case)?;
        log::debug!("selftest passed: {}", case.input);
    }
    Ok(CASES.len())
}

fn check(case: &Case) -> Result<(), SelftestFailure> {
    let mut table = OperatorTable::new();
    for &(symbol, function, after) in case.operators {
        OperatorDef::new(symbol, function, after)
            .and_then(|def| def.apply(&mut table))
            .map_err(|source| SelftestFailure::Setup {
                input: case.input,
                source,
            })?;
    }
    let actual = table.evaluate(case.input).map_err(|source| SelftestFailure::Parse {
        input: case.input,
        source,
    })?;
    if actual != case.expected {
        return Err(SelftestFailure::WrongValue {
            input: case.input,
            expected: case.expected,
            actual,
        });
    }
    Ok(())
}
