use std::fmt;
use std::str::FromStr;

use climb_parser::registry::builtins;
use climb_parser::{OperatorTable, Priority, RegistryError};
use thiserror::Error;

/// An operator to register, written `SYMBOL=FUNCTION@AFTER` on the command
/// line, e.g. `^=pow@*` puts power one tier above multiplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDef {
    pub symbol: char,
    pub function: String,
    pub after: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperatorDefError {
    #[error("malformed operator definition '{0}', expected SYMBOL=FUNCTION@AFTER")]
    Malformed(String),

    #[error("unknown function '{0}' (available: {list})", list = available_functions())]
    UnknownFunction(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

fn available_functions() -> String {
    builtins::names().collect::<Vec<_>>().join(", ")
}

impl OperatorDef {
    pub fn new(
        symbol: char,
        function: impl Into<String>,
        after: char,
    ) -> Result<Self, OperatorDefError> {
        let function = function.into();
        if builtins::by_name(&function).is_none() {
            return Err(OperatorDefError::UnknownFunction(function));
        }
        Ok(Self {
            symbol,
            function,
            after,
        })
    }

    /// Adds this operator to `table`.
    pub fn apply(&self, table: &mut OperatorTable) -> Result<Priority, OperatorDefError> {
        let implementation = builtins::by_name(&self.function)
            .ok_or_else(|| OperatorDefError::UnknownFunction(self.function.clone()))?;
        let priority = table.register(self.symbol, implementation, self.after)?;
        log::info!("operator '{}' = {} at priority {priority}", self.symbol, self.function);
        Ok(priority)
    }
}

impl FromStr for OperatorDef {
    type Err = OperatorDefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            [symbol, '=', name @ .., '@', after] if !name.is_empty() => {
                OperatorDef::new(*symbol, name.iter().collect::<String>(), *after)
            }
            _ => Err(OperatorDefError::Malformed(s.to_string())),
        }
    }
}

impl fmt::Display for OperatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}@{}", self.symbol, self.function, self.after)
    }
}

/// The default table extended with `defs`, applied in order.
pub fn build_table(defs: &[OperatorDef]) -> Result<OperatorTable, OperatorDefError> {
    let mut table = OperatorTable::new();
    for def in defs {
        def.apply(&mut table)?;
    }
    Ok(table)
}
