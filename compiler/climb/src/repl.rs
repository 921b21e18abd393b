use climb_parser::{ExpressionEvaluator, OperatorTable, ParserConfig};

use crate::diagnostics::render_snippet;
use crate::opdef::OperatorDef;

/// Interactive session state: the operator table grows as `:add` is used.
pub struct ReplSession {
    table: OperatorTable,
    config: ParserConfig,
}

impl ReplSession {
    pub fn new(table: OperatorTable, config: ParserConfig) -> Self {
        Self { table, config }
    }

    pub fn prompt(&self) -> &'static str {
        "climb> "
    }

    pub fn table(&self) -> &OperatorTable {
        &self.table
    }

    /// Handles one input line. Returns output lines and whether to exit.
    pub fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (Vec::new(), false);
        }
        if trimmed.starts_with(':') {
            return self.handle_command(trimmed);
        }

        let mut evaluator =
            ExpressionEvaluator::with_table(trimmed, self.table.clone()).with_config(self.config);
        match evaluator.parse() {
            Ok(value) => (vec![format!("= {value}")], false),
            Err(err) => (vec![render_snippet(trimmed, &err)], false),
        }
    }

    fn handle_command(&mut self, line: &str) -> (Vec<String>, bool) {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        match command {
            ":help" => (
                vec![
                    "commands: :help, :quit, :ops, :add SYMBOL FUNCTION AFTER".to_string(),
                    "note: expressions take digits, parentheses and operators, no spaces".to_string(),
                ],
                false,
            ),
            ":q" | ":quit" | ":exit" => (Vec::new(), true),
            ":ops" => (list_operators(&self.table), false),
            ":add" => {
                let args: Vec<&str> = parts.collect();
                (vec![self.add(&args)], false)
            }
            _ => (vec![format!("error: unknown command '{line}'")], false),
        }
    }

    fn add(&mut self, args: &[&str]) -> String {
        let (symbol, function, after) = match args {
            [symbol, function, after] => match (single_char(symbol), single_char(after)) {
                (Some(symbol), Some(after)) => (symbol, *function, after),
                _ => return "error: SYMBOL and AFTER must be single characters".to_string(),
            },
            _ => return "error: usage: :add SYMBOL FUNCTION AFTER".to_string(),
        };
        match OperatorDef::new(symbol, function, after).and_then(|def| def.apply(&mut self.table)) {
            Ok(priority) => format!("added '{symbol}' at priority {priority}"),
            Err(e) => format!("error: {e}"),
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// One line per priority tier, loosest first.
pub fn list_operators(table: &OperatorTable) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = None;
    for (priority, symbol) in table.operators() {
        if current != Some(priority) {
            lines.push(format!("priority {priority}:"));
            current = Some(priority);
        }
        if let Some(last) = lines.last_mut() {
            last.push(' ');
            last.push(symbol);
        }
    }
    lines
}
