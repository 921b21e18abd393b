//! Operator table: which symbols are binary operators, what they compute,
//! and how tightly they bind.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::error::{ParseResult, RegistryError};
use crate::parser::ExpressionEvaluator;

pub mod builtins;

/// A binary operator implementation.
pub type BinaryOperation = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// Precedence tier of an operator. Higher binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u32);

impl Priority {
    /// The loosest tier, where parsing starts.
    pub const LOWEST: Priority = Priority(1);

    /// Wraps a raw tier number.
    pub fn new(level: u32) -> Priority {
        Priority(level)
    }

    /// The raw tier number.
    pub fn level(self) -> u32 {
        self.0
    }

    /// The tier directly above this one.
    pub fn next(self) -> Priority {
        Priority(self.0 + 1)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered operators.
///
/// Three mappings are kept in step: symbol to implementation, symbol to
/// priority, and priority to the symbols at that tier. Every mutation goes
/// through [`OperatorTable::register`], which validates before touching any
/// of them.
#[derive(Clone)]
pub struct OperatorTable {
    implementations: HashMap<char, BinaryOperation>,
    priorities: HashMap<char, Priority>,
    members: BTreeMap<Priority, Vec<char>>,
    max_priority: Priority,
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OperatorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorTable")
            .field("members", &self.members)
            .field("max_priority", &self.max_priority)
            .finish()
    }
}

impl OperatorTable {
    /// A table holding `+ -` at priority 1 and `* /` at priority 2.
    pub fn new() -> Self {
        let mut table = Self {
            implementations: HashMap::new(),
            priorities: HashMap::new(),
            members: BTreeMap::new(),
            max_priority: Priority::LOWEST,
        };
        let additive = Priority::LOWEST;
        let multiplicative = additive.next();
        table.insert('+', Arc::new(builtins::add), additive);
        table.insert('-', Arc::new(builtins::sub), additive);
        table.insert('*', Arc::new(builtins::mul), multiplicative);
        table.insert('/', Arc::new(builtins::div), multiplicative);
        table
    }

    /// Registers `symbol` one tier above the operator `after`.
    ///
    /// The new operator always gets a tier of its own, directly above the tier
    /// of `after`. Tiers that were already at or above that level move up by
    /// one, so the new operator binds tighter than `after` and looser than
    /// everything that bound tighter than `after`. Returns the assigned
    /// priority.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownOperator`] if `after` is not registered,
    /// [`RegistryError::AlreadyRegistered`] if `symbol` is, and
    /// [`RegistryError::ReservedSymbol`] for digits, parentheses and whitespace.
    pub fn add_operation<F>(
        &mut self,
        symbol: char,
        implementation: F,
        after: char,
    ) -> Result<Priority, RegistryError>
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        self.register(symbol, Arc::new(implementation), after)
    }

    /// Like [`add_operation`](Self::add_operation), for an implementation that
    /// is already shared.
    pub fn register(
        &mut self,
        symbol: char,
        implementation: BinaryOperation,
        after: char,
    ) -> Result<Priority, RegistryError> {
        if is_reserved(symbol) {
            return Err(RegistryError::ReservedSymbol(symbol));
        }
        let anchor = self
            .priority_of(after)
            .ok_or(RegistryError::UnknownOperator(after))?;
        if self.contains(symbol) {
            return Err(RegistryError::AlreadyRegistered(symbol));
        }

        let priority = anchor.next();
        self.shift_tiers_from(priority);
        self.insert(symbol, implementation, priority);
        log::debug!(
            "registered operator '{symbol}' at priority {priority} (after '{after}'), max {}",
            self.max_priority
        );
        Ok(priority)
    }

    /// Moves every tier at or above `from` up by one level.
    fn shift_tiers_from(&mut self, from: Priority) {
        let displaced = self.members.split_off(&from);
        for (priority, symbols) in displaced {
            let raised = priority.next();
            for symbol in &symbols {
                self.priorities.insert(*symbol, raised);
            }
            self.members.insert(raised, symbols);
            self.max_priority = self.max_priority.max(raised);
        }
    }

    fn insert(&mut self, symbol: char, implementation: BinaryOperation, priority: Priority) {
        self.implementations.insert(symbol, implementation);
        self.priorities.insert(symbol, priority);
        self.members.entry(priority).or_default().push(symbol);
        self.max_priority = self.max_priority.max(priority);
    }

    /// Priority of a registered operator.
    pub fn priority_of(&self, symbol: char) -> Option<Priority> {
        self.priorities.get(&symbol).copied()
    }

    /// Operators at a tier, in registration order.
    pub fn members_at(&self, priority: Priority) -> &[char] {
        self.members
            .get(&priority)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The tightest tier in use. Parsing above it reads a value.
    pub fn max_priority(&self) -> Priority {
        self.max_priority
    }

    /// Whether `symbol` is a registered operator.
    pub fn contains(&self, symbol: char) -> bool {
        self.priorities.contains_key(&symbol)
    }

    /// The implementation of `symbol` if it sits exactly at `priority`.
    pub fn operation_at(&self, symbol: char, priority: Priority) -> Option<&BinaryOperation> {
        if self.members_at(priority).contains(&symbol) {
            self.implementations.get(&symbol)
        } else {
            None
        }
    }

    /// Every operator with its priority, loosest tier first.
    pub fn operators(&self) -> impl Iterator<Item = (Priority, char)> + '_ {
        self.members
            .iter()
            .flat_map(|(priority, symbols)| symbols.iter().map(move |s| (*priority, *s)))
    }

    /// Evaluates `source` against this table.
    pub fn evaluate(&self, source: &str) -> ParseResult<f64> {
        ExpressionEvaluator::with_table(source, self.clone()).parse()
    }
}

/// Characters the grammar already gives a meaning to.
pub fn is_reserved(symbol: char) -> bool {
    symbol.is_ascii_digit() || symbol == '(' || symbol == ')' || symbol.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_table() {
        let table = OperatorTable::new();
        assert_eq!(table.members_at(Priority::new(1)), &['+', '-']);
        assert_eq!(table.members_at(Priority::new(2)), &['*', '/']);
        assert_eq!(table.max_priority(), Priority::new(2));
        assert_eq!(table.priority_of('*'), Some(Priority::new(2)));
        assert_eq!(table.priority_of('^'), None);
    }

    #[test]
    fn test_add_above_top_tier_creates_new_tier() {
        let mut table = OperatorTable::new();
        let priority = table.add_operation('^', f64::powf, '*').unwrap();
        assert_eq!(priority, Priority::new(3));
        assert_eq!(table.max_priority(), Priority::new(3));
        assert_eq!(table.members_at(priority), &['^']);
    }

    #[test]
    fn test_add_below_occupied_tier_raises_it() {
        let mut table = OperatorTable::new();
        let priority = table.add_operation('@', f64::max, '+').unwrap();
        assert_eq!(priority, Priority::new(2));
        assert_eq!(table.members_at(priority), &['@']);
        assert_eq!(table.members_at(Priority::new(3)), &['*', '/']);
        assert_eq!(table.priority_of('*'), Some(Priority::new(3)));
        assert_eq!(table.priority_of('+'), Some(Priority::LOWEST));
        assert_eq!(table.max_priority(), Priority::new(3));
    }

    #[test]
    fn test_raised_tiers_keep_their_implementations() {
        let mut table = OperatorTable::new();
        table.add_operation('@', f64::max, '+').unwrap();
        let mul = table.operation_at('*', Priority::new(3)).unwrap();
        assert_eq!(mul(2.0, 3.0), 6.0);
        assert!(table.operation_at('*', Priority::new(2)).is_none());
    }

    #[test]
    fn test_unknown_anchor_leaves_table_untouched() {
        let mut table = OperatorTable::new();
        let err = table.add_operation('^', f64::powf, '%').unwrap_err();
        assert_eq!(err, RegistryError::UnknownOperator('%'));
        assert!(!table.contains('^'));
        assert_eq!(table.operators().count(), 4);
    }

    #[test]
    fn test_duplicate_symbol_is_rejected() {
        let mut table = OperatorTable::new();
        let err = table.add_operation('+', f64::max, '*').unwrap_err();
        assert_eq!(err, RegistryError::AlreadyRegistered('+'));
        assert_eq!(table.priority_of('+'), Some(Priority::LOWEST));
        assert_eq!(table.members_at(Priority::new(3)), &[] as &[char]);
    }

    #[test]
    fn test_reserved_symbols_are_rejected() {
        let mut table = OperatorTable::new();
        for symbol in ['7', '(', ')', ' '] {
            assert_eq!(
                table.add_operation(symbol, f64::max, '+'),
                Err(RegistryError::ReservedSymbol(symbol))
            );
        }
    }

    #[test]
    fn test_operation_at_checks_tier() {
        let table = OperatorTable::new();
        let add = table.operation_at('+', Priority::LOWEST).unwrap();
        assert_eq!(add(2.0, 3.0), 5.0);
        assert!(table.operation_at('+', Priority::new(2)).is_none());
    }

    #[test]
    fn test_operators_are_listed_loosest_first() {
        let mut table = OperatorTable::new();
        table.add_operation('^', f64::powf, '*').unwrap();
        let listed: Vec<(u32, char)> = table.operators().map(|(p, s)| (p.level(), s)).collect();
        assert_eq!(
            listed,
            vec![(1, '+'), (1, '-'), (2, '*'), (2, '/'), (3, '^')]
        );
    }
}
