//! Stock operator implementations and a catalog of named extension functions.

use std::sync::Arc;

use super::BinaryOperation;

/// Addition.
pub fn add(x: f64, y: f64) -> f64 {
    x + y
}

/// Subtraction.
pub fn sub(x: f64, y: f64) -> f64 {
    x - y
}

/// Multiplication.
pub fn mul(x: f64, y: f64) -> f64 {
    x * y
}

/// Floating-point division.
pub fn div(x: f64, y: f64) -> f64 {
    x / y
}

fn avg(x: f64, y: f64) -> f64 {
    (x + y) / 2.0
}

const CATALOG: &[(&str, fn(f64, f64) -> f64)] = &[
    ("add", add),
    ("sub", sub),
    ("mul", mul),
    ("div", div),
    ("pow", f64::powf),
    ("max", f64::max),
    ("min", f64::min),
    ("rem", f64::rem_euclid),
    ("hypot", f64::hypot),
    ("avg", avg),
];

/// Looks up a catalog function by name.
pub fn by_name(name: &str) -> Option<BinaryOperation> {
    CATALOG
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, f)| Arc::new(*f) as BinaryOperation)
}

/// Names accepted by [`by_name`].
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(n, _)| *n)
}
