use climb_parser::ParseError;

/// Render an error with the source line and a caret under the offending
/// position.
pub fn render_snippet(source: &str, err: &ParseError) -> String {
    let column = source
        .get(..err.position())
        .map(|prefix| prefix.chars().count())
        .unwrap_or(0);
    format!(
        "error: {err}\n  | {source}\n  | {}^",
        " ".repeat(column)
    )
}
