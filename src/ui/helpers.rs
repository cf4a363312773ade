use anyhow::Error;

/// Pad or truncate text to an exact column width so the hand-rolled table
/// columns line up. Truncation leaves no ellipsis; the table is dense enough
/// that a clipped description is preferable to a jagged grid.
pub(crate) fn fit_column(text: &str, width: usize) -> String {
    let mut cell: String = text.chars().take(width).collect();
    while cell.chars().count() < width {
        cell.push(' ');
    }
    cell
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
