// ---------------------------------------------------------------------------
// Text → number coercion ("convert or absent")
// ---------------------------------------------------------------------------

/// Parse a numeric cell. Anything that is not a finite number becomes `None`:
/// empty cells, free text such as `"N/A"` or `"$12.99"`, and `inf` / `NaN`.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a count that may carry thousands separators, e.g. `"12,345"`.
pub fn parse_count(raw: &str) -> Option<f64> {
    parse_numeric(&raw.replace(',', ""))
}
