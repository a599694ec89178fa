// ── Text / number normalizers ─────────────────────────────────────────────────

/// Collapse every whitespace run (nbsp included) to one space and trim.
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a stat cell: strip thousands separators and percent signs.
/// "1,234" → 1234.0 | "60.5%" → 60.5 | "" → None | "N/A" → None
pub fn parse_number(s: &str) -> Option<f64> {
    let cleaned = s.replace([',', '%'], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `Some(text)` unless the text is empty.
pub fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
