//! Cell readers keyed by `data-stat`. A row may be absent (no table, no
//! career row); every reader treats that like a missing cell.

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

use super::cleaner::{normalize_text, parse_number};

static SELECTOR_STAT_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[data-stat]").expect("Invalid data-stat selector"));

fn cell<'a>(row: ElementRef<'a>, key: &str) -> Option<ElementRef<'a>> {
    row.select(&SELECTOR_STAT_CELL)
        .find(|c| c.value().attr("data-stat") == Some(key))
}

/// Normalized text of the `key` cell, or "" when row or cell is missing.
pub fn read_text(row: Option<ElementRef<'_>>, key: &str) -> String {
    row.and_then(|r| cell(r, key))
        .map(|c| normalize_text(&c.text().collect::<String>()))
        .unwrap_or_default()
}

/// First non-empty text among `keys`, in priority order.
pub fn read_text_any(row: Option<ElementRef<'_>>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .map(|key| read_text(row, key))
        .find(|text| !text.is_empty())
}

pub fn read_number(row: Option<ElementRef<'_>>, key: &str) -> Option<f64> {
    parse_number(&read_text(row, key))
}

/// First key whose cell parses as a number.
pub fn read_number_any(row: Option<ElementRef<'_>>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| read_number(row, key))
}
