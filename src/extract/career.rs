//! Aggregate ("Career") row lookup inside a multi-season stats table.

use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

use super::cleaner::normalize_text;

static SELECTOR_FOOT_ROWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tfoot tr").expect("Invalid tfoot selector"));
static SELECTOR_BODY_ROWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody tr").expect("Invalid tbody selector"));
static SELECTOR_ROWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("Invalid tr selector"));
static SELECTOR_YEAR_CELL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"th[data-stat="year_id"], th[data-stat="season"], th[data-stat="year"]"#)
        .expect("Invalid year cell selector")
});

static CAREER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)career").expect("Invalid career pattern"));
static YEARS_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+\s*yrs?").expect("Invalid years pattern"));

type RowRule = fn(&ElementRef<'_>) -> bool;

/// Checked in order; a row qualifies as soon as one rule accepts it.
/// The whole-row text rule is loose: any cell saying "career" matches.
const CAREER_ROW_RULES: &[RowRule] = &[
    year_cell_says_career,
    year_cell_counts_years,
    row_text_says_career,
];

/// Footer rows first, then body rows, then every row in the table.
pub fn find_career_row<'a>(table: ElementRef<'a>) -> Option<ElementRef<'a>> {
    [&*SELECTOR_FOOT_ROWS, &*SELECTOR_BODY_ROWS, &*SELECTOR_ROWS]
        .into_iter()
        .flat_map(|sel| table.select(sel))
        .find(is_career_row)
}

pub fn is_career_row(row: &ElementRef<'_>) -> bool {
    CAREER_ROW_RULES.iter().any(|rule| rule(row))
}

fn year_cell_text(row: &ElementRef<'_>) -> String {
    row.select(&SELECTOR_YEAR_CELL)
        .next()
        .map(|cell| normalize_text(&cell.text().collect::<String>()))
        .unwrap_or_default()
}

fn year_cell_says_career(row: &ElementRef<'_>) -> bool {
    CAREER.is_match(&year_cell_text(row))
}

fn year_cell_counts_years(row: &ElementRef<'_>) -> bool {
    YEARS_SPAN.is_match(&year_cell_text(row))
}

fn row_text_says_career(row: &ElementRef<'_>) -> bool {
    CAREER.is_match(&normalize_text(&row.text().collect::<String>()))
}
