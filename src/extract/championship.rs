//! Super Bowl W/L tally from the title-game results table.

use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

use super::cleaner::normalize_text;
use super::fields::read_text_any;
use crate::models::ChampionshipRecord;

static SELECTOR_CAPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("caption").expect("Invalid caption selector"));
static SELECTOR_BODY_ROWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody tr").expect("Invalid tbody selector"));

static CAPTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)super bowl").expect("Invalid caption pattern"));
static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)super[_-]?bowl").expect("Invalid id pattern"));
static WIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^W\b").expect("Invalid win pattern"));
static LOSS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^L\b").expect("Invalid loss pattern"));

const RESULT_KEYS: &[&str] = &["game_result", "result"];

pub fn is_championship_table(table: &ElementRef<'_>) -> bool {
    let caption = table
        .select(&SELECTOR_CAPTION)
        .next()
        .map(|c| normalize_text(&c.text().collect::<String>()))
        .unwrap_or_default();
    let id = table.value().id().unwrap_or_default();

    CAPTION_PATTERN.is_match(&caption) || ID_PATTERN.is_match(id)
}

/// Tally the first championship table among `tables`. No table yields
/// `{None, None}`; a table with no decided games yields `{0, 0}`.
pub fn tally_championship_record<'a>(
    tables: impl IntoIterator<Item = ElementRef<'a>>,
) -> ChampionshipRecord {
    let Some(table) = tables.into_iter().find(is_championship_table) else {
        return ChampionshipRecord::default();
    };

    let mut wins = 0;
    let mut losses = 0;
    for row in table.select(&SELECTOR_BODY_ROWS) {
        let result = read_text_any(Some(row), RESULT_KEYS).unwrap_or_default();
        if WIN.is_match(&result) {
            wins += 1;
        }
        if LOSS.is_match(&result) {
            losses += 1;
        }
    }

    ChampionshipRecord {
        wins: Some(wins),
        losses: Some(losses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn tally(html: &str) -> ChampionshipRecord {
        let doc = Html::parse_document(html);
        let sel = Selector::parse("table").unwrap();
        tally_championship_record(doc.select(&sel))
    }

    #[test]
    fn test_no_table_is_null_not_zero() {
        let record = tally(r#"<table id="passing"><tbody><tr><td data-stat="result">W 1-0</td></tr></tbody></table>"#);
        assert_eq!(record, ChampionshipRecord { wins: None, losses: None });
    }

    #[test]
    fn test_empty_table_is_zero() {
        let record = tally(r#"<table id="super_bowl"><tbody><tr><td data-stat="game_result">T 10-10</td></tr></tbody></table>"#);
        assert_eq!(record, ChampionshipRecord { wins: Some(0), losses: Some(0) });
    }

    #[test]
    fn test_tally_by_caption() {
        let record = tally(
            r#"<table id="titles"><caption>Super  Bowl Results</caption><tbody>
              <tr><td data-stat="game_result">W 20-17</td></tr>
              <tr><td data-stat="game_result"></td><td data-stat="result">l 14-17</td></tr>
              <tr><td data-stat="game_result">W 32-29</td></tr>
              <tr><td data-stat="game_result">Win</td></tr>
              <tr><td data-stat="game_result">  w 34-28 (OT)</td></tr>
            </tbody></table>"#,
        );
        assert_eq!(record, ChampionshipRecord { wins: Some(3), losses: Some(1) });
    }

    #[test]
    fn test_id_variants() {
        for id in ["superbowl", "super-bowl", "SUPER_BOWL_games"] {
            let html = format!(
                r#"<table id="{id}"><tbody><tr><td data-stat="result">L 3-13</td></tr></tbody></table>"#
            );
            assert_eq!(tally(&html).losses, Some(1), "id {id}");
        }
    }
}
