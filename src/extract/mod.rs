//! Player page → `PlayerProfile`.
//!
//! Pure and synchronous: one call parses its own document, recovers the
//! comment-hidden tables, reads what it can and leaves the rest `None`.

pub mod bio;
pub mod career;
pub mod championship;
pub mod cleaner;
pub mod comments;
pub mod fields;
pub mod tables;

use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

use crate::models::{Bio, PassingStats, PlayerPage, PlayerProfile, PostseasonPassingStats};

use self::bio::{BioBlock, player_name};
use self::career::find_career_row;
use self::championship::tally_championship_record;
use self::comments::CommentTables;
use self::fields::{read_number, read_number_any, read_text_any};
use self::tables::{TableRule, TableSet};

const GAMES_KEYS: &[&str] = &["g", "games"];
const RECORD_KEYS: &[&str] = &["qb_rec", "record", "qb_record"];

const CAREER_PASSING_TABLE: TableRule = TableRule::ExactId("passing");

/// Build the profile for `page` from its raw HTML.
pub fn build_profile(html: &str, page: &PlayerPage, site_root: &Url) -> PlayerProfile {
    let doc = Html::parse_document(html);
    let comments = CommentTables::recover(&doc);
    let tables = TableSet::new(&doc, &comments);

    let bio = BioBlock::extract(&doc);

    let career = tables
        .resolve(CAREER_PASSING_TABLE)
        .and_then(find_career_row);
    let playoffs = tables.playoff_passing().and_then(find_career_row);
    debug!(
        player = %page,
        labels = bio.map.len(),
        career_row = career.is_some(),
        playoff_row = playoffs.is_some(),
        "extracted page sections"
    );

    PlayerProfile {
        player_id: Some(page.id.clone()),
        player_url: page.canonical_url(site_root).ok().map(String::from),
        player_name: player_name(&doc),
        position: bio.field("Position"),
        throws: bio.field("Throws"),
        games_played: read_number_any(career, GAMES_KEYS),
        career_record: read_text_any(career, RECORD_KEYS),
        post_season_record: read_text_any(playoffs, RECORD_KEYS),
        super_bowl_record: tally_championship_record(tables.all()),
        bio: Bio {
            born: bio.field("Born"),
            height_weight: bio.height_weight(),
            college: bio.field("College"),
        },
        passing_stats: passing_stats(career),
        postseason_passing_stats: postseason_passing_stats(playoffs),
    }
}

fn passing_stats(row: Option<ElementRef<'_>>) -> PassingStats {
    PassingStats {
        career_passing_yards: read_number(row, "pass_yds"),
        passing_attempts: read_number(row, "pass_att"),
        passing_completions: read_number(row, "pass_cmp"),
        completion_pct: read_number(row, "pass_cmp_pct"),
        passing_touchdowns: read_number(row, "pass_td"),
        interceptions: read_number(row, "pass_int"),
        yards_per_attempt: read_number(row, "pass_yds_per_att"),
        adjusted_yards_per_attempt: read_number(row, "pass_adj_yds_per_att"),
        passer_rating: read_number(row, "pass_rating"),
        qbr: read_number(row, "qbr"),
        first_downs: read_number(row, "pass_first_down"),
        sacks: read_number(row, "pass_sacked"),
        sack_yards: read_number(row, "pass_sacked_yds"),
    }
}

fn postseason_passing_stats(row: Option<ElementRef<'_>>) -> PostseasonPassingStats {
    PostseasonPassingStats {
        games_played: read_number_any(row, GAMES_KEYS),
        passing_yards: read_number(row, "pass_yds"),
        passing_touchdowns: read_number(row, "pass_td"),
        interceptions: read_number(row, "pass_int"),
        passer_rating: read_number(row, "pass_rating"),
    }
}
