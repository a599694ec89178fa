use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

// ── Player profile ────────────────────────────────────────────────────────────

/// One extracted player page. Every leaf is optional: a field is `None`
/// whenever its table, row, cell or bio label was not on the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub player_id: Option<String>,
    pub player_url: Option<String>,
    pub player_name: Option<String>,
    pub position: Option<String>,
    pub throws: Option<String>,
    pub games_played: Option<f64>,
    pub career_record: Option<String>,
    pub post_season_record: Option<String>,
    pub super_bowl_record: ChampionshipRecord,
    pub bio: Bio,
    pub passing_stats: PassingStats,
    pub postseason_passing_stats: PostseasonPassingStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bio {
    pub born: Option<String>,
    pub height_weight: Option<String>,
    pub college: Option<String>,
}

/// W/L tally over title-game appearances. Both `None` means no
/// championship table exists on the page, which differs from `Some(0)`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChampionshipRecord {
    pub wins: Option<u32>,
    pub losses: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PassingStats {
    pub career_passing_yards: Option<f64>,
    pub passing_attempts: Option<f64>,
    pub passing_completions: Option<f64>,
    pub completion_pct: Option<f64>,
    pub passing_touchdowns: Option<f64>,
    pub interceptions: Option<f64>,
    pub yards_per_attempt: Option<f64>,
    pub adjusted_yards_per_attempt: Option<f64>,
    pub passer_rating: Option<f64>,
    pub qbr: Option<f64>,
    pub first_downs: Option<f64>,
    pub sacks: Option<f64>,
    pub sack_yards: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostseasonPassingStats {
    pub games_played: Option<f64>,
    pub passing_yards: Option<f64>,
    pub passing_touchdowns: Option<f64>,
    pub interceptions: Option<f64>,
    pub passer_rating: Option<f64>,
}

// ── Page reference ────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerRefError {
    #[error("empty player reference")]
    Empty,

    #[error("invalid player id {0:?}")]
    InvalidId(String),
}

/// A player page on the site: `/players/<letter>/<id>.htm`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerPage {
    pub letter: char,
    pub id: String,
}

impl PlayerPage {
    /// Accepts a full URL, `/players/B/BradTo00.htm`, `B/BradTo00.htm` or a
    /// bare `BradTo00`.
    pub fn parse(input: &str) -> Result<Self, PlayerRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(PlayerRefError::Empty);
        }

        let path = match Url::parse(input) {
            Ok(url) => url.path().to_string(),
            Err(_) => input.to_string(),
        };

        let mut segments = path.rsplit('/').filter(|s| !s.is_empty());
        let last = segments.next().ok_or(PlayerRefError::Empty)?;
        let id = last
            .strip_suffix(".html")
            .or_else(|| last.strip_suffix(".htm"))
            .unwrap_or(last);

        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PlayerRefError::InvalidId(id.to_string()));
        }

        let letter = match segments.next() {
            Some(seg) if seg.len() == 1 && seg.chars().all(|c| c.is_ascii_alphabetic()) => {
                seg.chars().next()
            }
            _ => id.chars().next(),
        }
        .map(|c| c.to_ascii_uppercase())
        .ok_or_else(|| PlayerRefError::InvalidId(id.to_string()))?;

        Ok(Self {
            letter,
            id: id.to_string(),
        })
    }

    /// Site-relative path, e.g. `/players/B/BradTo00.htm`.
    pub fn path(&self) -> String {
        format!("/players/{}/{}.htm", self.letter, self.id)
    }

    pub fn canonical_url(&self, site_root: &Url) -> Result<Url, url::ParseError> {
        site_root.join(&self.path())
    }
}

impl std::fmt::Display for PlayerPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
