//! JSON / CSV writers for extracted profiles.

use crate::models::PlayerProfile;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

pub fn to_json(profile: &PlayerProfile, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(profile)
    } else {
        serde_json::to_string(profile)
    };
    json.context("Failed to serialize profile")
}

pub fn write_profiles<W: Write>(out: W, profiles: &[PlayerProfile], format: Format) -> Result<()> {
    match format {
        Format::Json => write_json(out, profiles),
        Format::Csv => write_csv(out, profiles),
    }
}

fn write_json<W: Write>(mut out: W, profiles: &[PlayerProfile]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, profiles).context("Failed to write JSON")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn write_csv<W: Write>(out: W, profiles: &[PlayerProfile]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for profile in profiles {
        writer
            .serialize(ProfileRow::from(profile))
            .with_context(|| format!("Failed to write CSV row for {:?}", profile.player_id))?;
    }
    writer.flush()?;
    Ok(())
}

// ── Flat CSV row ──────────────────────────────────────────────────────────────

/// One CSV line: nested records flattened with prefixed columns.
#[derive(Debug, Serialize)]
struct ProfileRow<'a> {
    player_id: Option<&'a str>,
    player_url: Option<&'a str>,
    player_name: Option<&'a str>,
    position: Option<&'a str>,
    throws: Option<&'a str>,
    born: Option<&'a str>,
    height_weight: Option<&'a str>,
    college: Option<&'a str>,
    games_played: Option<f64>,
    career_record: Option<&'a str>,
    post_season_record: Option<&'a str>,
    super_bowl_wins: Option<u32>,
    super_bowl_losses: Option<u32>,
    pass_yds: Option<f64>,
    pass_att: Option<f64>,
    pass_cmp: Option<f64>,
    pass_cmp_pct: Option<f64>,
    pass_td: Option<f64>,
    pass_int: Option<f64>,
    pass_yds_per_att: Option<f64>,
    pass_adj_yds_per_att: Option<f64>,
    pass_rating: Option<f64>,
    qbr: Option<f64>,
    pass_first_down: Option<f64>,
    pass_sacked: Option<f64>,
    pass_sacked_yds: Option<f64>,
    playoff_g: Option<f64>,
    playoff_pass_yds: Option<f64>,
    playoff_pass_td: Option<f64>,
    playoff_pass_int: Option<f64>,
    playoff_pass_rating: Option<f64>,
}

impl<'a> From<&'a PlayerProfile> for ProfileRow<'a> {
    fn from(p: &'a PlayerProfile) -> Self {
        let pass = &p.passing_stats;
        let post = &p.postseason_passing_stats;
        Self {
            player_id: p.player_id.as_deref(),
            player_url: p.player_url.as_deref(),
            player_name: p.player_name.as_deref(),
            position: p.position.as_deref(),
            throws: p.throws.as_deref(),
            born: p.bio.born.as_deref(),
            height_weight: p.bio.height_weight.as_deref(),
            college: p.bio.college.as_deref(),
            games_played: p.games_played,
            career_record: p.career_record.as_deref(),
            post_season_record: p.post_season_record.as_deref(),
            super_bowl_wins: p.super_bowl_record.wins,
            super_bowl_losses: p.super_bowl_record.losses,
            pass_yds: pass.career_passing_yards,
            pass_att: pass.passing_attempts,
            pass_cmp: pass.passing_completions,
            pass_cmp_pct: pass.completion_pct,
            pass_td: pass.passing_touchdowns,
            pass_int: pass.interceptions,
            pass_yds_per_att: pass.yards_per_attempt,
            pass_adj_yds_per_att: pass.adjusted_yards_per_attempt,
            pass_rating: pass.passer_rating,
            qbr: pass.qbr,
            pass_first_down: pass.first_downs,
            pass_sacked: pass.sacks,
            pass_sacked_yds: pass.sack_yards,
            playoff_g: post.games_played,
            playoff_pass_yds: post.passing_yards,
            playoff_pass_td: post.passing_touchdowns,
            playoff_pass_int: post.interceptions,
            playoff_pass_rating: post.passer_rating,
        }
    }
}
