use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::models::{NormalizedGame, Possession, StatusLine, TeamLine};

pub const STATUS_FINAL: &str = "STATUS_FINAL";
pub const STATUS_SCHEDULED: &str = "STATUS_SCHEDULED";

/// Why a single upstream event was left out of the output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedEvent {
    #[error("event has no competitions")]
    NoCompetition,
    #[error("competition has no competitors list")]
    NoCompetitors,
    #[error("no {0} competitor")]
    MissingSide(&'static str),
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("{side} score is not numeric: {value}")]
    BadScore { side: &'static str, value: String },
}

/// Normalize a whole upstream scoreboard body. A missing or non-array
/// `events` field means zero games.
pub fn normalize_payload(payload: &Value) -> Vec<NormalizedGame> {
    match payload["events"].as_array() {
        Some(events) => normalize(events),
        None => Vec::new(),
    }
}

/// Normalize events in input order, skipping (and logging) malformed ones.
pub fn normalize(events: &[Value]) -> Vec<NormalizedGame> {
    events
        .iter()
        .filter_map(|ev| match parse_event(ev) {
            Ok(game) => Some(game),
            Err(e) => {
                let id = id_string(&ev["id"]).unwrap_or_else(|| "?".to_string());
                warn!("Error parsing game {}: {}", id, e);
                None
            }
        })
        .collect()
}

pub fn parse_event(event: &Value) -> Result<NormalizedGame, MalformedEvent> {
    let competition = event["competitions"]
        .as_array()
        .and_then(|c| c.first())
        .ok_or(MalformedEvent::NoCompetition)?;

    let competitors = competition["competitors"]
        .as_array()
        .ok_or(MalformedEvent::NoCompetitors)?;
    let home = find_side(competitors, "home")?;
    let away = find_side(competitors, "away")?;

    let status_type = &competition["status"]["type"];
    let state = required_str(status_type, "state", "status.type.state")?;
    let status_name = required_str(status_type, "name", "status.type.name")?;
    let detail = required_str(status_type, "shortDetail", "status.type.shortDetail")?;

    let live = is_live(state);
    let possession = if live {
        resolve_possession(&competition["situation"], home, away)
    } else {
        Possession::Unknown
    };

    Ok(NormalizedGame {
        away: team_line(away, "away")?,
        home: team_line(home, "home")?,
        status: StatusLine {
            state: state.to_string(),
            detail: detail.to_string(),
        },
        live,
        is_final: is_final(state, status_name),
        upcoming: is_upcoming(state, status_name),
        possession,
    })
}

pub fn is_live(state: &str) -> bool {
    state == "in"
}

/// Either signal alone marks a game final; upstream sometimes disagrees with itself.
pub fn is_final(state: &str, status_name: &str) -> bool {
    state == "post" || status_name == STATUS_FINAL
}

pub fn is_upcoming(state: &str, status_name: &str) -> bool {
    state == "pre" || status_name == STATUS_SCHEDULED
}

fn find_side<'a>(competitors: &'a [Value], side: &'static str) -> Result<&'a Value, MalformedEvent> {
    competitors
        .iter()
        .find(|c| c["homeAway"].as_str() == Some(side))
        .ok_or(MalformedEvent::MissingSide(side))
}

fn required_str<'a>(
    obj: &'a Value,
    key: &str,
    path: &'static str,
) -> Result<&'a str, MalformedEvent> {
    obj[key].as_str().ok_or(MalformedEvent::MissingField(path))
}

fn team_line(competitor: &Value, side: &'static str) -> Result<TeamLine, MalformedEvent> {
    let abbr = required_str(&competitor["team"], "abbreviation", "team.abbreviation")?;
    Ok(TeamLine {
        abbr: abbr.to_string(),
        score: parse_score(&competitor["score"], side)?,
    })
}

/// Scores arrive as integers or numeric strings (sometimes "14.0"); absent means 0.
fn parse_score(raw: &Value, side: &'static str) -> Result<i64, MalformedEvent> {
    let bad = || MalformedEvent::BadScore {
        side,
        value: raw.to_string(),
    };
    match raw {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(whole_number))
            .ok_or_else(bad),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
                .ok_or_else(bad)
        }
        _ => Err(bad()),
    }
}

fn whole_number(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Ids show up as strings or bare integers depending on the feed.
fn id_string(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn resolve_possession(situation: &Value, home: &Value, away: &Value) -> Possession {
    let Some(holder) = id_string(&situation["possession"]) else {
        return Possession::Unknown;
    };
    if id_string(&home["id"]).as_deref() == Some(holder.as_str()) {
        Possession::Home
    } else if id_string(&away["id"]).as_deref() == Some(holder.as_str()) {
        Possession::Away
    } else {
        Possession::Unknown
    }
}
