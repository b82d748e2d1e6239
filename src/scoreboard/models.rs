use serde::{Serialize, Serializer};

/// One side of a game as sent to the display client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamLine {
    pub abbr: String,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    /// "pre" | "in" | "post"
    pub state: String,
    /// Short human-readable status, e.g. "Final" or "3rd 4:12"
    pub detail: String,
}

/// Which side has the ball. Serialized as "home", "away" or "".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Possession {
    Home,
    Away,
    #[default]
    Unknown,
}

impl Possession {
    pub fn as_str(&self) -> &'static str {
        match self {
            Possession::Home => "home",
            Possession::Away => "away",
            Possession::Unknown => "",
        }
    }
}

impl Serialize for Possession {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Simplified game record served on `/nfl/scores`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedGame {
    pub away: TeamLine,
    pub home: TeamLine,
    pub status: StatusLine,
    pub live: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    pub upcoming: bool,
    pub possession: Possession,
}

/// Response body of `/nfl/scores`
#[derive(Debug, Clone, Serialize)]
pub struct ScoresResponse {
    pub count: usize,
    pub games: Vec<NormalizedGame>,
}

impl From<Vec<NormalizedGame>> for ScoresResponse {
    fn from(games: Vec<NormalizedGame>) -> Self {
        ScoresResponse {
            count: games.len(),
            games,
        }
    }
}
