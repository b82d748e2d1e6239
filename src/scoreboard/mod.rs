pub mod espn;
pub mod models;
pub mod normalize;
pub mod provider;

pub use espn::{EspnScoreboard, FetchError};
pub use models::ScoresResponse;
pub use normalize::normalize_payload;
pub use provider::ScoreboardSource;
