use async_trait::async_trait;
use serde_json::Value;

use super::espn::FetchError;

/// Anything that can hand back a raw upstream scoreboard body.
#[async_trait]
pub trait ScoreboardSource: Send + Sync {
    /// Fetch the current scoreboard as untyped JSON.
    async fn fetch_scoreboard(&self) -> Result<Value, FetchError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
