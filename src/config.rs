use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Default upstream scoreboard (ESPN public site API, no key required)
pub const DEFAULT_UPSTREAM_URL: &str =
    "http://site.api.espn.com/apis/site/v2/sports/football/nfl/scoreboard";

/// NFL scoreboard relay for embedded display clients
#[derive(Parser, Debug, Clone)]
#[command(name = "scoreboard-relay", version, about)]
pub struct Config {
    /// Interface to bind the HTTP server on
    #[arg(long, env = "RELAY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server on
    #[arg(long, env = "RELAY_PORT", default_value = "5001")]
    pub port: u16,

    /// Debug mode: raises the default log level to `debug`
    #[arg(long, env = "RELAY_DEBUG", default_value = "false")]
    pub debug: bool,

    /// Upstream scoreboard URL
    #[arg(long, env = "UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value = "10")]
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.upstream_timeout_secs == 0 {
            anyhow::bail!("upstream_timeout_secs must be positive");
        }
        let url = url::Url::parse(&self.upstream_url)
            .map_err(|e| anyhow::anyhow!("invalid upstream_url '{}': {}", self.upstream_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("upstream_url must be http or https, got '{}'", url.scheme());
        }
        self.listen_addr()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address {}:{}: {}", self.host, self.port, e))
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
