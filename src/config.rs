use clap::{Parser, ValueEnum};
use std::time::Duration;

use crate::error::GatewayError;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1/chat/completions";

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "completion-gateway")]
#[command(about = "Rate-limited streaming proxy for a chat-completion API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Address to bind
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind: String,

    // Upstream chat-completion endpoint, every admitted request is POSTed here
    #[arg(short, long, env = "UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    // Bearer credential for the upstream
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    // Rate limit max requests per window per client
    #[arg(long, env = "RATE_LIMIT", default_value_t = 30)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, env = "RATE_WINDOW", default_value_t = 60)]
    pub rate_window: u64,

    // Seconds between sweeps of expired window entries
    #[arg(long, env = "SWEEP_INTERVAL", default_value_t = 30)]
    pub sweep_interval: u64,

    // Durable shared store, e.g. "redis://127.0.0.1:6379"
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,

    // Namespace for durable marker keys
    #[arg(long, env = "MARKER_PREFIX", default_value = "rl")]
    pub marker_prefix: String,

    // Capacity of the background marker queue
    #[arg(long, env = "MARKER_QUEUE", default_value_t = 1024)]
    pub marker_queue: usize,

    // Upstream connect timeout in seconds
    #[arg(long, env = "CONNECT_TIMEOUT", default_value_t = 10)]
    pub connect_timeout: u64,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Args {
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.rate_limit == 0 {
            return Err(GatewayError::Config("rate limit must be at least 1".to_string()));
        }
        if self.rate_window == 0 {
            return Err(GatewayError::Config("rate window must be at least 1 second".to_string()));
        }
        if self.sweep_interval == 0 {
            return Err(GatewayError::Config("sweep interval must be at least 1 second".to_string()));
        }
        if self.marker_queue == 0 {
            return Err(GatewayError::Config("marker queue capacity must be at least 1".to_string()));
        }
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::Config("api key must not be empty".to_string()));
        }
        reqwest::Url::parse(&self.upstream_url)
            .map_err(|e| GatewayError::Config(format!("invalid upstream url {}: {}", self.upstream_url, e)))?;
        Ok(())
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
