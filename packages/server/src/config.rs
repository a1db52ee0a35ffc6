//! Command-line and environment configuration for the server binary.

use clap::Parser;

use crate::domain::SignOutPolicy;

/// Room-based WebSocket chat relay
#[derive(Debug, Clone, Parser)]
#[command(name = "hiroba-server", version, about)]
pub struct ServerConfig {
    /// IP address to listen on
    #[arg(long, env = "HIROBA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "HIROBA_PORT", default_value_t = 9001)]
    pub port: u16,

    /// What to do with a client's registration after SIGN_OUT (retain | remove)
    #[arg(long, env = "HIROBA_SIGN_OUT_POLICY", default_value_t = SignOutPolicy::Retain)]
    pub sign_out_policy: SignOutPolicy,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "HIROBA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9001,
            sign_out_policy: SignOutPolicy::default(),
            log_level: "info".to_string(),
        }
    }
}
