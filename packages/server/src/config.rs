//! Command-line and environment configuration for the server binary.

use clap::Parser;

/// Roomcast server options. Every flag can also be set through a
/// `ROOMCAST_*` environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "roomcast-server", version, about = "Room membership and broadcast server")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "ROOMCAST_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "ROOMCAST_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "ROOMCAST_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,

    /// Remove a connection's membership record when its socket closes
    /// without an explicit leave
    #[arg(long, env = "ROOMCAST_EVICT_ON_DISCONNECT")]
    pub evict_on_disconnect: bool,
}

impl ServerConfig {
    /// `host:port` string passed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "debug".to_string(),
            evict_on_disconnect: false,
        }
    }
}
