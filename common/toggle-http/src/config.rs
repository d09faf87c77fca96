use std::net::SocketAddr;

use clap::Parser;

/// Liveness probe path every service mounts.
pub const HEALTH_ROUTE: &str = "/healthz";

/// Runtime settings for an HTTP service. Every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(about = "on/off state API")]
pub struct ServiceConfig {
    /// Socket address the HTTP listener binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:7071")]
    pub bind_addr: SocketAddr,

    /// Path the state route is mounted on
    #[arg(long, env = "STATE_ROUTE", default_value = "/state", value_parser = parse_route)]
    pub state_route: String,
}

/// Route paths must be absolute and literal: no captures or wildcards.
fn parse_route(raw: &str) -> Result<String, String> {
    if !raw.starts_with('/') {
        return Err(format!("route `{raw}` must start with '/'"));
    }
    if raw.contains([':', '*', '{', '}']) {
        return Err(format!("route `{raw}` must be a literal path"));
    }
    if raw == HEALTH_ROUTE {
        return Err(format!("route `{raw}` is reserved for the liveness probe"));
    }
    Ok(raw.to_string())
}
