use std::net::SocketAddr;

use anyhow::Context;
use axum::http::HeaderValue;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
pub const DEFAULT_LOG: &str = "roomkick=info,tower_http=info";

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub cors_origins: Vec<HeaderValue>,
}

impl Config {
    /// Reads `ROOMKICK_*` variables, after loading `.env` if there is one.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let addr = dotenv::var("ROOMKICK_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_owned());
        let origins = dotenv::var("ROOMKICK_CORS_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_owned());

        Self::parse(&addr, &origins)
    }

    pub fn parse(addr: &str, origins: &str) -> anyhow::Result<Self> {
        let addr = addr
            .parse()
            .with_context(|| format!("invalid listen address {addr:?}"))?;

        let cors_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("invalid CORS origin {origin:?}"))
            })
            .collect::<anyhow::Result<_>>()?;

        Ok(Self { addr, cors_origins })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_origins: DEFAULT_CORS_ORIGINS
                .split(',')
                .map(HeaderValue::from_static)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let config = Config::parse(DEFAULT_ADDR, DEFAULT_CORS_ORIGINS).unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.cors_origins, Config::default().cors_origins);
    }

    #[test]
    fn trims_and_skips_blank_origins() {
        let config = Config::parse("127.0.0.1:3000", " http://a.test , ,http://b.test").unwrap();
        assert_eq!(config.cors_origins, ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn rejects_bad_addr() {
        assert!(Config::parse("localhost", DEFAULT_CORS_ORIGINS).is_err());
    }

    #[test]
    fn rejects_bad_origin() {
        assert!(Config::parse(DEFAULT_ADDR, "http://ok.test,bad\norigin").is_err());
    }
}
