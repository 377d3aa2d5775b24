use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first when present):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_HOST | 0.0.0.0 | bind address |
/// | HTTP_PORT | 3000 | bind port |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | tracing filter directive |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (unset) | daily rolling log file directory |
/// | RATE_TABLES_PATH | (unset) | JSON file replacing the built-in rate tables |
/// | DEFAULT_USD_TO_CNY | 7.20 | rate used when a request omits it |
/// | DEFAULT_CNY_TO_BRL | 0.78 | rate used when a request omits it |
/// | REQUEST_TIMEOUT_MS | 10000 | per-request timeout |
/// | MAX_BODY_BYTES | 65536 | request body limit |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 RATE_TABLES_PATH=/etc/cost/rates.json cargo run -p cost-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_host: IpAddr,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<PathBuf>,
    /// Rate tables file, built-in tables when unset
    pub rate_tables_path: Option<PathBuf>,
    /// CNY per USD when a request carries no rate
    pub default_usd_to_cny: f64,
    /// BRL per CNY when a request carries no rate
    pub default_cny_to_brl: f64,
    pub request_timeout_ms: u64,
    pub max_body_bytes: usize,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            http_host: env_or("HTTP_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            http_port: env_or("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_or("LOG_JSON", false),
            log_dir: env_path("LOG_DIR"),
            rate_tables_path: env_path("RATE_TABLES_PATH"),
            default_usd_to_cny: env_or("DEFAULT_USD_TO_CNY", 7.20),
            default_cny_to_brl: env_or("DEFAULT_CNY_TO_BRL", 0.78),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 10_000),
            max_body_bytes: env_or("MAX_BODY_BYTES", 64 * 1024),
        }
    }

    /// Reject configuration the server cannot start with
    pub fn validate(&self) -> Result<(), String> {
        for (name, rate) in [
            ("DEFAULT_USD_TO_CNY", self.default_usd_to_cny),
            ("DEFAULT_CNY_TO_BRL", self.default_cny_to_brl),
        ] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(format!("{} must be a positive number, got {}", name, rate));
            }
        }
        if self.request_timeout_ms == 0 {
            return Err("REQUEST_TIMEOUT_MS must be > 0".into());
        }
        if self.max_body_bytes == 0 {
            return Err("MAX_BODY_BYTES must be > 0".into());
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http_host, self.http_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
