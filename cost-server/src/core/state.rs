use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use cost_engine::RateTables;

use crate::core::{Config, Result, ServerError};

/// Shared server state
///
/// Cheap to clone: the rate tables are loaded once and shared read-only
/// across all requests.
#[derive(Debug, Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub tables: Arc<RateTables>,
    pub started_at: Instant,
}

impl ServerState {
    pub fn new(config: Config, tables: RateTables) -> Self {
        Self {
            config: Arc::new(config),
            tables: Arc::new(tables),
            started_at: Instant::now(),
        }
    }

    /// Validate the configuration and load the rate tables it points at
    pub fn initialize(config: &Config) -> Result<Self> {
        config.validate().map_err(ServerError::Config)?;

        let tables = match &config.rate_tables_path {
            Some(path) => load_rate_tables(path)?,
            None => {
                tracing::info!("Using built-in rate tables");
                RateTables::builtin()
            }
        };

        Ok(Self::new(config.clone(), tables))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Read and validate a rate tables JSON file
pub fn load_rate_tables(path: &Path) -> Result<RateTables> {
    let json = std::fs::read_to_string(path).map_err(|source| ServerError::RateTablesRead {
        path: path.to_path_buf(),
        source,
    })?;
    let tables =
        RateTables::from_json_str(&json).map_err(|source| ServerError::RateTablesInvalid {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        routes = tables.routes.len(),
        lines = tables.lines.len(),
        "Rate tables loaded"
    );
    Ok(tables)
}
