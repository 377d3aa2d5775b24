use std::path::PathBuf;

use cost_engine::CalcError;
use thiserror::Error;

/// Startup and serving errors
///
/// Request-level failures never end up here; handlers answer them with
/// [`shared::error::AppError`].
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot read rate tables from {path}: {source}")]
    RateTablesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rate tables in {path} rejected: {source}")]
    RateTablesInvalid {
        path: PathBuf,
        #[source]
        source: CalcError,
    },

    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Result alias for server lifecycle operations
pub type Result<T> = std::result::Result<T, ServerError>;
