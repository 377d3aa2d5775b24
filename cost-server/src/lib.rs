//! Cost Server - HTTP boundary of the import and freight cost engines
//!
//! # Module structure
//!
//! ```text
//! cost-server/src/
//! ├── core/          # configuration, state, lifecycle errors
//! ├── api/           # HTTP routes and handlers
//! ├── routes/        # router assembly and tower middleware
//! ├── middleware/    # request logging
//! └── utils/         # logger, JSON extractor
//! ```
//!
//! The calculation itself lives in `cost_engine`; handlers only fill in
//! configured defaults, call the engine and wrap the outcome in the
//! `{ success, result, error }` envelope.

pub mod api;
pub mod core;
pub mod middleware;
pub mod routes;
pub mod utils;

pub use crate::core::{Config, Server, ServerError, ServerState};
pub use routes::build_app;
pub use utils::logger::init_logger_with_file;

/// Load `.env` into the process environment when present
pub fn setup_environment() {
    if let Ok(path) = dotenv::dotenv() {
        // Logger is not up yet
        eprintln!("Loaded environment from {}", path.display());
    }
}

pub fn print_banner() {
    println!(
        r#"
   ______           __     _____
  / ____/___  _____/ /_   / ___/___  ______   _____  _____
 / /   / __ \/ ___/ __/   \__ \/ _ \/ ___/ | / / _ \/ ___/
/ /___/ /_/ (__  ) /_    ___/ /  __/ /   | |/ /  __/ /
\____/\____/____/\__/   /____/\___/_/    |___/\___/_/
    "#
    );
}
