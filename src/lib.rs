pub mod config;
pub mod models;
pub mod db;
pub mod journal; // daily records, stats, profile, export
pub mod calendar;
pub mod questionnaire;
pub mod diagnosis; // rule engine behind questionnaire submit

use tracing_subscriber::EnvFilter;

use db::{DatabaseError, SqliteStore};

/// Installs the global fmt subscriber. `RUST_LOG` wins over the default filter.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}

/// Opens (and migrates) the store at [`config::database_path`].
pub fn open_default_store() -> Result<SqliteStore, DatabaseError> {
    SqliteStore::open(&config::database_path())
}
