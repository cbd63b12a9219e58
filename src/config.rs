use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "HealthJournal";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable that relocates the data directory (tests, portable installs).
pub const DATA_DIR_ENV: &str = "HEALTH_JOURNAL_DATA_DIR";

/// Get the application data directory.
/// `$HEALTH_JOURNAL_DATA_DIR` when set, otherwise `~/HealthJournal/`.
pub fn app_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME)
}

/// Get the journal database path
pub fn database_path() -> PathBuf {
    app_data_dir().join("journal.db")
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "health_journal=debug,info"
    } else {
        "health_journal=info,warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_ends_with_app_name_by_default() {
        if std::env::var_os(DATA_DIR_ENV).is_some() {
            return;
        }
        let dir = app_data_dir();
        assert!(dir.ends_with(APP_NAME));
    }

    #[test]
    fn database_under_app_data() {
        let db = database_path();
        let app = app_data_dir();
        assert!(db.starts_with(app));
        assert!(db.ends_with("journal.db"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_filter_targets_crate() {
        assert!(default_log_filter().starts_with("health_journal="));
    }
}
