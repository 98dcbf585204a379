// ABOUTME: Filesystem location constants for Drafter
// ABOUTME: Resolves the application data directory and database file path

use std::env;
use std::path::PathBuf;

/// Get the path to the Drafter directory (~/.drafter)
pub fn drafter_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".drafter")
    } else {
        // Fall back to dirs crate for normal usage
        dirs::home_dir()
            .expect("Unable to get home directory")
            .join(".drafter")
    }
}

/// Get the path to the SQLite database file (~/.drafter/drafter.db)
pub fn database_file() -> PathBuf {
    drafter_dir().join("drafter.db")
}
