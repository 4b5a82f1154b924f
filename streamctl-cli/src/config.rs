//! Environment loading
//!
//! `.env` files are looked up in the current directory and its two parents;
//! the first one found is loaded. dotenvy never overwrites variables that
//! are already set, so the real environment always wins.
//!
//! This runs before argument parsing (flags fall back to env vars) and so
//! before tracing is up; the caller logs the result.

use std::path::{Path, PathBuf};

const SEARCH_PATHS: &[&str] = &[".env", "../.env", "../../.env"];

/// Load the first `.env` found, returning its path.
///
/// A missing or unreadable file is not an error; configuration can come
/// entirely from the environment.
pub fn load_dotenv() -> Option<PathBuf> {
    load_first(SEARCH_PATHS.iter().map(Path::new))
}

fn load_first<'a>(candidates: impl IntoIterator<Item = &'a Path>) -> Option<PathBuf> {
    candidates
        .into_iter()
        .find(|path| dotenvy::from_path(path).is_ok())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_are_skipped() {
        let loaded = load_first([
            Path::new("/nonexistent/streamctl/.env"),
            Path::new("/nonexistent/other/.env"),
        ]);
        assert!(loaded.is_none());
    }
}
