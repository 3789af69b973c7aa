//! Utility functions for string truncation and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - String truncation for log lines and digest summaries
//! - File system validation for the output directory

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Byte index of the `max_chars`-th character, or `None` when `s` is not longer than that.
fn char_boundary(s: &str, max_chars: usize) -> Option<usize> {
    s.char_indices().nth(max_chars).map(|(i, _)| i)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut after `max` characters and get an ellipsis and a
/// byte count of what was dropped.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match char_boundary(s, max) {
        None => s.to_string(),
        Some(cut) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Cut a summary to at most `max` characters, ending in `...` when anything was dropped.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_summary("short", 300), "short");
/// assert_eq!(truncate_summary("abcdefgh", 6), "abc...");
/// ```
pub fn truncate_summary(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let cut = char_boundary(s, keep).unwrap_or(s.len());
    format!("{}...", &s[..cut])
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("Götzis und Höchst", 3);
        assert!(result.starts_with("Göt…"));
    }

    #[test]
    fn test_truncate_summary() {
        assert_eq!(truncate_summary("short", 300), "short");
        assert_eq!(truncate_summary("abcdefgh", 8), "abcdefgh");
        assert_eq!(truncate_summary("abcdefgh", 6), "abc...");
        assert_eq!(truncate_summary("äöüäöüäöü", 6), "äöü...");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dir() {
        let dir = std::env::temp_dir().join(format!("vorarlberg_digest_utils_{}", std::process::id()));
        let path = dir.to_string_lossy().to_string();
        ensure_writable_dir(&path).await.unwrap();
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
