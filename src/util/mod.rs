//! Utility functions for common operations.
//!
//! Shared helpers used across the crate: capped file reading, atomic
//! file writes for report output, and small text-report formatting
//! primitives.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, WrappedError};

/// Unicode blocks used for sparkline rendering, lowest to highest.
const SPARK_LEVELS: [char; 8] = ['\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}', '\u{2588}'];

/// Read a file into a string, enforcing a size cap.
///
/// A cap of `0` means unlimited. Missing files and permission problems
/// map to their dedicated error variants so the CLI can exit with
/// distinct codes.
pub fn read_file_capped(path: &Path, max_bytes: u64) -> Result<String> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => WrappedError::FileNotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => WrappedError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => WrappedError::io(format!("Failed to stat {}", path.display()), e),
    })?;

    if max_bytes > 0 && metadata.len() > max_bytes {
        return Err(WrappedError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: max_bytes,
        });
    }

    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => WrappedError::FileNotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => WrappedError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => WrappedError::io(format!("Failed to read {}", path.display()), e),
    })
}

/// Atomically write content to a file.
///
/// Writes to a temporary file in the target directory, then renames it
/// into place, so a failed write never leaves a truncated report behind.
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    let parent = path.parent().ok_or_else(|| WrappedError::IoError {
        context: format!("Cannot determine parent directory for: {}", path.display()),
        source: io::Error::new(io::ErrorKind::InvalidInput, "No parent directory"),
    })?;

    if !parent.as_os_str().is_empty() && !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            WrappedError::io(
                format!("Failed to create directory: {}", parent.display()),
                e,
            )
        })?;
    }

    // Temp file in the same directory ensures same filesystem for the rename.
    let dir = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
        WrappedError::io(
            format!("Failed to create temporary file in: {}", dir.display()),
            e,
        )
    })?;

    temp_file.write_all(content).map_err(|e| {
        WrappedError::io(
            format!("Failed to write to temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.flush().map_err(|e| {
        WrappedError::io(
            format!("Failed to flush temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.persist(path).map_err(|e| {
        WrappedError::io(
            format!("Failed to atomically write file: {}", path.display()),
            e.error,
        )
    })?;

    Ok(())
}

/// Format a count with comma separators.
#[must_use]
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result
}

/// Render counts as a compact unicode sparkline.
///
/// An all-zero (or empty) input renders as a flat baseline.
#[must_use]
pub fn sparkline(values: &[usize]) -> String {
    let max = values.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return SPARK_LEVELS[0].to_string().repeat(values.len());
    }

    values
        .iter()
        .map(|&v| {
            let level = (v * (SPARK_LEVELS.len() - 1)).div_ceil(max);
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

/// Render a horizontal bar scaled against a maximum.
#[must_use]
pub fn bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 || width == 0 {
        return String::new();
    }
    let filled = (value * width).div_ceil(max).min(width);
    "\u{2588}".repeat(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_sparkline_shape() {
        let spark = sparkline(&[0, 1, 2, 4]);
        assert_eq!(spark.chars().count(), 4);
        assert_eq!(spark.chars().next(), Some('\u{2581}'));
        assert_eq!(spark.chars().last(), Some('\u{2588}'));
    }

    #[test]
    fn test_sparkline_all_zero() {
        assert_eq!(sparkline(&[0, 0, 0]), "\u{2581}\u{2581}\u{2581}");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 10, 20), "");
        assert_eq!(bar(10, 10, 20).chars().count(), 20);
        assert!(bar(5, 10, 20).chars().count() <= 20);
        assert_eq!(bar(5, 0, 20), "");
    }

    #[test]
    fn test_atomic_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        atomic_write(&path, b"{\"ok\":true}").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\"ok\":true}");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_read_file_capped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(&path, "0123456789").unwrap();

        assert_eq!(read_file_capped(&path, 0).unwrap(), "0123456789");
        assert_eq!(read_file_capped(&path, 100).unwrap(), "0123456789");

        let err = read_file_capped(&path, 5).unwrap_err();
        assert!(matches!(err, WrappedError::FileTooLarge { size: 10, .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file_capped(&dir.path().join("nope.json"), 0).unwrap_err();
        assert!(matches!(err, WrappedError::FileNotFound { .. }));
    }
}
