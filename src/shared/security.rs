use crate::shared::error::AnalysisError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum SBOM file size accepted by the reader (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that `path` exists, is a regular file and is not a symbolic link.
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
/// Returns the file size on success so callers can apply [`validate_file_size`]
/// without a second metadata call.
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| AnalysisError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(AnalysisError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Pass the path of the real file instead of a symbolic link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(AnalysisError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", path.display()),
        }
        .into());
    }

    Ok(metadata.len())
}

/// Validates that an existing output path is not a symbolic link.
///
/// A missing path is accepted: the writer will create it.
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return Ok(());
    };

    if metadata.is_symlink() {
        return Err(AnalysisError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} operations on symbolic links are not allowed", operation),
            hint: "Choose an output path that is not a symbolic link".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(AnalysisError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes",
                file_size, max_size
            ),
            hint: "Split the SBOM or analyze a smaller document".to_string(),
        }
        .into());
    }
    Ok(())
}
