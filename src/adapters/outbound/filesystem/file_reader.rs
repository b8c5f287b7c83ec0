use crate::ports::outbound::SbomReader;
use crate::shared::error::AnalysisError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading SBOM documents from the file system
///
/// This adapter implements the SbomReader port. Files are only read after
/// the security checks pass:
/// - Reject symbolic links
/// - Validate the path is a regular file
/// - Check the size limit
pub struct FileSystemReader {
    max_file_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Creates a reader with a custom size limit in bytes
    pub fn with_max_file_size(max_file_size: u64) -> Self {
        Self { max_file_size }
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomReader for FileSystemReader {
    fn read_sbom(&self, path: &Path) -> Result<String> {
        if !path.exists() && fs::symlink_metadata(path).is_err() {
            return Err(AnalysisError::FileReadError {
                path: path.to_path_buf(),
                details: "SBOM file does not exist".to_string(),
            }
            .into());
        }

        let file_size = validate_regular_file(path, "SBOM file")?;
        validate_file_size(file_size, path, self.max_file_size)?;

        tracing::debug!(path = %path.display(), bytes = file_size, "Reading SBOM file");
        fs::read_to_string(path).map_err(|e| {
            AnalysisError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_sbom_success() {
        let temp_dir = TempDir::new().unwrap();
        let sbom_path = temp_dir.path().join("bom.json");
        fs::write(&sbom_path, r#"{"bomFormat": "CycloneDX"}"#).unwrap();

        let reader = FileSystemReader::new();
        let content = reader.read_sbom(&sbom_path).unwrap();

        assert_eq!(content, r#"{"bomFormat": "CycloneDX"}"#);
    }

    #[test]
    fn test_read_sbom_not_found() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let result = reader.read_sbom(&temp_dir.path().join("missing.json"));

        assert!(result.is_err());
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("SBOM file does not exist"));
    }

    #[test]
    fn test_read_sbom_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let result = reader.read_sbom(temp_dir.path());

        assert!(result.is_err());
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("not a regular file"));
    }

    #[test]
    fn test_read_sbom_rejects_oversized_file() {
        let temp_dir = TempDir::new().unwrap();
        let sbom_path = temp_dir.path().join("bom.json");
        fs::write(&sbom_path, "0123456789").unwrap();

        let reader = FileSystemReader::with_max_file_size(4);
        let result = reader.read_sbom(&sbom_path);

        assert!(result.is_err());
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("too large"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_sbom_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("bom.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let reader = FileSystemReader::new();
        let err = reader.read_sbom(&link).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::SecurityError { .. })
        ));
    }
}
