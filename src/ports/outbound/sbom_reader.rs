use crate::shared::Result;
use std::path::Path;

/// SbomReader port for acquiring raw SBOM content
///
/// The analysis core never reads files itself; the CLI uses this port to
/// obtain the content and passes it on together with a source label.
pub trait SbomReader {
    /// Reads the SBOM document at `path` as UTF-8 text
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The path is a symbolic link or not a regular file
    /// - The file exceeds the maximum accepted size
    fn read_sbom(&self, path: &Path) -> Result<String>;
}
