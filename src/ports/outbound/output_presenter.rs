use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the serialized analysis result is presented.
pub trait OutputPresenter {
    /// Presents the serialized analysis result to the output destination
    ///
    /// # Arguments
    /// * `content` - The serialized result to present
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination is a symbolic link
    /// - The parent directory does not exist
    fn present(&self, content: &str) -> Result<()>;
}
