use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - analysis completed and the risk score meets the threshold
    Success = 0,
    /// The overall risk score is below the configured `--fail-below` threshold
    RiskThresholdExceeded = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unsupported SBOM, file I/O error, invalid config, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::RiskThresholdExceeded => write!(f, "Risk Threshold Exceeded (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Fatal, pre-enrichment errors raised while turning raw content into the document model.
///
/// No partial document is ever returned alongside one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Failed to parse SBOM '{source_label}': content is not a JSON object\nDetails: {details}\n\n💡 Hint: Only JSON CycloneDX and SPDX documents are supported")]
    NotStructuredData {
        source_label: String,
        details: String,
    },

    #[error("Unsupported SBOM format in '{source_label}'\n\n💡 Hint: Expected a CycloneDX document (bomFormat/components) or an SPDX document (spdxVersion/packages)")]
    UnrecognizedFormat { source_label: String },

    #[error("Invalid {format} structure in '{source_label}'\nDetails: {details}")]
    InvalidStructure {
        format: String,
        source_label: String,
        details: String,
    },
}

/// Application-specific errors outside of document parsing.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid analysis state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Validation error for builders and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::RiskThresholdExceeded.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::RiskThresholdExceeded),
            "Risk Threshold Exceeded (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_unrecognized_format_display() {
        let error = FormatError::UnrecognizedFormat {
            source_label: "bom.json".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("Unsupported SBOM format"));
        assert!(display.contains("bom.json"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_invalid_structure_display() {
        let error = FormatError::InvalidStructure {
            format: "SPDX".to_string(),
            source_label: "sbom.spdx.json".to_string(),
            details: "invalid type: string, expected a sequence".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("Invalid SPDX structure"));
        assert!(display.contains("expected a sequence"));
    }

    #[test]
    fn test_format_error_survives_anyhow_round_trip() {
        let error: anyhow::Error = FormatError::UnrecognizedFormat {
            source_label: "x.json".to_string(),
        }
        .into();
        assert!(matches!(
            error.downcast_ref::<FormatError>(),
            Some(FormatError::UnrecognizedFormat { .. })
        ));
    }

    #[test]
    fn test_invalid_transition_display() {
        let error = AnalysisError::InvalidTransition {
            from: "Complete".to_string(),
            to: "Enriching".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid analysis state transition: Complete -> Enriching"
        );
    }

    #[test]
    fn test_security_error_display() {
        let error = AnalysisError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("/test/symlink"));
        assert!(display.contains("Use a regular file instead"));
    }
}
