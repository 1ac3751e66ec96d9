use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a clean run,
/// a run that completed with dependency-scoped failures, and hard errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every selected dependency was trimmed and published
    Success = 0,
    /// The run completed but some dependency or the descriptor stage failed
    PartialFailure = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable report, invalid config, collision, I/O error, etc.)
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
            ExitCode::PartialFailure => write!(f, "Partial Failure (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency trimming.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping the hint text next to the failure it explains.
#[derive(Debug, Error)]
pub enum TrimError {
    #[error("Analysis report not found: {path}\n\n💡 Hint: {suggestion}")]
    ReportNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse analysis report: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the report was produced by a compatible analyzer")]
    ReportParseError { path: PathBuf, details: String },

    #[error("Failed to parse build descriptor: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the descriptor is well-formed XML")]
    DescriptorParse { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid archive: {path}\nDetails: {details}")]
    InvalidArchive { path: PathBuf, details: String },

    #[error("Duplicate dependency coordinate in resolved set: {coordinate}")]
    DuplicateCoordinate { coordinate: String },

    /// Two originals were specialized onto the same coordinate.
    #[error("Specialized coordinate collision: {specialized} is produced by both {first} and {second}\n\n💡 Hint: This is a naming-rule violation; please report it")]
    CoordinateCollision {
        specialized: String,
        first: String,
        second: String,
    },

    #[error("Installer failed for {coordinate}\nDetails: {details}\n\n💡 Hint: Check that the installer command is on PATH and the repository is writable")]
    InstallerFailed { coordinate: String, details: String },

    /// Validation error for builder patterns and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
