//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, PartialEq)]
pub enum PlatformError {
    /// Viewport dimensions or scale factor are unusable
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    /// The host was asked to run without anything to drive
    #[error("Event loop error: {0}")]
    EventLoop(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
