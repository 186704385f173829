//! Error handling for gridvis
//!
//! Provides error types for every layer of the library:
//! - Dispatch errors (handing work to the render-control thread)
//! - Toolkit errors (window creation, surfaces, captures)
//! - Usage errors (binding a second window to a session)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Dispatch error type
///
/// Represents failures while marshaling work onto the render-control thread.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The render-control thread is gone and no longer accepts work
    #[error("Render thread disconnected")]
    Disconnected,

    /// The task panicked while running on the render-control thread
    #[error("Render task panicked: {message}")]
    TaskPanicked {
        /// The panic payload, when it was a string.
        message: String,
    },

    /// The render-control thread could not be started
    #[error("Failed to spawn render thread: {reason}")]
    Spawn {
        /// The reason the thread failed to start.
        reason: String,
    },
}

/// Toolkit error type
///
/// Represents failures reported by the windowing backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolkitError {
    /// The toolkit failed to initialize
    #[error("Toolkit initialization failed: {reason}")]
    Init {
        /// The reason initialization failed.
        reason: String,
    },

    /// A top-level window could not be created
    #[error("Window creation failed: {reason}")]
    WindowCreation {
        /// The reason the window could not be created.
        reason: String,
    },

    /// A drawing surface rejected an operation
    #[error("Surface error: {reason}")]
    Surface {
        /// The reason for the surface error.
        reason: String,
    },

    /// A frame could not be captured
    #[error("Capture failed: {reason}")]
    Capture {
        /// The reason the capture failed.
        reason: String,
    },
}

impl ToolkitError {
    /// Create a surface error from a message
    pub fn surface(reason: impl Into<String>) -> Self {
        ToolkitError::Surface {
            reason: reason.into(),
        }
    }
}

/// Main error type for gridvis
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// A session already has its window; a second bind is a usage error
    #[error("Visualization already displayed: a session binds exactly one window")]
    AlreadyDisplayed,

    /// Dispatch error
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Toolkit error
    #[error(transparent)]
    Toolkit(#[from] ToolkitError),
}

impl Error {
    /// Check if this is a caller usage error
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Error::AlreadyDisplayed)
    }

    /// Check if this error came from the windowing backend
    pub fn is_toolkit_error(&self) -> bool {
        matches!(self, Error::Toolkit(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
