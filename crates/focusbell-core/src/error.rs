//! Core error types for focusbell-core.
//!
//! Countdown transitions themselves never fail: invalid input and guard
//! violations are silent no-ops. Errors here cover the edges of the system --
//! configuration I/O and the alarm output channels.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusbell-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Audio output errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// Desktop notification errors
    #[error("Notification error: {0}")]
    Notification(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// Audio-specific errors.
#[derive(Error, Debug)]
pub enum AudioError {
    /// The dedicated audio thread could not be spawned
    #[error("Failed to start audio thread: {0}")]
    ThreadSpawn(String),

    /// The dedicated audio thread has exited
    #[error("Audio thread is not running")]
    ThreadGone,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
