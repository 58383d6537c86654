//! Bridge error types.

use thiserror::Error;

/// Errors from the gamepad backend.
#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    /// The platform backend could not be created.
    #[error("gamepad backend failed to start: {0}")]
    Init(String),
}
