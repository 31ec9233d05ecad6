//! Error types for menu-tunnel.

use thiserror::Error;

use crate::menu::{MenuId, UserId};

/// Main error type for menu-tunnel operations.
#[derive(Error, Debug)]
pub enum MenuError {
    /// No menu is registered under the given ID.
    #[error("menu not found: {0}")]
    MenuNotFound(MenuId),

    /// The transport has no live connection for the user.
    #[error("user not connected: {0}")]
    UserNotConnected(UserId),

    /// The transport failed to deliver a presentation.
    #[error("render error: {0}")]
    Render(String),

    /// Grid cell addressed outside the current grid.
    #[error("option cell ({col}, {row}) is out of bounds")]
    CellOutOfBounds { col: usize, row: usize },

    /// A localization bundle could not be read.
    #[error("invalid bundle: {0}")]
    InvalidBundle(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

/// Convenience Result type for menu-tunnel operations.
pub type Result<T> = std::result::Result<T, MenuError>;
