//! Render seam between the menu engine and a transport.

use serde::{Deserialize, Serialize};

use super::{MenuId, UserId};
use crate::Result;

/// Everything a transport needs to present a menu to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuFrame {
    pub menu_id: MenuId,
    pub user: UserId,
    pub title: String,
    pub body: String,
    /// Option labels, row-major.
    pub options: Vec<Vec<String>>,
}

impl MenuFrame {
    /// Number of selectable options across all rows.
    pub fn option_count(&self) -> usize {
        self.options.iter().map(Vec::len).sum()
    }
}

/// Delivers a menu frame to its user.
///
/// Called synchronously from [`Menu::show`](super::Menu::show); any
/// blocking behavior is up to the implementation.
pub trait Renderer: Send + Sync {
    fn render(&self, frame: &MenuFrame) -> Result<()>;
}

/// Renderer that drops every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&self, frame: &MenuFrame) -> Result<()> {
        tracing::trace!(menu = %frame.menu_id, user = %frame.user, "discarding frame");
        Ok(())
    }
}
