//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::menu::{MenuFrame, MenuId, UserId};

/// Request to show a registered menu to a connected user.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowMenuRequest {
    pub user: UserId,
}

/// Response for a successful show.
#[derive(Debug, Clone, Serialize)]
pub struct ShowMenuResponse {
    pub menu_id: MenuId,
    pub user: UserId,
    /// Number of selectable options presented.
    pub options: usize,
}

/// Query parameters of the WebSocket endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectParams {
    /// Client locale code, e.g. `en` or `pt_BR`.
    #[serde(default)]
    pub locale: Option<String>,
}

/// Brief menu summary for listing.
#[derive(Debug, Clone, Serialize)]
pub struct MenuSummary {
    pub menu_id: MenuId,
    /// Number of users currently holding a view of the menu.
    pub active: usize,
    /// Those users, sorted.
    pub users: Vec<UserId>,
}

/// List menus response.
#[derive(Debug, Clone, Serialize)]
pub struct ListMenusResponse {
    pub count: usize,
    pub menus: Vec<MenuSummary>,
}

/// Generic API error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "MENU_NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn menu_not_found(id: u32) -> Self {
        Self::new("MENU_NOT_FOUND", format!("Menu {} not found", MenuId::from_raw(id)))
    }

    pub fn user_not_connected(user: &UserId) -> Self {
        Self::new("USER_NOT_CONNECTED", format!("User '{}' is not connected", user))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

/// WebSocket message types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Server presents a menu.
    Menu {
        menu_id: MenuId,
        title: String,
        body: String,
        /// Option labels, row-major; selections index this grid flattened.
        options: Vec<Vec<String>>,
    },
    /// Server sends a plain text notice.
    Notice { text: String },
    /// Client picked an option.
    Select { menu_id: MenuId, option: i32 },
    /// Client dismissed a menu without picking anything.
    Close { menu_id: MenuId },
    /// Error message.
    Error { code: String, message: String },
    /// Ping/pong for connection health.
    Ping,
    Pong,
}

impl WsMessage {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<MenuFrame> for WsMessage {
    fn from(frame: MenuFrame) -> Self {
        Self::Menu {
            menu_id: frame.menu_id,
            title: frame.title,
            body: frame.body,
            options: frame.options,
        }
    }
}
