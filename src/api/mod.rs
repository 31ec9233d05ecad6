//! WebSocket transport for menu-tunnel.
//!
//! Clients open a socket per user; the server pushes menus over it and the
//! client answers with selections. A small REST surface lets operators
//! inspect menus and push one to a connected user.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/v1/` - API information
//! - `GET /api/v1/menus` - List registered menus
//! - `POST /api/v1/menus/{id}/show` - Show a menu to a connected user
//! - `WS /api/v1/ws/{user}?locale=xx` - Menu stream for one user
//!
//! ## Protocol
//!
//! Server to client: `menu`, `notice`, `error`, `pong`.
//! Client to server: `select` (flattened option index), `close`, `ping`.
//!
//! ## Example
//!
//! ```no_run
//! use menu_tunnel::api::{AppState, ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> menu_tunnel::Result<()> {
//!     let config = ServerConfig::new("127.0.0.1", 3000);
//!     serve(config, AppState::new()).await
//! }
//! ```

pub mod handlers;
pub mod hub;
pub mod router;
pub mod types;
pub mod websocket;

// Re-export commonly used types
pub use handlers::AppState;
pub use hub::{ConnectionHub, ConnectionId};
pub use router::{create_router, create_router_with_state, serve, ServerConfig};
pub use types::{
    ConnectParams, ErrorResponse, ListMenusResponse, MenuSummary, ShowMenuRequest,
    ShowMenuResponse, WsMessage,
};
