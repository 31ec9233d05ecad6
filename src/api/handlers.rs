//! REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::hub::ConnectionHub;
use super::types::{ErrorResponse, ListMenusResponse, MenuSummary, ShowMenuRequest, ShowMenuResponse};
use crate::error::MenuError;
use crate::menu::{Menu, MenuDispatcher, MenuId};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<MenuDispatcher>,
    pub hub: Arc<ConnectionHub>,
    /// Menu shown to every user right after the socket opens.
    pub entry_menu: Option<Arc<Menu>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            dispatcher: Arc::new(MenuDispatcher::new()),
            hub: Arc::new(ConnectionHub::new()),
            entry_menu: None,
        }
    }

    pub fn with_entry_menu(mut self, menu: Arc<Menu>) -> Self {
        self.entry_menu = Some(menu);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn internal(e: MenuError) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal_error(e.to_string())),
    )
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// API information endpoint.
pub async fn api_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "menu-tunnel",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "menus": state.dispatcher.count(),
        "connections": state.hub.count(),
    }))
}

/// List registered menus.
pub async fn list_menus(
    State(state): State<AppState>,
) -> Result<Json<ListMenusResponse>, ApiError> {
    let ids = state.dispatcher.menu_ids().map_err(internal)?;

    let mut menus = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(menu) = state.dispatcher.get(id).map_err(internal)? {
            let users = menu.active_users().map_err(internal)?;
            menus.push(MenuSummary {
                menu_id: id,
                active: users.len(),
                users,
            });
        }
    }

    Ok(Json(ListMenusResponse {
        count: menus.len(),
        menus,
    }))
}

/// Show a registered menu to a connected user.
pub async fn show_menu(
    State(state): State<AppState>,
    Path(menu_id): Path<u32>,
    Json(req): Json<ShowMenuRequest>,
) -> Result<(StatusCode, Json<ShowMenuResponse>), ApiError> {
    let menu = state
        .dispatcher
        .get(MenuId::from_raw(menu_id))
        .map_err(internal)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::menu_not_found(menu_id)),
            )
        })?;

    if !state.hub.is_connected(&req.user) {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::user_not_connected(&req.user)),
        ));
    }

    let view = menu.show(&req.user).map_err(|e| match e {
        MenuError::UserNotConnected(user) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::user_not_connected(&user)),
        ),
        other => internal(other),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ShowMenuResponse {
            menu_id: menu.id(),
            user: req.user,
            options: view.option_count(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_new() {
        let state = AppState::new();
        assert_eq!(state.dispatcher.count(), 0);
        assert_eq!(state.hub.count(), 0);
        assert!(state.entry_menu.is_none());
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = health().await;
        assert_eq!(response, "OK");
    }

    #[tokio::test]
    async fn test_api_info_endpoint() {
        let response = api_info(State(AppState::new())).await;
        let json = response.0;
        assert_eq!(json["name"], "menu-tunnel");
        assert_eq!(json["status"], "running");
        assert_eq!(json["menus"], 0);
    }
}
