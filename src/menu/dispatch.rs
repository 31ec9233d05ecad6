//! Routing of transport events to the owning menu.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use super::{Menu, MenuId, Resolution, UserId};
use crate::error::MenuError;
use crate::Result;

/// Event reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// The user picked option `option` of menu `menu_id`.
    Selected {
        menu_id: MenuId,
        user: UserId,
        option: i32,
    },
    /// The user's connection went away.
    Disconnected { user: UserId },
}

/// Owns every registered [`Menu`] and routes events to it by id.
#[derive(Debug, Default)]
pub struct MenuDispatcher {
    menus: RwLock<HashMap<MenuId, Arc<Menu>>>,
}

impl MenuDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a menu so selections carrying its id reach it.
    pub fn register(&self, menu: Menu) -> Result<Arc<Menu>> {
        let menu = Arc::new(menu);
        self.menus
            .write()
            .map_err(|_| MenuError::LockPoisoned)?
            .insert(menu.id(), Arc::clone(&menu));
        debug!(menu = %menu.id(), "menu registered");
        Ok(menu)
    }

    pub fn get(&self, id: MenuId) -> Result<Option<Arc<Menu>>> {
        let menus = self.menus.read().map_err(|_| MenuError::LockPoisoned)?;
        Ok(menus.get(&id).cloned())
    }

    /// All registered menu ids, in ascending order.
    pub fn menu_ids(&self) -> Result<Vec<MenuId>> {
        let menus = self.menus.read().map_err(|_| MenuError::LockPoisoned)?;
        let mut ids: Vec<MenuId> = menus.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    /// Number of registered menus; `0` once the registry lock is poisoned.
    pub fn count(&self) -> usize {
        self.menus.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Route a selection to the menu it was made in.
    pub fn handle_selection(&self, menu_id: MenuId, user: &UserId, option: i32) -> Result<Resolution> {
        let menu = self.get(menu_id)?.ok_or_else(|| {
            warn!(menu = %menu_id, %user, "selection for unknown menu");
            MenuError::MenuNotFound(menu_id)
        })?;
        menu.resolve(user, option)
    }

    /// Evict the user's views from every menu.
    ///
    /// Returns how many views were dropped.
    pub fn handle_disconnect(&self, user: &UserId) -> Result<usize> {
        let menus: Vec<Arc<Menu>> = self
            .menus
            .read()
            .map_err(|_| MenuError::LockPoisoned)?
            .values()
            .cloned()
            .collect();

        let mut evicted = 0;
        for menu in menus {
            if menu.on_user_disconnected(user)? {
                evicted += 1;
            }
        }
        Ok(evicted)
    }

    /// Handle any transport event.
    pub fn dispatch(&self, event: MenuEvent) -> Result<()> {
        match event {
            MenuEvent::Selected {
                menu_id,
                user,
                option,
            } => self.handle_selection(menu_id, &user, option).map(|_| ()),
            MenuEvent::Disconnected { user } => self.handle_disconnect(&user).map(|_| ()),
        }
    }
}
