//! Per-menu registry of active sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, trace, warn};

use super::{
    Action, ContextKey, ContextStore, MenuId, MenuView, PlainFormatter, Renderer, TextFormatter,
    UserId,
};
use crate::error::MenuError;
use crate::Result;

/// Hook applied to every view a [`Menu`] builds before it is rendered.
pub type Transformer = Arc<dyn Fn(&mut MenuView) + Send + Sync>;

/// Why a selection ended up on the fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The user had no active view for this menu.
    NoSession,
    /// The index did not address any option of the active view.
    OutOfRange,
}

/// Outcome of [`Menu::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The option at this linear index ran.
    Selected(i32),
    /// The close action ran instead.
    Fallback(FallbackReason),
}

/// A logical menu type and the sessions currently showing it.
///
/// Each menu owns its id, the ordered transformer chain, a close action for
/// selections that cannot be matched, and at most one active [`MenuView`]
/// per user. Showing the menu again to the same user replaces the previous
/// view; a selection consumes the view.
pub struct Menu {
    id: MenuId,
    views: Mutex<HashMap<UserId, MenuView>>,
    transformers: RwLock<Vec<Transformer>>,
    close_action: RwLock<Action>,
    renderer: Arc<dyn Renderer>,
    formatter: Arc<dyn TextFormatter>,
}

impl Menu {
    /// Create a menu that formats text literally.
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self::with_formatter(renderer, Arc::new(PlainFormatter))
    }

    pub fn with_formatter(renderer: Arc<dyn Renderer>, formatter: Arc<dyn TextFormatter>) -> Self {
        Self {
            id: MenuId::next(),
            views: Mutex::new(HashMap::new()),
            transformers: RwLock::new(Vec::new()),
            close_action: RwLock::new(Action::None),
            renderer,
            formatter,
        }
    }

    /// Builder-style [`register_transformer`](Self::register_transformer).
    pub fn transform<F>(mut self, transformer: F) -> Self
    where
        F: Fn(&mut MenuView) + Send + Sync + 'static,
    {
        if let Ok(transformers) = self.transformers.get_mut() {
            transformers.push(Arc::new(transformer));
        }
        self
    }

    /// Builder-style [`set_close_action`](Self::set_close_action).
    pub fn closed(mut self, action: Action) -> Self {
        if let Ok(close_action) = self.close_action.get_mut() {
            *close_action = action;
        }
        self
    }

    pub fn id(&self) -> MenuId {
        self.id
    }

    /// Append a transformer; it applies to every later `show`.
    pub fn register_transformer<F>(&self, transformer: F) -> Result<()>
    where
        F: Fn(&mut MenuView) + Send + Sync + 'static,
    {
        self.transformers
            .write()
            .map_err(|_| MenuError::LockPoisoned)?
            .push(Arc::new(transformer));
        Ok(())
    }

    /// Replace the action run for unmatched selections.
    pub fn set_close_action(&self, action: Action) -> Result<()> {
        *self
            .close_action
            .write()
            .map_err(|_| MenuError::LockPoisoned)? = action;
        Ok(())
    }

    /// Show the menu to `user` with an empty context.
    pub fn show(&self, user: &UserId) -> Result<MenuView> {
        self.show_transformed(user, ContextStore::new(), |_| {})
    }

    pub fn show_with_context(&self, user: &UserId, context: ContextStore) -> Result<MenuView> {
        self.show_transformed(user, context, |_| {})
    }

    /// Show the menu with a context seeded from a single key.
    pub fn show_with<T>(&self, user: &UserId, key: ContextKey<T>, value: T) -> Result<MenuView>
    where
        T: std::any::Any + Send + Sync,
    {
        self.show_with_context(user, ContextStore::new().with(key, value))
    }

    /// Build, transform, register and render a view for `user`.
    ///
    /// Registered transformers run in order, then `transformer`. Any view the
    /// user still had open is dropped without notice. The view stays
    /// registered even when rendering fails, so [`rerender`](Self::rerender)
    /// can retry it.
    ///
    /// Returns a snapshot of the registered view; changing it does not touch
    /// the live session. Use [`update`](Self::update) to edit the view the
    /// user is looking at.
    pub fn show_transformed<F>(
        &self,
        user: &UserId,
        context: ContextStore,
        transformer: F,
    ) -> Result<MenuView>
    where
        F: FnOnce(&mut MenuView),
    {
        let mut view = MenuView::new(self.id, user.clone(), context, Arc::clone(&self.formatter));

        let transformers = self
            .transformers
            .read()
            .map_err(|_| MenuError::LockPoisoned)?
            .clone();
        for transform in &transformers {
            transform(&mut view);
        }
        transformer(&mut view);

        let frame = view.frame();
        let replaced = self
            .views
            .lock()
            .map_err(|_| MenuError::LockPoisoned)?
            .insert(user.clone(), view.clone())
            .is_some();

        debug!(
            menu = %self.id,
            %user,
            options = frame.option_count(),
            replaced,
            "showing menu"
        );

        if let Err(e) = self.renderer.render(&frame) {
            warn!(menu = %self.id, %user, error = %e, "failed to render menu");
            return Err(e);
        }
        Ok(view)
    }

    /// Consume the user's active view and run the selected option.
    ///
    /// Unknown users and indices that address no option run the close
    /// action instead; neither is an error. Callbacks run after the view is
    /// removed and with no lock held, so they may show this menu again.
    pub fn resolve(&self, user: &UserId, index: i32) -> Result<Resolution> {
        let view = self
            .views
            .lock()
            .map_err(|_| MenuError::LockPoisoned)?
            .remove(user);

        let Some(view) = view else {
            debug!(menu = %self.id, %user, index, "selection without active view");
            self.run_close_action(user, None)?;
            return Ok(Resolution::Fallback(FallbackReason::NoSession));
        };

        match view.option_by_index(index) {
            Some(option) => {
                debug!(menu = %self.id, %user, index, "option selected");
                option.action().invoke(user, Some(&view));
                Ok(Resolution::Selected(index))
            }
            None => {
                debug!(menu = %self.id, %user, index, "selection out of range");
                self.run_close_action(user, Some(&view))?;
                Ok(Resolution::Fallback(FallbackReason::OutOfRange))
            }
        }
    }

    /// Drop the user's active view without running any action.
    ///
    /// Returns whether a view was evicted.
    pub fn on_user_disconnected(&self, user: &UserId) -> Result<bool> {
        let evicted = self
            .views
            .lock()
            .map_err(|_| MenuError::LockPoisoned)?
            .remove(user)
            .is_some();
        if evicted {
            debug!(menu = %self.id, %user, "evicted view of disconnected user");
        }
        Ok(evicted)
    }

    /// Edit the user's active view in place and render it again.
    ///
    /// `f` runs under the view lock and must not call back into this menu.
    /// Returns `false` if the user has no active view.
    pub fn update<F>(&self, user: &UserId, f: F) -> Result<bool>
    where
        F: FnOnce(&mut MenuView),
    {
        let frame = {
            let mut views = self.views.lock().map_err(|_| MenuError::LockPoisoned)?;
            let Some(view) = views.get_mut(user) else {
                return Ok(false);
            };
            f(view);
            view.frame()
        };

        self.renderer.render(&frame)?;
        Ok(true)
    }

    /// Render the user's active view again, e.g. after a failed delivery.
    pub fn rerender(&self, user: &UserId) -> Result<bool> {
        let frame = self
            .views
            .lock()
            .map_err(|_| MenuError::LockPoisoned)?
            .get(user)
            .map(MenuView::frame);

        match frame {
            Some(frame) => {
                self.renderer.render(&frame)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Snapshot of the user's active view.
    pub fn active_view(&self, user: &UserId) -> Result<Option<MenuView>> {
        let views = self.views.lock().map_err(|_| MenuError::LockPoisoned)?;
        Ok(views.get(user).cloned())
    }

    pub fn is_active(&self, user: &UserId) -> Result<bool> {
        let views = self.views.lock().map_err(|_| MenuError::LockPoisoned)?;
        Ok(views.contains_key(user))
    }

    /// Number of users currently holding a view of this menu.
    ///
    /// Status only; reads as `0` once the view lock is poisoned, while every
    /// operation that touches a view reports [`MenuError::LockPoisoned`].
    pub fn active_count(&self) -> usize {
        self.views.lock().map(|v| v.len()).unwrap_or(0)
    }

    /// Users currently holding a view of this menu, sorted.
    pub fn active_users(&self) -> Result<Vec<UserId>> {
        let views = self.views.lock().map_err(|_| MenuError::LockPoisoned)?;
        let mut users: Vec<UserId> = views.keys().cloned().collect();
        users.sort();
        Ok(users)
    }

    fn run_close_action(&self, user: &UserId, view: Option<&MenuView>) -> Result<()> {
        let action = self
            .close_action
            .read()
            .map_err(|_| MenuError::LockPoisoned)?
            .clone();

        if !action.invoke(user, view) {
            trace!(menu = %self.id, %user, "close action needs a view; skipped");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("active", &self.active_count())
            .finish_non_exhaustive()
    }
}
