//! Selectable menu options and their actions.

use std::fmt;
use std::sync::Arc;

use super::{MenuView, UserId};

/// Callback receiving the consumed view.
pub type ViewCallback = Arc<dyn Fn(&MenuView) + Send + Sync>;

/// Callback receiving only the selecting user.
pub type UserCallback = Arc<dyn Fn(&UserId) + Send + Sync>;

/// What happens when an option is selected.
#[derive(Clone, Default)]
pub enum Action {
    /// Do nothing; selecting the option just closes the menu.
    #[default]
    None,
    /// Invoke a callback with the session view.
    View(ViewCallback),
    /// Invoke a callback with the user identity.
    User(UserCallback),
}

impl Action {
    pub fn none() -> Self {
        Self::None
    }

    pub fn view<F>(f: F) -> Self
    where
        F: Fn(&MenuView) + Send + Sync + 'static,
    {
        Self::View(Arc::new(f))
    }

    pub fn user<F>(f: F) -> Self
    where
        F: Fn(&UserId) + Send + Sync + 'static,
    {
        Self::User(Arc::new(f))
    }

    /// Run the action for `user`.
    ///
    /// Returns `false` when the action needed a view and none was given,
    /// which only happens for fallbacks of selections with no live session.
    pub fn invoke(&self, user: &UserId, view: Option<&MenuView>) -> bool {
        match self {
            Self::None => true,
            Self::User(f) => {
                f(user);
                true
            }
            Self::View(f) => match view {
                Some(view) => {
                    f(view);
                    true
                }
                None => false,
            },
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("Action::None"),
            Self::View(_) => f.write_str("Action::View(..)"),
            Self::User(_) => f.write_str("Action::User(..)"),
        }
    }
}

/// Visible part of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Text(String),
    /// Single glyph from the client's icon font.
    Icon(char),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Icon(icon) => write!(f, "{}", icon),
        }
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<char> for Label {
    fn from(icon: char) -> Self {
        Self::Icon(icon)
    }
}

/// One selectable cell of a menu grid.
#[derive(Debug, Clone)]
pub struct MenuOption {
    label: Label,
    action: Action,
}

impl MenuOption {
    pub fn new(label: impl Into<Label>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    /// Option that only closes the menu.
    pub fn none(label: impl Into<Label>) -> Self {
        Self::new(label, Action::None)
    }

    /// Option whose callback receives the session view.
    pub fn view<F>(label: impl Into<Label>, f: F) -> Self
    where
        F: Fn(&MenuView) + Send + Sync + 'static,
    {
        Self::new(label, Action::view(f))
    }

    /// Option whose callback receives the selecting user.
    pub fn user<F>(label: impl Into<Label>, f: F) -> Self
    where
        F: Fn(&UserId) + Send + Sync + 'static,
    {
        Self::new(label, Action::user(f))
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Text sent to the client for this option.
    pub fn button(&self) -> String {
        self.label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_label_rendering() {
        assert_eq!(MenuOption::none("Close").button(), "Close");
        assert_eq!(MenuOption::none('\u{e88a}').button(), "\u{e88a}");
        assert_eq!(Label::from(String::from("x")), Label::Text("x".into()));
    }

    #[test]
    fn test_user_action_receives_user() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let option = MenuOption::user("Go", move |user| {
            assert_eq!(user.as_str(), "alice");
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(option.action().invoke(&UserId::new("alice"), None));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_view_action_without_view_is_skipped() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let action = Action::view(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!action.invoke(&UserId::new("bob"), None));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_none_action() {
        let action = Action::default();
        assert!(action.is_none());
        assert!(action.invoke(&UserId::new("bob"), None));
        assert_eq!(format!("{:?}", Action::user(|_| {})), "Action::User(..)");
    }
}
