//! # menu-tunnel
//!
//! Server-side menu sessions for remote clients.
//!
//! A [`Menu`] presents a titled grid of options to a user, remembers which
//! callback belongs to which option, and routes the user's later selection
//! back to it. Each user holds at most one active view per menu; a
//! selection consumes the view, and selections that no longer match
//! anything run the menu's close action instead.
//!
//! ## Features
//!
//! - **Typed context**: per-view key/value store with compile-time typed keys
//! - **Transformers**: composable hooks that build views before rendering
//! - **Transport agnostic**: render through any [`Renderer`]; a WebSocket
//!   transport is included
//! - **Localization**: message bundles resolved per user locale
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use menu_tunnel::{Menu, MenuDispatcher, MenuOption, NullRenderer, Resolution, UserId};
//!
//! let dispatcher = MenuDispatcher::new();
//! let menu = dispatcher
//!     .register(Menu::new(Arc::new(NullRenderer)).transform(|view| {
//!         view.title("Pick one", &[])
//!             .add_options_row([MenuOption::none("A"), MenuOption::none("B")])
//!             .add_options_row([MenuOption::user("C", |user| println!("{} picked C", user))]);
//!     }))
//!     .unwrap();
//!
//! let alice = UserId::new("alice");
//! menu.show(&alice).unwrap();
//!
//! let resolution = dispatcher.handle_selection(menu.id(), &alice, 2).unwrap();
//! assert_eq!(resolution, Resolution::Selected(2));
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod menu;

// Re-export commonly used types
pub use error::{MenuError, Result};
pub use i18n::{Bundle, BundleFormatter, LocaleProvider};
pub use menu::{
    Action, ContextKey, ContextStore, FallbackReason, Menu, MenuDispatcher, MenuEvent, MenuFrame,
    MenuId, MenuOption, MenuView, NullRenderer, PlainFormatter, Renderer, Resolution,
    TextFormatter, UserId,
};
