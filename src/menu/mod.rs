//! Menu session engine.
//!
//! This module provides the types that present option grids to users and
//! route their selections back to the right callback: typed per-session
//! context, options and actions, the in-progress view, the per-menu
//! registry of active sessions, and the dispatcher that maps transport
//! events to menus.

mod context;
mod dispatch;
mod format;
mod id;
mod option;
mod registry;
mod render;
mod view;

pub use context::{ContextKey, ContextStore};
pub use dispatch::{MenuDispatcher, MenuEvent};
pub use format::{substitute, PlainFormatter, TextFormatter};
pub use id::{MenuId, UserId};
pub use option::{Action, Label, MenuOption, UserCallback, ViewCallback};
pub use registry::{FallbackReason, Menu, Resolution, Transformer};
pub use render::{MenuFrame, NullRenderer, Renderer};
pub use view::MenuView;
