//! Registry of live client connections.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::types::WsMessage;
use crate::error::MenuError;
use crate::i18n::LocaleProvider;
use crate::menu::{MenuFrame, Renderer, UserId};
use crate::Result;

/// Identifies one connection of a user, so a stale socket closing does not
/// tear down the connection that replaced it.
pub type ConnectionId = u64;

struct Connection {
    id: ConnectionId,
    sender: mpsc::UnboundedSender<WsMessage>,
    locale: Option<String>,
}

/// Outbound channels of all connected users.
///
/// The hub is the transport side of the menu engine: it implements
/// [`Renderer`] by queueing a `menu` message on the user's socket, and
/// [`LocaleProvider`] from the locale each client reported on connect.
#[derive(Default)]
pub struct ConnectionHub {
    connections: RwLock<HashMap<UserId, Connection>>,
    next_id: AtomicU64,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection for `user`, replacing any previous one.
    ///
    /// Returns the connection id and the receiving end of its outbound queue.
    pub fn connect(
        &self,
        user: &UserId,
        locale: Option<String>,
    ) -> Result<(ConnectionId, mpsc::UnboundedReceiver<WsMessage>)> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let previous = self
            .connections
            .write()
            .map_err(|_| MenuError::LockPoisoned)?
            .insert(
                user.clone(),
                Connection {
                    id,
                    sender,
                    locale,
                },
            );

        if previous.is_some() {
            info!(%user, "connection replaced");
        } else {
            debug!(%user, connection = id, "user connected");
        }
        Ok((id, receiver))
    }

    /// Remove the user's connection if it is still `connection`.
    ///
    /// Returns `true` when the user is now gone.
    pub fn disconnect(&self, user: &UserId, connection: ConnectionId) -> Result<bool> {
        let mut connections = self
            .connections
            .write()
            .map_err(|_| MenuError::LockPoisoned)?;

        match connections.get(user) {
            Some(current) if current.id == connection => {
                connections.remove(user);
                debug!(%user, connection, "user disconnected");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Queue a message for the user.
    pub fn send(&self, user: &UserId, message: WsMessage) -> Result<()> {
        let connections = self
            .connections
            .read()
            .map_err(|_| MenuError::LockPoisoned)?;
        let connection = connections
            .get(user)
            .ok_or_else(|| MenuError::UserNotConnected(user.clone()))?;

        connection
            .sender
            .send(message)
            .map_err(|e| MenuError::Render(format!("connection of {} closed: {}", user, e)))
    }

    /// Send a plain text notice to the user.
    pub fn notify(&self, user: &UserId, text: impl Into<String>) -> Result<()> {
        self.send(user, WsMessage::Notice { text: text.into() })
    }

    /// `false` once the connection lock is poisoned; [`send`](Self::send)
    /// then fails with [`MenuError::LockPoisoned`].
    pub fn is_connected(&self, user: &UserId) -> bool {
        self.connections
            .read()
            .map(|c| c.contains_key(user))
            .unwrap_or(false)
    }

    /// Number of live connections; `0` once the connection lock is poisoned.
    pub fn count(&self) -> usize {
        self.connections.read().map(|c| c.len()).unwrap_or(0)
    }
}

impl Renderer for ConnectionHub {
    fn render(&self, frame: &MenuFrame) -> Result<()> {
        self.send(&frame.user, WsMessage::from(frame.clone()))
    }
}

impl LocaleProvider for ConnectionHub {
    fn locale(&self, user: &UserId) -> Option<String> {
        self.connections
            .read()
            .ok()?
            .get(user)
            .and_then(|c| c.locale.clone())
    }
}
