//! Menu and user identifier types.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

/// Global counter for menu ID generation.
static COUNTER: AtomicU32 = AtomicU32::new(1);

/// Stable identifier of a menu definition.
///
/// Menu IDs are generated using an atomic counter, ensuring uniqueness
/// within a single process lifetime. The ID is displayed as `menu-XXXXXXXX`
/// where X is a hexadecimal digit, and travels over the wire as the raw
/// integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(u32);

impl MenuId {
    /// Allocate a new unique menu ID.
    pub fn next() -> Self {
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u32 value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Create a MenuId from a raw value received from the transport.
    pub fn from_raw(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "menu-{:08x}", self.0)
    }
}

impl FromStr for MenuId {
    type Err = crate::error::MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("menu-")
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .map(MenuId)
            .ok_or(crate::error::MenuError::MenuNotFound(MenuId(0)))
    }
}

/// Identity of a connected user.
///
/// The engine never interprets the value; it is whatever the transport
/// uses to tell connections apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uniqueness() {
        let mut ids = HashSet::new();
        for _ in 0..10_000 {
            let id = MenuId::next();
            assert!(ids.insert(id), "Duplicate ID generated: {}", id);
        }
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_display_format() {
        let id = MenuId::from_raw(255);
        assert_eq!(id.to_string(), "menu-000000ff");
    }

    #[test]
    fn test_parse() {
        let id: MenuId = "menu-000000ff".parse().unwrap();
        assert_eq!(id.as_u32(), 255);

        assert!("000000ff".parse::<MenuId>().is_err());
        assert!("menu-zz".parse::<MenuId>().is_err());
        assert!("".parse::<MenuId>().is_err());
    }

    #[test]
    fn test_menu_id_serializes_as_integer() {
        let json = serde_json::to_string(&MenuId::from_raw(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn test_user_id_conversions() {
        let a: UserId = "alice".into();
        let b = UserId::from(String::from("alice"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "alice");
        assert_eq!(a.to_string(), "alice");
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"alice\"");
    }
}
