//! Typed per-session context store.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

/// Typed key into a [`ContextStore`].
///
/// The value type is fixed when the key is constructed, so a lookup through
/// a `ContextKey<T>` can only ever produce a `T`. Keys are plain values: two
/// keys with the same name and type are interchangeable, while keys sharing
/// a name but not a type address different entries.
///
/// ```
/// use menu_tunnel::menu::{ContextKey, ContextStore};
///
/// const PAGE: ContextKey<usize> = ContextKey::new("page");
///
/// let store = ContextStore::new().with(PAGE, 3);
/// assert_eq!(store.get(PAGE), Some(&3));
/// ```
pub struct ContextKey<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: 'static> ContextKey<T> {
    fn slot(&self) -> Slot {
        Slot {
            name: self.name,
            type_id: TypeId::of::<T>(),
        }
    }
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextKey<T> {}

impl<T> PartialEq for ContextKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for ContextKey<T> {}

impl<T> Hash for ContextKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextKey<{}>({:?})", std::any::type_name::<T>(), self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Slot {
    name: &'static str,
    type_id: TypeId,
}

type Value = Arc<dyn Any + Send + Sync>;

/// Heterogeneous key/value bag carried alongside a menu view.
///
/// Values are reference counted, so cloning a store (and the view holding
/// it) shares the stored values rather than copying them.
#[derive(Clone, Default)]
pub struct ContextStore {
    entries: HashMap<Slot, Value>,
}

impl ContextStore {
    /// Create an empty context store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with<T>(mut self, key: ContextKey<T>, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.put(key, value);
        self
    }

    /// Insert a value, replacing any previous value under the same key.
    pub fn put<T>(&mut self, key: ContextKey<T>, value: T) -> &mut Self
    where
        T: Any + Send + Sync,
    {
        self.entries.insert(key.slot(), Arc::new(value));
        self
    }

    /// Get a reference to the value stored under `key`.
    pub fn get<T: Any>(&self, key: ContextKey<T>) -> Option<&T> {
        self.entries
            .get(&key.slot())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Get the value stored under `key`, or `default` when absent.
    pub fn get_or<'a, T: Any>(&'a self, key: ContextKey<T>, default: &'a T) -> &'a T {
        self.get(key).unwrap_or(default)
    }

    /// Get an owned copy of the value stored under `key`.
    pub fn get_cloned<T: Any + Clone>(&self, key: ContextKey<T>) -> Option<T> {
        self.get(key).cloned()
    }

    pub fn contains<T: 'static>(&self, key: ContextKey<T>) -> bool {
        self.entries.contains_key(&key.slot())
    }

    /// Remove the value stored under `key`, returning it if present.
    pub fn remove<T>(&mut self, key: ContextKey<T>) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.entries
            .remove(&key.slot())
            .and_then(|value| value.downcast::<T>().ok())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ContextStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.entries.keys().map(|slot| slot.name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: ContextKey<usize> = ContextKey::new("page");
    const OFFSET: ContextKey<usize> = ContextKey::new("offset");
    const TARGET: ContextKey<String> = ContextKey::new("target");

    #[test]
    fn test_context_new() {
        let ctx = ContextStore::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.get(PAGE), None);
        assert!(!ctx.contains(PAGE));
    }

    #[test]
    fn test_put_get_roundtrip() {
        let mut ctx = ContextStore::new();
        ctx.put(PAGE, 4).put(TARGET, "bob".to_string());

        assert_eq!(ctx.get(PAGE), Some(&4));
        assert_eq!(ctx.get(TARGET).map(String::as_str), Some("bob"));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_same_type_different_name_is_separate() {
        let ctx = ContextStore::new().with(PAGE, 9);
        assert_eq!(ctx.get(OFFSET), None);
        assert!(!ctx.contains(OFFSET));
    }

    #[test]
    fn test_same_name_different_type_is_separate() {
        const PAGE_LABEL: ContextKey<String> = ContextKey::new("page");

        let ctx = ContextStore::new()
            .with(PAGE, 2)
            .with(PAGE_LABEL, "two".to_string());

        assert_eq!(ctx.get(PAGE), Some(&2));
        assert_eq!(ctx.get(PAGE_LABEL).map(String::as_str), Some("two"));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_equal_keys_are_interchangeable() {
        let ctx = ContextStore::new().with(ContextKey::<u8>::new("n"), 1);
        let again: ContextKey<u8> = ContextKey::new("n");
        assert_eq!(again, ContextKey::new("n"));
        assert_eq!(ctx.get(again), Some(&1));
    }

    #[test]
    fn test_put_replaces() {
        let mut ctx = ContextStore::new().with(PAGE, 1);
        ctx.put(PAGE, 2);
        assert_eq!(ctx.get(PAGE), Some(&2));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_get_or_and_cloned() {
        let ctx = ContextStore::new().with(TARGET, "carol".to_string());
        assert_eq!(ctx.get_or(PAGE, &0), &0);
        assert_eq!(ctx.get_cloned(TARGET), Some("carol".to_string()));
    }

    #[test]
    fn test_remove() {
        let mut ctx = ContextStore::new().with(PAGE, 5);
        assert_eq!(ctx.remove(PAGE).as_deref(), Some(&5));
        assert!(!ctx.contains(PAGE));
        assert!(ctx.remove(PAGE).is_none());
    }

    #[test]
    fn test_clone_shares_values() {
        let ctx = ContextStore::new().with(TARGET, "dave".to_string());
        let copy = ctx.clone();
        let a = ctx.get(TARGET).unwrap() as *const String;
        let b = copy.get(TARGET).unwrap() as *const String;
        assert_eq!(a, b);
    }
}
