use super::record::{Metadata, MetadataRecord};
use crate::sync::{LockScope, RwLockExt};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Handle on a metadata record.
///
/// Cloning a handle **aliases** the record: every clone reads and writes the
/// same data. Use [`SharedMetadata::copied`] when an independent record is
/// needed.
///
/// Every access locks the record only for the duration of the call. No lock
/// guard is handed out; [`SharedMetadata::with`] and
/// [`SharedMetadata::with_mut`] run a closure while the lock is held.
///
/// # Example
///
/// ```
/// use datumkit::{Metadata, SharedMetadata};
/// use serde_json::json;
///
/// let shared = SharedMetadata::new(Metadata::new());
/// let alias = shared.clone();
/// let copy = shared.copied();
///
/// alias.set_field("label", json!("Age"));
///
/// assert_eq!(shared.get_field("label"), Some(json!("Age")));
/// assert_eq!(copy.get_field("label"), None);
/// assert!(SharedMetadata::ptr_eq(&shared, &alias));
/// ```
pub struct SharedMetadata<M = Metadata> {
    inner: Arc<RwLock<M>>,
}

impl<M> SharedMetadata<M> {
    /// Wrap a record in a new handle
    pub fn new(record: M) -> Self {
        Self {
            inner: Arc::new(RwLock::new(record)),
        }
    }

    /// Run a closure against the record and return its result
    ///
    /// # Panics
    ///
    /// Panics if `f` accesses the same record again, through this handle or
    /// any alias (including a [`LabeledValue`](crate::LabeledValue) holding
    /// it). The lock is not re-entrant, so that access would otherwise block
    /// forever.
    pub fn with<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        let _scope = LockScope::enter(self.addr());
        let guard = self.inner.read_recovered();
        f(&guard)
    }

    /// Run a closure against the record mutably and return its result
    ///
    /// # Panics
    ///
    /// Panics if `f` accesses the same record again, through this handle or
    /// any alias. See [`SharedMetadata::with`].
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        let _scope = LockScope::enter(self.addr());
        let mut guard = self.inner.write_recovered();
        f(&mut guard)
    }

    /// Replace the whole record in place. All aliases observe the new record.
    pub fn replace(&self, record: M) -> M {
        self.with_mut(|current| std::mem::replace(current, record))
    }

    /// Check whether two handles point at the same record
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Number of handles currently aliasing this record
    #[must_use]
    pub fn alias_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }
}

impl<M: Clone> SharedMetadata<M> {
    /// Copy of the record as it is right now
    #[must_use]
    pub fn snapshot(&self) -> M {
        self.with(M::clone)
    }

    /// New handle on an independent copy of the record
    #[must_use]
    pub fn copied(&self) -> Self {
        Self::new(self.snapshot())
    }
}

impl<M: MetadataRecord> SharedMetadata<M> {
    /// Read a single field
    pub fn get_field(&self, name: &str) -> Option<M::Value> {
        self.with(|record| record.get_field(name))
    }

    /// Write a single field
    pub fn set_field(&self, name: &str, value: M::Value) {
        self.with_mut(|record| record.set_field(name, value));
    }

    /// Remove a single field
    pub fn remove_field(&self, name: &str) -> Option<M::Value> {
        self.with_mut(|record| record.remove_field(name))
    }

    /// Names of all fields currently set
    pub fn field_names(&self) -> Vec<String> {
        self.with(M::field_names)
    }
}

impl<M> Clone for SharedMetadata<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M: Default> Default for SharedMetadata<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl<M> From<M> for SharedMetadata<M> {
    fn from(record: M) -> Self {
        Self::new(record)
    }
}

impl<M: PartialEq> PartialEq for SharedMetadata<M> {
    fn eq(&self, other: &Self) -> bool {
        if Self::ptr_eq(self, other) {
            return true;
        }
        // Lock in address order so two threads comparing a == b and b == a
        // cannot wait on each other
        let (first, second) = if self.addr() < other.addr() {
            (self, other)
        } else {
            (other, self)
        };
        first.with(|a| second.with(|b| a == b))
    }
}

impl<M: fmt::Debug> fmt::Debug for SharedMetadata<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|record| f.debug_tuple("SharedMetadata").field(record).finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Metadata;
    use serde_json::json;

    #[test]
    fn test_clone_aliases() {
        let a = SharedMetadata::new(Metadata::new());
        let b = a.clone();

        b.set_field("state", json!("OK"));

        assert_eq!(a.get_field("state"), Some(json!("OK")));
        assert!(SharedMetadata::ptr_eq(&a, &b));
        assert_eq!(a.alias_count(), 2);
    }

    #[test]
    fn test_copied_is_independent() {
        let a = SharedMetadata::new(Metadata::new());
        a.set_field("state", json!("OK"));

        let b = a.copied();
        assert_eq!(a, b);
        assert!(!SharedMetadata::ptr_eq(&a, &b));

        b.set_field("state", json!("ERR"));
        assert_eq!(a.get_field("state"), Some(json!("OK")));
        assert_ne!(a, b);
    }

    #[test]
    fn test_replace_is_seen_by_aliases() {
        let a = SharedMetadata::new(Metadata::new());
        let b = a.clone();

        let mut fresh = Metadata::new();
        fresh.insert("label".into(), json!("Name"));
        let old = a.replace(fresh);

        assert!(old.is_empty());
        assert_eq!(b.get_field("label"), Some(json!("Name")));
    }

    #[test]
    fn test_with_mut() {
        let shared = SharedMetadata::new(Metadata::new());
        let count = shared.with_mut(|record| {
            record.insert("a".into(), json!(1));
            record.insert("b".into(), json!(2));
            record.len()
        });

        assert_eq!(count, 2);
        assert_eq!(shared.with(|record| record.len()), 2);
        assert_eq!(shared.field_names(), vec!["a", "b"]);
    }

    #[test]
    #[should_panic(expected = "would deadlock")]
    fn test_reentry_through_alias_panics() {
        let shared = SharedMetadata::new(Metadata::new());
        let alias = shared.clone();

        shared.with_mut(|_| alias.get_field("public"));
    }

    #[test]
    fn test_nested_access_to_other_record() {
        let a = SharedMetadata::new(Metadata::new());
        let b = SharedMetadata::new(Metadata::new());
        b.set_field("label", json!("B"));

        a.with_mut(|record| {
            record.insert("copied".into(), b.get_field("label").unwrap_or_default());
        });

        assert_eq!(a.get_field("copied"), Some(json!("B")));
    }
}
