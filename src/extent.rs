// 📚 Extent - the registry of every live instance of one type
//
// Records are kept in insertion order. Reads are public; every mutation goes
// through `Cinema` so links stay consistent on both sides.

use std::fmt;
use std::hash::Hash;

use crate::error::{CinemaError, Result};

// ============================================================================
// RECORD
// ============================================================================

/// A type that lives in an extent and is addressed by a typed id
pub trait Record {
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display;

    /// Human-readable entity name used in errors and logs
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;

    /// Re-check the attribute rules enforced at construction; used on
    /// records that arrive through deserialization
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Declares a UUID-backed identifier newtype
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                $name(uuid::Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use entity_id;

// ============================================================================
// EXTENT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Extent<T> {
    records: Vec<T>,
}

impl<T> Default for Extent<T> {
    fn default() -> Self {
        Extent {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Extent<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, in registration order
    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Like `get`, but a missing id is an error
    pub fn require(&self, id: T::Id) -> Result<&T> {
        self.get(id).ok_or_else(|| CinemaError::missing(T::ENTITY, id))
    }

    pub(crate) fn require_mut(&mut self, id: T::Id) -> Result<&mut T> {
        self.records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| CinemaError::missing(T::ENTITY, id))
    }

    pub(crate) fn register(&mut self, record: T) {
        self.records.push(record);
    }

    /// Removes and returns the record, keeping the order of the rest
    pub(crate) fn deregister(&mut self, id: T::Id) -> Result<T> {
        let index = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| CinemaError::missing(T::ENTITY, id))?;
        Ok(self.records.remove(index))
    }

    /// Bulk replacement used by loading; no merge with existing state
    pub(crate) fn replace(&mut self, records: Vec<T>) {
        self.records = records;
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a, T> IntoIterator for &'a Extent<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Removes the first occurrence of `id` from an ordered id list
pub(crate) fn unlink<I: PartialEq>(ids: &mut Vec<I>, id: &I) -> bool {
    match ids.iter().position(|x| x == id) {
        Some(index) => {
            ids.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    entity_id!(ThingId);

    #[derive(Debug, Clone, PartialEq)]
    struct Thing {
        id: ThingId,
        label: &'static str,
    }

    impl Record for Thing {
        type Id = ThingId;
        const ENTITY: &'static str = "Thing";

        fn id(&self) -> ThingId {
            self.id
        }
    }

    fn thing(label: &'static str) -> Thing {
        Thing {
            id: ThingId::new(),
            label,
        }
    }

    #[test]
    fn test_register_keeps_insertion_order() {
        let mut extent = Extent::new();
        extent.register(thing("a"));
        extent.register(thing("b"));
        extent.register(thing("c"));

        let labels: Vec<&str> = extent.iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_deregister_removes_only_target() {
        let mut extent = Extent::new();
        let a = thing("a");
        let b = thing("b");
        let b_id = b.id;
        extent.register(a);
        extent.register(b);
        extent.register(thing("c"));

        let removed = extent.deregister(b_id).unwrap();
        assert_eq!(removed.label, "b");
        assert_eq!(extent.len(), 2);
        assert!(!extent.contains(b_id));
        assert_eq!(extent.all()[1].label, "c");
    }

    #[test]
    fn test_deregister_unknown_is_missing() {
        let mut extent: Extent<Thing> = Extent::new();
        let result = extent.deregister(ThingId::new());
        assert!(matches!(result, Err(CinemaError::Missing { entity: "Thing", .. })));
    }

    #[test]
    fn test_replace_discards_previous_records() {
        let mut extent = Extent::new();
        extent.register(thing("old"));
        extent.replace(vec![thing("x"), thing("y")]);

        assert_eq!(extent.len(), 2);
        assert_eq!(extent.all()[0].label, "x");
    }

    #[test]
    fn test_unlink_helper() {
        let mut ids = vec![1, 2, 3];
        assert!(unlink(&mut ids, &2));
        assert!(!unlink(&mut ids, &9));
        assert_eq!(ids, vec![1, 3]);
    }
}
