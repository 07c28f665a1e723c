//! Node identifiers.
//!
//! Flow diagrams refer to the same node id many times (declaration, every edge
//! endpoint, adjacency and level tables). An [`Id`] owns its text behind a
//! reference count, so copies are cheap and nothing outlives the render call
//! that created it.

use std::{fmt, sync::Arc};

use serde::{Serialize, Serializer};

/// Identifier of a flow node.
///
/// Two ids compare equal exactly when their source text is equal.
///
/// # Examples
///
/// ```
/// use flowtier_core::identifier::Id;
///
/// let start = Id::new("start");
/// let again: Id = "start".into();
///
/// assert_eq!(start, again);
/// assert_eq!(start, "start");
/// assert_eq!(start.as_str(), "start");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(Arc<str>);

impl Id {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_equal_names_are_equal_ids() {
        let a = Id::new("task_a");
        let b = Id::new("task_a");
        let c = Id::new("task_b");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_round_trips_name() {
        let id = Id::new("Validate_Order_2");
        assert_eq!(format!("{id}"), "Validate_Order_2");
        assert_eq!(id.as_str(), "Validate_Order_2");
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("gateway1");

        assert!(id == "gateway1");
        assert!(id != "gateway");

        let name = String::from("gateway1");
        assert!(id == name.as_str());
    }

    #[test]
    fn test_hash_lookup() {
        let mut levels = HashMap::new();
        levels.insert(Id::new("s"), 0usize);
        levels.insert(Id::new("t"), 1usize);

        assert_eq!(levels.get(&Id::new("t")), Some(&1));
        assert_eq!(levels.len(), 2);
    }

    #[test]
    fn test_ordering_follows_text() {
        let mut ids = vec![Id::new("y"), Id::new("a"), Id::new("x")];
        ids.sort();
        assert_eq!(ids, [Id::new("a"), Id::new("x"), Id::new("y")]);
    }

    #[test]
    fn test_dropped_ids_release_their_text() {
        let id = Id::new("transient");
        let weak = Arc::downgrade(&id.0);
        let copy = id.clone();

        drop(id);
        assert!(weak.upgrade().is_some());
        drop(copy);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_ids_cross_threads() {
        let id = Id::new("shared");
        let handle = std::thread::spawn(move || id.to_string());
        assert_eq!(handle.join().unwrap(), "shared");
    }

    #[test]
    fn test_serialize_as_plain_string() {
        let json = serde_json::to_string(&Id::new("end")).unwrap();
        assert_eq!(json, "\"end\"");
    }
}
