//! Identifier management using string interning for efficient storage and comparison
//!
//! This module provides the [`Id`] type used to identify nodes and links.
//! Identities arrive from external data as strings; interning makes them
//! copy-cheap and makes equality checks symbol comparisons, which matters
//! because identities are compared on every simulation tick.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// Efficient identifier type using string interning.
///
/// Node and link identities are unique and stable across simulation ticks.
///
/// # Examples
///
/// ```
/// use weft_core::identifier::Id;
///
/// let node_id = Id::new("person_42");
/// let same = Id::new("person_42");
/// assert_eq!(node_id, same);
/// assert_eq!(node_id, "person_42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        interner.resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_names_intern_to_equal_ids() {
        let a = Id::new("alpha");
        let b = Id::new("alpha");
        let c = Id::new("beta");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_roundtrips_the_name() {
        let id = Id::new("some_node");
        assert_eq!(id.to_string(), "some_node");
        assert_eq!(id, "some_node");
    }

    #[test]
    fn ids_are_copy_and_hashable() {
        use std::collections::HashSet;

        let id = Id::new("n1");
        let copy = id;
        let mut set = HashSet::new();
        set.insert(id);

        assert!(set.contains(&copy));
    }
}
