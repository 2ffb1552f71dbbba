//! Package identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Name of a package in the registry.
///
/// Equality, ordering and hashing are those of the underlying text: no
/// normalisation or case folding is applied, so `Prelude` and `prelude`
/// are two different packages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Wrap raw text as a package name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the underlying text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PackageName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for PackageName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet};

    #[test]
    fn test_identity_is_exact_text() {
        assert_eq!(PackageName::from("prelude"), PackageName::new("prelude".to_string()));
        assert_ne!(PackageName::from("prelude"), PackageName::from("Prelude"));
        assert_ne!(PackageName::from("prelude"), PackageName::from("prelude "));
    }

    #[test]
    fn test_usable_as_map_key() {
        let mut set = HashSet::new();
        set.insert(PackageName::from("effect"));
        set.insert(PackageName::from("effect"));
        set.insert(PackageName::from("console"));
        assert_eq!(set.len(), 2);

        let mut map = BTreeMap::new();
        map.insert(PackageName::from("prelude"), 1);
        map.insert(PackageName::from("console"), 2);
        // Borrow<str> lets callers look up by plain text
        assert_eq!(map.get("prelude"), Some(&1));
        let keys: Vec<&str> = map.keys().map(PackageName::as_str).collect();
        assert_eq!(keys, vec!["console", "prelude"]);
    }

    #[test]
    fn test_serializes_as_bare_string() {
        let name = PackageName::from("arrays");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"arrays\"");

        let parsed: PackageName = serde_json::from_str("\"arrays\"").unwrap();
        assert_eq!(parsed, name);
        assert_eq!(parsed.to_string(), "arrays");
    }
}
