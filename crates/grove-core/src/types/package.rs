//! Package registry entries.
//!
//! A `Package` describes where to fetch a package from and which other
//! registry entries it depends on.

use super::PackageName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registry of available packages keyed by name
pub type Packages = BTreeMap<PackageName, Package>;

/// A package in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Packages this one depends on, in source order (duplicates are kept)
    pub dependencies: Vec<PackageName>,
    /// Git URL of the package repository
    pub repo: String,
    /// Git ref or tag to check out
    pub version: String,
}

impl Package {
    /// Create a new package entry
    pub fn new(dependencies: Vec<PackageName>, repo: String, version: String) -> Self {
        Self {
            dependencies,
            repo,
            version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console() -> Package {
        Package::new(
            vec!["effect".into(), "prelude".into()],
            "https://github.com/purescript/purescript-console.git".to_string(),
            "v4.2.0".to_string(),
        )
    }

    #[test]
    fn test_package_creation() {
        let pkg = console();
        assert_eq!(pkg.dependencies.len(), 2);
        assert_eq!(pkg.version, "v4.2.0");
        assert_eq!(pkg.dependencies[0], PackageName::from("effect"));
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(console()).unwrap();
        assert_eq!(json["dependencies"], serde_json::json!(["effect", "prelude"]));
        assert_eq!(json["repo"], "https://github.com/purescript/purescript-console.git");
        assert_eq!(json["version"], "v4.2.0");
    }

    #[test]
    fn test_duplicate_dependencies_are_preserved() {
        let pkg = Package::new(
            vec!["prelude".into(), "prelude".into()],
            "https://example.com/repo.git".to_string(),
            "master".to_string(),
        );
        let json = serde_json::to_string(&pkg).unwrap();
        let back: Package = serde_json::from_str(&json).unwrap();
        assert_eq!(back.dependencies.len(), 2);
        assert_eq!(back, pkg);
    }
}
