//! Project configuration decoded from a manifest.

use super::{Package, PackageName, Packages};
use serde::{Deserialize, Serialize};

/// One project's manifest: its name, direct dependencies and package registry.
///
/// Direct dependencies are not required to exist in `packages`; checking that
/// is left to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Project name
    pub name: String,
    /// Direct dependencies in source order
    pub dependencies: Vec<PackageName>,
    /// Available packages
    pub packages: Packages,
}

impl Config {
    /// Create a new configuration
    pub fn new(name: String, dependencies: Vec<PackageName>, packages: Packages) -> Self {
        Self {
            name,
            dependencies,
            packages,
        }
    }

    /// Look up a registry entry by name
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Direct dependencies that have no registry entry
    pub fn missing_dependencies(&self) -> Vec<&PackageName> {
        self.dependencies
            .iter()
            .filter(|dep| !self.packages.contains_key(dep.as_str()))
            .collect()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_package()(
            dependencies in prop::collection::vec("[a-z][a-z0-9-]{0,10}", 0..4),
            repo in "https://[a-z]{1,10}\\.com/[a-z]{1,10}\\.git",
            version in "v[0-9]\\.[0-9]\\.[0-9]",
        ) -> Package {
            Package::new(dependencies.into_iter().map(PackageName::from).collect(), repo, version)
        }
    }

    prop_compose! {
        fn arb_config()(
            name in "[a-z][a-z0-9-]{0,20}",
            dependencies in prop::collection::vec("[a-z][a-z0-9-]{0,10}", 0..5),
            packages in prop::collection::btree_map("[a-z][a-z0-9-]{0,10}", arb_package(), 0..5),
        ) -> Config {
            Config::new(
                name,
                dependencies.into_iter().map(PackageName::from).collect(),
                packages.into_iter().map(|(k, v)| (PackageName::from(k), v)).collect(),
            )
        }
    }

    proptest! {
        #[test]
        fn json_round_trip(config in arb_config()) {
            let serialized = serde_json::to_string(&config).unwrap();
            let parsed: Config = serde_json::from_str(&serialized).unwrap();
            prop_assert_eq!(config, parsed);
        }
    }
}
