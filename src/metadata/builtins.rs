use std::collections::{BTreeMap, BTreeSet};

use crate::error::MetadataError;

/// Packages shipped with each Emacs version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinRegistry {
    versions: BTreeMap<String, BTreeSet<String>>,
}

impl BuiltinRegistry {
    pub fn new(versions: BTreeMap<String, BTreeSet<String>>) -> Self {
        Self { versions }
    }

    /// Known version identifiers, in ascending key order.
    pub fn versions(&self) -> Vec<&str> {
        self.versions.keys().map(String::as_str).collect()
    }

    /// The last version in key order, used when none is requested.
    pub fn latest_version(&self) -> Option<&str> {
        self.versions.keys().next_back().map(String::as_str)
    }

    pub fn get(&self, version: &str) -> Option<&BTreeSet<String>> {
        self.versions.get(version)
    }

    pub fn is_builtin(&self, version: &str, package: &str) -> bool {
        self.get(version).is_some_and(|set| set.contains(package))
    }

    /// Looks up `version`, failing with the list of known versions.
    pub fn validate_version(&self, version: &str) -> Result<&BTreeSet<String>, MetadataError> {
        self.get(version).ok_or_else(|| MetadataError::UnknownVersion {
            version: version.to_string(),
            known: self.versions().into_iter().map(str::to_string).collect(),
        })
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        let emacs_30 = ["emacs", "cl-lib", "org", "transient"]
            .into_iter()
            .map(str::to_string)
            .collect();
        Self::new(BTreeMap::from([("30".to_string(), emacs_30)]))
    }
}
