use std::collections::{BTreeMap, BTreeSet};

use super::DependencyMap;

/// Dependency names that are neither scanned packages nor builtins, each
/// mapped to the packages that require it.
pub fn missing_dependencies(
    deps: &DependencyMap,
    builtins: &BTreeSet<String>,
) -> BTreeMap<String, BTreeSet<String>> {
    let mut missing: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (package, requirements) in deps {
        for requirement in requirements {
            if deps.contains_key(requirement) || builtins.contains(requirement) {
                continue;
            }
            missing
                .entry(requirement.clone())
                .or_default()
                .insert(package.clone());
        }
    }
    missing
}
