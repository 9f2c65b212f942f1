//! TOML overrides for the metadata tables.
//!
//! ```toml
//! title = "My Emacs\n({repo})\n{date}"
//!
//! [descriptions]
//! vundo = "Visual undo tree"
//!
//! [categories]
//! "Version control" = ["magit", "forge"]
//!
//! [categories.Completion]
//! packages = ["helm"]
//! "Vertico suite" = ["vertico", "orderless"]
//!
//! [builtins]
//! "30" = ["emacs", "cl-lib", "org", "transient"]
//! ```
//!
//! Every section that is present replaces the compiled-in table as a whole.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use super::{BuiltinRegistry, CategoryHierarchy, CategoryNode, GraphTitle, Metadata};
use crate::error::MetadataError;

pub const CONFIG_FILENAME: &str = "eldeps.toml";

/// Key of a category table holding the packages that belong to it directly.
pub const DIRECT_PACKAGES_KEY: &str = "packages";

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub title: Option<String>,
    pub descriptions: Option<BTreeMap<String, String>>,
    pub categories: Option<toml::Table>,
    pub builtins: Option<BTreeMap<String, BTreeSet<String>>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, toml::Value>,
}

impl ConfigFile {
    pub fn parse(content: &str, path: &Path) -> Result<Self, MetadataError> {
        toml::from_str(content).map_err(|source| MetadataError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies the overrides on top of `base`.
    pub fn apply(self, base: Metadata) -> Result<Metadata, MetadataError> {
        for key in self.unknown_fields.keys() {
            tracing::warn!("Unknown config field '{}' will be ignored.", key);
        }

        let mut metadata = base;
        if let Some(title) = self.title {
            metadata.title = GraphTitle::new(title);
        }
        if let Some(descriptions) = self.descriptions {
            metadata.catalog.descriptions = descriptions;
        }
        if let Some(categories) = self.categories {
            metadata.catalog.categories = parse_categories(&categories)?;
        }
        if let Some(builtins) = self.builtins {
            metadata.builtins = BuiltinRegistry::new(builtins);
        }
        Ok(metadata)
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile, MetadataError> {
    let content = std::fs::read_to_string(path).map_err(|source| MetadataError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    ConfigFile::parse(&content, path)
}

/// Looks for [`CONFIG_FILENAME`] in `dir`. Returns `None` if it is absent.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>, MetadataError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.is_file() {
        return Ok(None);
    }
    tracing::debug!(path = %config_path.display(), "using discovered config");
    load_config_from_path(&config_path).map(Some)
}

/// Builds the metadata for a run: compiled-in defaults, overridden by
/// `explicit` if given, else by a config discovered in `search_dir`.
pub fn load_metadata(explicit: Option<&Path>, search_dir: &Path) -> Result<Metadata, MetadataError> {
    let config = match explicit {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(search_dir)?,
    };
    match config {
        Some(config) => config.apply(Metadata::default()),
        None => Ok(Metadata::default()),
    }
}

/// Converts a `[categories]` table into a hierarchy, keeping file order.
///
/// Arrays become leaves; tables become groups whose `packages` key lists
/// their direct members.
pub fn parse_categories(table: &toml::Table) -> Result<CategoryHierarchy, MetadataError> {
    let mut roots = Vec::with_capacity(table.len());
    for (name, value) in table {
        roots.push((name.clone(), parse_category(name, value)?));
    }
    Ok(CategoryHierarchy::new(roots))
}

fn parse_category(path: &str, value: &toml::Value) -> Result<CategoryNode, MetadataError> {
    match value {
        toml::Value::Array(items) => Ok(CategoryNode::Leaf(parse_package_list(path, items)?)),
        toml::Value::Table(table) => {
            let mut children = Vec::new();
            let mut packages = Vec::new();
            for (name, child) in table {
                let child_path = format!("{path}.{name}");
                if name == DIRECT_PACKAGES_KEY {
                    let toml::Value::Array(items) = child else {
                        return Err(MetadataError::InvalidCategory { path: child_path });
                    };
                    packages = parse_package_list(&child_path, items)?;
                } else {
                    children.push((name.clone(), parse_category(&child_path, child)?));
                }
            }
            Ok(CategoryNode::Group { children, packages })
        }
        _ => Err(MetadataError::InvalidCategory {
            path: path.to_string(),
        }),
    }
}

fn parse_package_list(path: &str, items: &[toml::Value]) -> Result<Vec<String>, MetadataError> {
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| MetadataError::InvalidPackageName {
                    path: path.to_string(),
                })
        })
        .collect()
}
