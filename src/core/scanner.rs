use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::ScanError;
use crate::parsers::PackageRequiresParser;

/// Extension of Emacs Lisp source files, without the dot.
pub const SOURCE_EXTENSION: &str = "el";

/// Leading character of hidden directory names.
pub const HIDDEN_MARKER: char = '.';

/// Package name to the names of its direct dependencies.
pub type DependencyMap = BTreeMap<String, BTreeSet<String>>;

/// Derives a package name from its directory name.
///
/// `foo.el` becomes `foo`; hidden names and names without the suffix are
/// used verbatim.
pub fn package_name_for_dir(dir_name: &str) -> String {
    let suffix = format!(".{SOURCE_EXTENSION}");
    if !dir_name.starts_with(HIDDEN_MARKER) {
        if let Some(stripped) = dir_name.strip_suffix(&suffix) {
            return stripped.to_string();
        }
    }
    dir_name.to_string()
}

/// Picks the file that carries a package's headers.
///
/// A lone source file always wins. Otherwise `<package_name>.el` is the main
/// file if it exists.
pub fn resolve_main_file<'a>(package_name: &str, source_files: &'a [PathBuf]) -> Option<&'a PathBuf> {
    if let [only] = source_files {
        return Some(only);
    }
    let expected = format!("{package_name}.{SOURCE_EXTENSION}");
    source_files
        .iter()
        .find(|path| path.file_name().is_some_and(|name| name == expected.as_str()))
}

pub struct PackageScanner {
    parser: PackageRequiresParser,
    main_file_only: bool,
}

impl PackageScanner {
    pub fn new() -> Self {
        Self {
            parser: PackageRequiresParser::new(),
            main_file_only: true,
        }
    }

    pub fn with_main_file_only(mut self, main_file_only: bool) -> Self {
        self.main_file_only = main_file_only;
        self
    }

    pub fn main_file_only(&self) -> bool {
        self.main_file_only
    }

    /// Scans every package directory directly under `repo_path`.
    ///
    /// Every package found is present in the result, with an empty set when
    /// it declares nothing.
    pub fn scan(&self, repo_path: &Path) -> Result<DependencyMap, ScanError> {
        if !repo_path.is_dir() {
            return Err(ScanError::NotADirectory {
                path: repo_path.to_path_buf(),
            });
        }

        let mut dependencies = DependencyMap::new();

        for package_dir in self.package_dirs(repo_path)? {
            let dir_name = package_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let package_name = package_name_for_dir(&dir_name);

            let source_files = self.source_files(&package_dir);
            tracing::debug!(
                package = %package_name,
                dir = %package_dir.display(),
                files = source_files.len(),
                "scanning package"
            );

            let to_scan: Vec<&PathBuf> = if self.main_file_only {
                match resolve_main_file(&package_name, &source_files) {
                    Some(main_file) => vec![main_file],
                    None => {
                        tracing::debug!(package = %package_name, "no main file, skipping");
                        Vec::new()
                    }
                }
            } else {
                source_files.iter().collect()
            };

            // Directories that collapse to the same name share one entry.
            let package_deps = dependencies.entry(package_name).or_default();
            for file_path in to_scan {
                match self.parser.parse_file(file_path) {
                    Ok(found) => package_deps.extend(found),
                    Err(err) if err.kind() == ErrorKind::NotFound => {}
                    Err(err) => {
                        tracing::warn!(
                            "Error reading or processing file '{}': {}",
                            file_path.display(),
                            err
                        );
                    }
                }
            }
        }

        tracing::info!(
            packages = dependencies.len(),
            repo = %repo_path.display(),
            "scan complete"
        );
        Ok(dependencies)
    }

    fn package_dirs(&self, repo_path: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let mut dirs = Vec::new();
        for entry in WalkDir::new(repo_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| ScanError::ReadDir {
                path: repo_path.to_path_buf(),
                source,
            })?;
            if entry.path().is_dir() {
                dirs.push(entry.into_path());
            }
        }
        Ok(dirs)
    }

    fn source_files(&self, package_dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(package_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Failed to read entry in '{}': {}", package_dir.display(), err);
                    None
                }
            })
            .filter(|entry| entry.path().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == SOURCE_EXTENSION)
            })
            .map(|entry| entry.into_path())
            .collect()
    }
}

impl Default for PackageScanner {
    fn default() -> Self {
        Self::new()
    }
}
