pub mod package_requires;

pub use package_requires::{extract_dependency_names, parse_header_line, PackageRequiresParser};
