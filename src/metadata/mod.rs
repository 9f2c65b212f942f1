//! Read-only tables that drive graph rendering: package descriptions, the
//! category hierarchy, builtin packages per Emacs version and the graph title.
//!
//! Defaults are compiled in. A TOML file may replace any table; see [`config`].

pub mod builtins;
pub mod catalog;
pub mod config;

pub use builtins::BuiltinRegistry;
pub use catalog::{CategoryHierarchy, CategoryNode, PackageCatalog};

use chrono::NaiveDate;

pub const DEFAULT_TITLE_TEMPLATE: &str = "Emacs Package Dependencies\n({repo})\n{date}";

/// Title template with `{repo}` and `{date}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphTitle {
    template: String,
}

impl GraphTitle {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn render(&self, repo: &str, date: NaiveDate) -> String {
        self.template
            .replace("{repo}", repo)
            .replace("{date}", &date.format("%Y-%m-%d").to_string())
    }

    /// Renders with today's local date.
    pub fn render_today(&self, repo: &str) -> String {
        self.render(repo, chrono::Local::now().date_naive())
    }
}

impl Default for GraphTitle {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE_TEMPLATE)
    }
}

/// Everything the graph builder needs besides the scan result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub catalog: PackageCatalog,
    pub builtins: BuiltinRegistry,
    pub title: GraphTitle,
}
