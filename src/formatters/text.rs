use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use crate::core::DependencyMap;

/// Plain-text dependency report, one line per package.
pub struct TextFormatter {
    indent: &'static str,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self { indent: "  " }
    }

    pub fn format(&self, deps: &DependencyMap) -> String {
        let mut output = String::from("Detected Package Dependencies:\n");
        if deps.is_empty() {
            let _ = writeln!(output, "{}No dependencies found.", self.indent);
            return output;
        }
        for (package, requirements) in deps {
            let _ = writeln!(
                output,
                "{}- {}: {}",
                self.indent,
                package,
                format_set(requirements)
            );
        }
        output
    }

    /// Lists dependency names that no scanned package or builtin provides.
    pub fn format_missing(&self, missing: &BTreeMap<String, BTreeSet<String>>) -> String {
        let mut output = String::from("Missing Dependencies:\n");
        if missing.is_empty() {
            let _ = writeln!(output, "{}None.", self.indent);
            return output;
        }
        for (dependency, required_by) in missing {
            let _ = writeln!(
                output,
                "{}- {} (required by {})",
                self.indent,
                dependency,
                required_by.iter().cloned().collect::<Vec<_>>().join(", ")
            );
        }
        output
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_set(names: &BTreeSet<String>) -> String {
    let joined: Vec<&str> = names.iter().map(String::as_str).collect();
    format!("{{{}}}", joined.join(", "))
}
