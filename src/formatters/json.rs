use anyhow::Result;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::core::DependencyMap;

/// JSON report: an object mapping each package to an array of its dependencies.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn format_to_file(&self, deps: &DependencyMap, output_path: &Path) -> Result<()> {
        let json_content = self.format(deps)?;
        fs::write(output_path, json_content)?;
        Ok(())
    }

    pub fn format(&self, deps: &DependencyMap) -> Result<String> {
        let output: Map<String, Value> = deps
            .iter()
            .map(|(package, requirements)| {
                let names = requirements.iter().cloned().map(Value::String).collect();
                (package.clone(), Value::Array(names))
            })
            .collect();
        let output = Value::Object(output);

        if self.pretty {
            Ok(serde_json::to_string_pretty(&output)?)
        } else {
            Ok(serde_json::to_string(&output)?)
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
