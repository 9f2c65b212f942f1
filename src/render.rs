//! Hand-off to the Graphviz layout engine.

use clap::ValueEnum;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::RenderError;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
    Pdf,
}

impl ImageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }
}

/// Turns DOT source into an image.
pub trait GraphRenderer {
    /// Writes `dot` next to `output` and returns the path of the image produced.
    fn render(&self, dot: &str, output: &Path) -> Result<PathBuf, RenderError>;
}

/// Image path for a given source path: the format's extension is appended,
/// so `deps` becomes `deps.png`.
pub fn image_path(output: &Path, format: ImageFormat) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".");
    name.push(format.as_str());
    PathBuf::from(name)
}

/// Runs the Graphviz `dot` program.
pub struct GraphvizRenderer {
    program: String,
    format: ImageFormat,
}

impl GraphvizRenderer {
    pub fn new(format: ImageFormat) -> Self {
        Self {
            program: "dot".to_string(),
            format,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl GraphRenderer for GraphvizRenderer {
    fn render(&self, dot: &str, output: &Path) -> Result<PathBuf, RenderError> {
        fs::write(output, dot).map_err(|source| RenderError::WriteSource {
            path: output.to_path_buf(),
            source,
        })?;

        let image = image_path(output, self.format);
        tracing::info!(
            program = %self.program,
            image = %image.display(),
            "rendering graph"
        );

        let result = Command::new(&self.program)
            .arg(format!("-T{}", self.format.as_str()))
            .arg("-o")
            .arg(&image)
            .arg(output)
            .output()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(RenderError::Failed {
                program: self.program.clone(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(image)
    }
}

/// Writes the DOT source only; no layout engine is involved.
pub struct DotSourceRenderer;

impl GraphRenderer for DotSourceRenderer {
    fn render(&self, dot: &str, output: &Path) -> Result<PathBuf, RenderError> {
        fs::write(output, dot).map_err(|source| RenderError::WriteSource {
            path: output.to_path_buf(),
            source,
        })?;
        Ok(output.to_path_buf())
    }
}
