//! Diagram rendering through an external program.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Turns a diagram source file into a raster image.
pub trait DiagramRenderer {
    /// Render `source` and return the path of the produced image.
    fn render(&self, source: &Path) -> Result<PathBuf>;
}

/// Renders Graphviz sources by invoking `dot -T<format> <src> -o <out>`.
///
/// The image is written next to the source with the format as extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphvizRenderer {
    program: String,
    format: String,
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self {
            program: "dot".to_string(),
            format: "png".to_string(),
        }
    }
}

impl GraphvizRenderer {
    /// Create a renderer using `dot` and PNG output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a different output format (`svg`, `pdf`, ...).
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Get the executable name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Get the output format.
    pub fn format(&self) -> &str {
        &self.format
    }
}

impl DiagramRenderer for GraphvizRenderer {
    fn render(&self, source: &Path) -> Result<PathBuf> {
        let output = source.with_extension(&self.format);
        log::debug!(
            "Running {} -T{} {} -o {}",
            self.program,
            self.format,
            source.display(),
            output.display()
        );

        let result = Command::new(&self.program)
            .arg(format!("-T{}", self.format))
            .arg(source)
            .arg("-o")
            .arg(&output)
            .output()
            .map_err(|e| {
                Error::RendererFailure(format!("cannot run {}: {}", self.program, e))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::RendererFailure(format!(
                "{} exited with {} for {}: {}",
                self.program,
                result.status,
                source.display(),
                stderr.trim()
            )));
        }
        if !output.is_file() {
            return Err(Error::RendererFailure(format!(
                "{} produced no image for {}",
                self.program,
                source.display()
            )));
        }
        Ok(output)
    }
}

/// Render every `*.dot` file in `dir`, in file name order.
///
/// Stops at the first failure.
pub fn render_directory<R: DiagramRenderer + ?Sized>(
    dir: &Path,
    renderer: &R,
) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "dot") {
            sources.push(path);
        }
    }
    sources.sort();

    log::info!("Rendering {} diagram(s) from {}", sources.len(), dir.display());
    sources.iter().map(|source| renderer.render(source)).collect()
}
