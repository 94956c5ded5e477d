use super::dot::to_dot;
use crate::domain::{ConceptGraph, ConceptMapBundle, ConceptMapPaths};
use crate::error::ConceptMapError;
use crate::utils::{detail_file_stem, level_file_stem, OVERVIEW_FILE_STEM};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;

pub trait GraphRenderer: Send + Sync {
    fn render(&self, graph: &ConceptGraph, name: &str) -> Result<PathBuf, ConceptMapError>;
}

#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    dot_binary: PathBuf,
    output_dir: PathBuf,
}

impl GraphvizRenderer {
    pub fn new(dot_binary: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            dot_binary: dot_binary.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl GraphRenderer for GraphvizRenderer {
    fn render(&self, graph: &ConceptGraph, name: &str) -> Result<PathBuf, ConceptMapError> {
        fs::create_dir_all(&self.output_dir)?;
        let target = self.output_dir.join(format!("{}.png", name));

        let mut child = Command::new(&self.dot_binary)
            .arg("-Tpng")
            .arg("-o")
            .arg(&target)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                ConceptMapError::Render(format!(
                    "failed to spawn {}: {}",
                    self.dot_binary.display(),
                    err
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(to_dot(graph).as_bytes()).map_err(|err| {
                ConceptMapError::Render(format!("failed to send graph to dot: {}", err))
            })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|err| ConceptMapError::Render(format!("dot did not finish: {}", err)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConceptMapError::Render(format!(
                "dot failed (exit={:?}): {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        info!(path = %target.display(), kind = %graph.kind, "concept map saved");
        Ok(target)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Renders every graph of `bundle` under its fixed file name and returns the
/// image names relative to the renderer's output directory.
pub fn render_bundle(
    renderer: &dyn GraphRenderer,
    bundle: &ConceptMapBundle,
) -> Result<ConceptMapPaths, ConceptMapError> {
    let overview = file_name(&renderer.render(&bundle.overview, OVERVIEW_FILE_STEM)?);

    let mut bloom_levels = Vec::with_capacity(bundle.level_graphs.len());
    for (level, graph) in bundle.level_graphs.iter() {
        let path = renderer.render(graph, &level_file_stem(level))?;
        bloom_levels.push((level.to_string(), file_name(&path)));
    }

    let mut detailed = Vec::with_capacity(bundle.detail_graphs.len());
    for (subconcept, graph) in bundle.detail_graphs.iter() {
        let path = renderer.render(graph, &detail_file_stem(subconcept))?;
        detailed.push((subconcept.to_string(), file_name(&path)));
    }

    Ok(ConceptMapPaths {
        overview,
        bloom_levels,
        detailed,
    })
}
