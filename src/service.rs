use crate::config::AppConfig;
use crate::domain::{ConceptMapPaths, TaxonomyLevels};
use crate::error::ConceptMapError;
use crate::ingestion::ConceptGraphBuilder;
use crate::render::{render_bundle, GraphRenderer, GraphvizRenderer};
use crate::summary::Summarizer;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub summary: String,
    pub concept_maps: ConceptMapPaths,
    pub generated_at: DateTime<Utc>,
}

/// Whole runs are serialized so that files written under the fixed artifact
/// names always belong to a single run. A later run still overwrites them.
pub struct ConceptMapService {
    builder: ConceptGraphBuilder,
    renderer: Arc<dyn GraphRenderer>,
    summarizer: Summarizer,
    output_dir: PathBuf,
    run_lock: Mutex<()>,
}

impl ConceptMapService {
    pub fn new(
        builder: ConceptGraphBuilder,
        renderer: Arc<dyn GraphRenderer>,
        summarizer: Summarizer,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            builder,
            renderer,
            summarizer,
            output_dir: output_dir.into(),
            run_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = config.model_client()?;
        let renderer = GraphvizRenderer::new(&config.dot_binary, &config.output_dir);
        let summarizer = Summarizer::new(client.clone(), &config.output_dir);
        info!(
            backend = ?config.backend,
            model = config.model_name(),
            output_dir = %config.output_dir.display(),
            "concept map service configured"
        );
        Ok(Self::new(
            ConceptGraphBuilder::new(client),
            Arc::new(renderer),
            summarizer,
            &config.output_dir,
        ))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn taxonomy_levels(&self) -> &TaxonomyLevels {
        self.builder.taxonomy_levels()
    }

    /// Runs the whole pipeline for `text`. Blocks for the duration of every
    /// model call and file write.
    pub fn generate(&self, text: &str) -> Result<GenerationOutcome, ConceptMapError> {
        let _run = self.run_lock.lock();
        let bundle = self.builder.build(text)?;
        let concept_maps = render_bundle(self.renderer.as_ref(), &bundle)?;
        let summary = self.summarizer.summarize_all(&bundle);
        info!(
            main_concept = %bundle.main_concept,
            graphs = bundle.graph_count(),
            generated_at = %bundle.generated_at.to_rfc3339(),
            "concept maps generated"
        );
        Ok(GenerationOutcome {
            summary,
            concept_maps,
            generated_at: bundle.generated_at,
        })
    }
}
