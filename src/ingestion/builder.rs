use super::model::{ModelClient, DEFAULT_MAX_TOKENS};
use super::prompt::{expansion_prompt, extraction_prompt, taxonomy_prompt};
use super::response::{parse, parse_expansion};
use super::validator::{ParsedStructure, SubconceptDescriptor};
use crate::domain::{ConceptGraph, ConceptMapBundle, GraphKind, TaxonomyLevels};
use crate::error::ConceptMapError;
use once_cell::sync::OnceCell;
use tracing::{info, warn};

/// The taxonomy levels are resolved lazily on the first build and reused for
/// the lifetime of the builder. Construct a new builder to fetch them again.
pub struct ConceptGraphBuilder {
    client: ModelClient,
    levels: OnceCell<TaxonomyLevels>,
}

impl ConceptGraphBuilder {
    pub fn new(client: ModelClient) -> Self {
        Self {
            client,
            levels: OnceCell::new(),
        }
    }

    pub fn with_levels(client: ModelClient, levels: TaxonomyLevels) -> Self {
        Self {
            client,
            levels: OnceCell::with_value(levels),
        }
    }

    pub fn taxonomy_levels(&self) -> &TaxonomyLevels {
        self.levels.get_or_init(|| self.fetch_levels())
    }

    fn fetch_levels(&self) -> TaxonomyLevels {
        let fetched = match self.client.complete(&taxonomy_prompt(), DEFAULT_MAX_TOKENS) {
            Ok(text) => TaxonomyLevels::from_model_output(&text),
            Err(err) => {
                warn!(error = %err, "taxonomy level request failed");
                None
            }
        };
        match fetched {
            Some(levels) => {
                info!(levels = %levels.join(", "), "taxonomy levels resolved");
                levels
            }
            None => {
                warn!("using the default Bloom's taxonomy levels");
                TaxonomyLevels::default()
            }
        }
    }

    /// Builds the overview, level and detail graphs for `text`.
    ///
    /// Failing to obtain or parse the key-concept extraction aborts the build.
    /// A failed expansion only drops that sub-concept's detail graph.
    pub fn build(&self, text: &str) -> Result<ConceptMapBundle, ConceptMapError> {
        let levels = self.taxonomy_levels().clone();
        let raw = self
            .client
            .complete(&extraction_prompt(text, &levels), DEFAULT_MAX_TOKENS)?;
        let extraction = parse(&raw).map_err(|err| {
            warn!(error = %err, response = %raw, "key concept extraction could not be parsed");
            err
        })?;

        let mut bundle = ConceptMapBundle::new(&extraction.main_concept, levels);
        self.add_extraction(&mut bundle, &extraction);

        for subconcept in &extraction.subconcepts {
            match self.expand(&subconcept.name) {
                Ok(graph) => bundle.detail_graphs.insert(subconcept.name.clone(), graph),
                Err(err) => warn!(
                    subconcept = %subconcept.name,
                    error = %err,
                    "skipping detailed map"
                ),
            }
        }

        info!(
            main_concept = %bundle.main_concept,
            subconcepts = extraction.subconcepts.len(),
            level_graphs = bundle.level_graphs.len(),
            detail_graphs = bundle.detail_graphs.len(),
            "concept graphs built"
        );
        Ok(bundle)
    }

    fn add_extraction(&self, bundle: &mut ConceptMapBundle, extraction: &ParsedStructure) {
        let main = bundle.main_concept.clone();
        for subconcept in &extraction.subconcepts {
            bundle.overview.add_edge(&main, &subconcept.name);
            match subconcept.level.as_deref() {
                Some(level) => {
                    bundle.overview.tag_level(&subconcept.name, level);
                    add_to_level_graph(bundle, level, subconcept);
                }
                None => warn!(
                    subconcept = %subconcept.name,
                    "sub-concept has no taxonomy level, leaving it out of the level maps"
                ),
            }
        }
    }

    pub fn expand(&self, subconcept: &str) -> Result<ConceptGraph, ConceptMapError> {
        let raw = self
            .client
            .complete(&expansion_prompt(subconcept), DEFAULT_MAX_TOKENS)?;
        let expansion = parse_expansion(&raw, subconcept)?;

        let mut graph = ConceptGraph::rooted(
            GraphKind::Detail,
            format!("Detailed Map: {}", subconcept),
            subconcept,
        );
        let root = graph.root().unwrap_or(subconcept).to_string();
        for related in &expansion.subconcepts {
            graph.add_edge(&root, &related.name);
            for child in &related.children {
                graph.add_edge(&related.name, child);
            }
        }
        Ok(graph)
    }
}

/// Level graphs are keyed by the level string exactly as the model wrote it.
fn add_to_level_graph(bundle: &mut ConceptMapBundle, level: &str, subconcept: &SubconceptDescriptor) {
    let graph = bundle.level_graphs.get_or_insert_with(level, || {
        ConceptGraph::rooted(GraphKind::Level, format!("Bloom's Level: {}", level), level)
    });
    graph.add_edge(level, &subconcept.name);
    graph.tag_level(&subconcept.name, level);
    for child in &subconcept.children {
        graph.add_edge(&subconcept.name, child);
    }
}
