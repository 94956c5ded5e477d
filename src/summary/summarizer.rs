use crate::domain::{ConceptGraph, ConceptMapBundle};
use crate::ingestion::ModelClient;
use crate::utils::SUMMARY_FILE_NAME;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const SUMMARY_MAX_TOKENS: u32 = 200;

pub fn summary_prompt(title: &str, graph: &ConceptGraph) -> String {
    let nodes: Vec<String> = graph
        .nodes()
        .iter()
        .map(|node| format!("\"{}\"", node.name))
        .collect();
    let edges: Vec<String> = graph
        .edges()
        .iter()
        .map(|edge| format!("\"{}\"", edge))
        .collect();

    format!(
        concat!(
            "Analyze the following mind map represented as a graph:\n\n",
            "Map Title: {title}\n",
            "Nodes: [{nodes}]\n",
            "Edges: [{edges}]\n\n",
            "Provide a summary of the main ideas and their relationships based on this mind map.\n",
            "If this is a Bloom's Taxonomy level, explain how the concepts relate to that level of thinking.\n",
            "The summary should be about 100 words long and highlight the key connections and themes.\n"
        ),
        title = title,
        nodes = nodes.join(", "),
        edges = edges.join(", "),
    )
}

pub fn strip_emphasis(text: &str) -> String {
    text.replace('*', "").trim().to_string()
}

pub struct Summarizer {
    client: ModelClient,
    output_dir: PathBuf,
}

impl Summarizer {
    pub fn new(client: ModelClient, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
        }
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE_NAME)
    }

    /// Summary of one graph, or a placeholder naming the map if the model call fails.
    pub fn summarize_graph(&self, graph: &ConceptGraph) -> String {
        match self
            .client
            .complete(&summary_prompt(&graph.title, graph), SUMMARY_MAX_TOKENS)
        {
            Ok(summary) => summary.trim().to_string(),
            Err(err) => {
                warn!(map = %graph.title, error = %err, "summary request failed");
                format!("Failed to generate summary for {}.", graph.title)
            }
        }
    }

    /// Summarizes the overview, then level graphs in taxonomy order, then detail
    /// graphs in map order, writes the report to `concept_summary.txt` and
    /// returns it. Never fails: model errors become placeholders and a failed
    /// write is only logged.
    pub fn summarize_all(&self, bundle: &ConceptMapBundle) -> String {
        let overview = self.summarize_graph(&bundle.overview);
        let levels: Vec<String> = bundle
            .levels_in_order()
            .into_iter()
            .map(|(_, graph)| self.summarize_graph(graph))
            .collect();
        let details: Vec<String> = bundle
            .detail_graphs
            .iter()
            .map(|(_, graph)| self.summarize_graph(graph))
            .collect();

        let report = format!(
            "{main} Concepts Overview:\n\n{overview}\n\n\
             Bloom's Taxonomy Level Summaries:\n\n{levels}\n\n\
             Detailed Subconceptual Map Summaries:\n\n{details}",
            main = bundle.main_concept,
            overview = overview,
            levels = levels.join("\n\n"),
            details = details.join("\n\n"),
        );
        let report = strip_emphasis(&report);

        match write_report(&self.summary_path(), &report) {
            Ok(()) => info!(path = %self.summary_path().display(), "summary saved"),
            Err(err) => warn!(error = %err, "could not write the summary file"),
        }
        report
    }
}

fn write_report(path: &Path, report: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, report)
}
