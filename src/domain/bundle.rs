use super::graph::{ConceptGraph, GraphKind};
use super::taxonomy::TaxonomyLevels;
use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Graphs keyed by a label, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphMap {
    entries: Vec<(String, ConceptGraph)>,
}

impl GraphMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ConceptGraph> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, g)| g)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get_or_insert_with(
        &mut self,
        key: &str,
        init: impl FnOnce() -> ConceptGraph,
    ) -> &mut ConceptGraph {
        let index = match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.entries.push((key.to_string(), init()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Inserts or replaces the graph under `key`, keeping its original position.
    pub fn insert(&mut self, key: impl Into<String>, graph: ConceptGraph) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = graph,
            None => self.entries.push((key, graph)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConceptGraph)> {
        self.entries.iter().map(|(k, g)| (k.as_str(), g))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything one build produces: the overview graph, one graph per taxonomy
/// level that at least one sub-concept was tagged with, and one detail graph per
/// sub-concept whose expansion succeeded.
#[derive(Debug, Clone)]
pub struct ConceptMapBundle {
    pub main_concept: String,
    pub taxonomy: TaxonomyLevels,
    pub overview: ConceptGraph,
    pub level_graphs: GraphMap,
    pub detail_graphs: GraphMap,
    pub generated_at: DateTime<Utc>,
}

impl ConceptMapBundle {
    pub fn new(main_concept: &str, taxonomy: TaxonomyLevels) -> Self {
        let main_concept = main_concept.trim().to_string();
        Self {
            overview: ConceptGraph::rooted(
                GraphKind::Overview,
                format!("Main {} Concept Map", main_concept),
                &main_concept,
            ),
            main_concept,
            taxonomy,
            level_graphs: GraphMap::new(),
            detail_graphs: GraphMap::new(),
            generated_at: Utc::now(),
        }
    }

    /// Level graphs in taxonomy order, followed by any graphs keyed by a level
    /// string outside the configured taxonomy, in the order they were created.
    pub fn levels_in_order(&self) -> Vec<(&str, &ConceptGraph)> {
        let mut ordered: Vec<(&str, &ConceptGraph)> = self
            .taxonomy
            .iter()
            .filter_map(|level| self.level_graphs.get(level).map(|g| (level, g)))
            .collect();
        ordered.extend(
            self.level_graphs
                .iter()
                .filter(|(level, _)| !self.taxonomy.contains(level)),
        );
        ordered
    }

    pub fn graph_count(&self) -> usize {
        1 + self.level_graphs.len() + self.detail_graphs.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConceptMapPaths {
    pub overview: String,
    #[serde(serialize_with = "serialize_pairs")]
    pub bloom_levels: Vec<(String, String)>,
    #[serde(serialize_with = "serialize_pairs")]
    pub detailed: Vec<(String, String)>,
}

impl ConceptMapPaths {
    pub fn level(&self, level: &str) -> Option<&str> {
        lookup(&self.bloom_levels, level)
    }

    pub fn detail(&self, subconcept: &str) -> Option<&str> {
        lookup(&self.detailed, subconcept)
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn serialize_pairs<S: Serializer>(pairs: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (key, value) in pairs {
        map.serialize_entry(key, value)?;
    }
    map.end()
}
