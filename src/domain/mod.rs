mod bundle;
mod concept;
mod graph;
mod taxonomy;

pub use bundle::{ConceptMapBundle, ConceptMapPaths, GraphMap};
pub use concept::{clean_label, ConceptNode};
pub use graph::{ConceptEdge, ConceptGraph, GraphKind};
pub use taxonomy::{TaxonomyLevels, DEFAULT_TAXONOMY_LEVELS, TAXONOMY_SIZE};
