pub mod config;
pub mod domain;
pub mod error;
pub mod ingestion;
pub mod render;
pub mod server;
pub mod service;
pub mod summary;
pub mod utils;

pub use config::{AppConfig, Backend};
pub use domain::{ConceptGraph, ConceptMapBundle, ConceptMapPaths, ConceptNode, GraphKind, TaxonomyLevels};
pub use error::ConceptMapError;
pub use ingestion::{ConceptGraphBuilder, LLMClient, MockLLMClient, ModelClient};
pub use render::{GraphRenderer, GraphvizRenderer};
pub use service::{ConceptMapService, GenerationOutcome};
pub use summary::Summarizer;
