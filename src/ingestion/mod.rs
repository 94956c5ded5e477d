mod builder;
mod llm_client;
mod model;
mod prompt;
mod response;
mod validator;

pub use builder::ConceptGraphBuilder;
pub use llm_client::{
    GeminiLLMClient, GenerationRequest, LLMClient, MockLLMClient, OllamaLLMClient,
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OLLAMA_MODEL,
};
pub use model::{
    ModelClient, Sleeper, DEFAULT_MAX_TOKENS, DEFAULT_RATE_LIMIT_COOLDOWN, DEFAULT_TEMPERATURE,
};
pub use prompt::{expansion_prompt, extraction_prompt, taxonomy_prompt};
pub use response::{decode_concept_map, parse, parse_expansion, strip_code_fence, RawConceptMap, RawSubconcept};
pub use validator::{validate_concept_map, ParsedStructure, SubconceptDescriptor};
