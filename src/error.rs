use thiserror::Error;

/// Failures raised while building, rendering or summarizing concept maps.
#[derive(Debug, Error)]
pub enum ConceptMapError {
    #[error("model service rate limit: {0}")]
    TransientService(String),

    #[error("model service error: {0}")]
    Service(String),

    /// Model output did not have the expected shape. `raw` keeps the offending text.
    #[error("unexpected model output: {reason}")]
    Parse { reason: String, raw: String },

    #[error("rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ConceptMapError {
    pub fn parse(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        ConceptMapError::Parse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ConceptMapError::TransientService(_) => "transient_service_error",
            ConceptMapError::Service(_) => "service_error",
            ConceptMapError::Parse { .. } => "parse_error",
            ConceptMapError::Render(_) => "render_error",
            ConceptMapError::Io(_) => "io_error",
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, ConceptMapError::TransientService(_))
    }
}

pub type Result<T, E = ConceptMapError> = std::result::Result<T, E>;
