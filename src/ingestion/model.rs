use super::llm_client::{GenerationRequest, LLMClient};
use crate::error::ConceptMapError;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(60);
const MAX_RATE_LIMIT_RETRIES: u32 = 1;

pub type Sleeper = Arc<dyn Fn(Duration) + Send + Sync>;

/// Low-temperature completion client with a single bounded retry on rate limits.
#[derive(Clone)]
pub struct ModelClient {
    llm: Arc<dyn LLMClient>,
    cooldown: Duration,
    sleeper: Sleeper,
}

impl ModelClient {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self {
            llm,
            cooldown: DEFAULT_RATE_LIMIT_COOLDOWN,
            sleeper: Arc::new(sleep),
        }
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Sends `prompt` and returns the raw completion text.
    ///
    /// A rate-limit failure blocks for the cooldown and retries once with the
    /// same arguments. A second rate-limit failure, or any other failure, is
    /// returned as is.
    pub fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ConceptMapError> {
        let request = GenerationRequest {
            prompt: prompt.to_string(),
            max_output_tokens: max_tokens,
            temperature: DEFAULT_TEMPERATURE,
        };

        let mut retries = 0u32;
        loop {
            match self.llm.generate(&request) {
                Ok(text) => {
                    debug!(chars = text.len(), retries, "completion received");
                    return Ok(text);
                }
                Err(err) if err.is_rate_limit() && retries < MAX_RATE_LIMIT_RETRIES => {
                    retries += 1;
                    warn!(
                        cooldown_secs = self.cooldown.as_secs(),
                        error = %err,
                        "rate limit exceeded, waiting before retrying"
                    );
                    (self.sleeper)(self.cooldown);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
