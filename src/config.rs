use crate::ingestion::{
    GeminiLLMClient, LLMClient, ModelClient, OllamaLLMClient, DEFAULT_GEMINI_ENDPOINT,
    DEFAULT_GEMINI_MODEL, DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OLLAMA_MODEL,
    DEFAULT_RATE_LIMIT_COOLDOWN,
};
use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Google Gemini `generateContent` API.
    Gemini,
    /// Local Ollama server.
    Ollama,
}

/// Runtime settings shared by every subcommand. Each flag can also come from
/// the environment or a `.env` file.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Text-generation backend.
    #[arg(long, value_enum, env = "CONCEPT_MAPPER_BACKEND", default_value_t = Backend::Gemini, global = true)]
    pub backend: Backend,

    /// API key for the Gemini backend.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Model name; defaults depend on the backend.
    #[arg(long, env = "CONCEPT_MAPPER_MODEL", global = true)]
    pub model: Option<String>,

    /// Base URL of the backend.
    #[arg(long, env = "CONCEPT_MAPPER_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Directory receiving the rendered maps and the summary file.
    #[arg(long, env = "CONCEPT_MAPPER_OUTPUT_DIR", default_value = ".", global = true)]
    pub output_dir: PathBuf,

    /// Graphviz `dot` executable.
    #[arg(long, env = "CONCEPT_MAPPER_DOT", default_value = "dot", global = true)]
    pub dot_binary: PathBuf,

    /// Wait before the single retry of a rate-limited call.
    #[arg(long, default_value_t = DEFAULT_RATE_LIMIT_COOLDOWN.as_secs(), global = true)]
    pub cooldown_secs: u64,

    #[arg(long, default_value_t = 120, global = true)]
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Gemini,
            api_key: None,
            model: None,
            endpoint: None,
            output_dir: PathBuf::from("."),
            dot_binary: PathBuf::from("dot"),
            cooldown_secs: DEFAULT_RATE_LIMIT_COOLDOWN.as_secs(),
            request_timeout_secs: 120,
        }
    }
}

impl AppConfig {
    pub fn model_name(&self) -> &str {
        match (&self.model, self.backend) {
            (Some(model), _) => model,
            (None, Backend::Gemini) => DEFAULT_GEMINI_MODEL,
            (None, Backend::Ollama) => DEFAULT_OLLAMA_MODEL,
        }
    }

    pub fn endpoint_url(&self) -> &str {
        match (&self.endpoint, self.backend) {
            (Some(endpoint), _) => endpoint,
            (None, Backend::Gemini) => DEFAULT_GEMINI_ENDPOINT,
            (None, Backend::Ollama) => DEFAULT_OLLAMA_ENDPOINT,
        }
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn llm_client(&self) -> Result<Arc<dyn LLMClient>> {
        let timeout = self.request_timeout();
        let client: Arc<dyn LLMClient> = match self.backend {
            Backend::Gemini => {
                let Some(api_key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty())
                else {
                    bail!("the Gemini backend needs an API key (--api-key or GEMINI_API_KEY)");
                };
                Arc::new(GeminiLLMClient::new(
                    self.endpoint_url(),
                    self.model_name(),
                    api_key,
                    timeout,
                )?)
            }
            Backend::Ollama => Arc::new(OllamaLLMClient::new(
                self.endpoint_url(),
                self.model_name(),
                timeout,
            )?),
        };
        Ok(client)
    }

    pub fn model_client(&self) -> Result<ModelClient> {
        Ok(ModelClient::new(self.llm_client()?).with_cooldown(self.cooldown()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.model_name(), "gemini-pro");
        assert_eq!(config.endpoint_url(), DEFAULT_GEMINI_ENDPOINT);
        assert_eq!(config.cooldown(), Duration::from_secs(60));

        let ollama = AppConfig {
            backend: Backend::Ollama,
            ..AppConfig::default()
        };
        assert_eq!(ollama.model_name(), "qwen3");
        assert_eq!(ollama.endpoint_url(), DEFAULT_OLLAMA_ENDPOINT);
    }

    #[test]
    fn explicit_values_win() {
        let config = AppConfig {
            model: Some("gemini-1.5-flash".into()),
            endpoint: Some("http://localhost:9999".into()),
            ..AppConfig::default()
        };
        assert_eq!(config.model_name(), "gemini-1.5-flash");
        assert_eq!(config.endpoint_url(), "http://localhost:9999");
    }

    #[test]
    fn gemini_requires_an_api_key() {
        let err = AppConfig::default().llm_client().err().unwrap();
        assert!(err.to_string().contains("API key"));

        let blank = AppConfig {
            api_key: Some("  ".into()),
            ..AppConfig::default()
        };
        assert!(blank.llm_client().is_err());
    }
}
