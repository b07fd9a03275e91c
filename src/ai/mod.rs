//! Text generation backends.
//!
//! A backend is anything implementing [`TextGenerator`]. Backends are looked
//! up by lowercase key in a static registry; adding one means adding an
//! implementation and a row in `PROVIDERS`.

pub mod openai;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::{ReleaseNotesError, Result};

pub const DEFAULT_PROVIDER: &str = "openai";

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete `prompt` and return the trimmed model output. The backend
    /// supplies its own system framing.
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}

/// Settings handed to a backend when it is constructed. Unset values fall
/// back to the backend's own defaults.
#[derive(Debug)]
pub struct ProviderConfig {
    pub api_key: SecretString,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: None,
            base_url: None,
            temperature: None,
            max_tokens: None,
        }
    }
}

type Constructor = fn(ProviderConfig) -> Result<Box<dyn TextGenerator>>;

const PROVIDERS: &[(&str, Constructor)] = &[("openai", openai::create as Constructor)];

pub fn supported_providers() -> Vec<&'static str> {
    PROVIDERS.iter().map(|(key, _)| *key).collect()
}

/// Build the backend registered under `name` (case-insensitive).
pub fn create_generator(name: &str, config: ProviderConfig) -> Result<Box<dyn TextGenerator>> {
    let key = name.trim().to_lowercase();

    match PROVIDERS.iter().find(|(registered, _)| *registered == key) {
        Some((_, construct)) => construct(config),
        None => Err(ReleaseNotesError::UnsupportedProvider {
            name: name.to_string(),
            supported: supported_providers().join(", "),
        }),
    }
}
