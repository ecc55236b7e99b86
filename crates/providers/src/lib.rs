//! Model backend implementations for Swarmlet.
//!
//! All backends implement the `swarmlet_core::ModelBackend` trait.
//! [`backend_for`] is the single dispatch site over [`ProviderKind`].

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicBackend;
pub use openai::OpenAiBackend;

use std::sync::Arc;
use swarmlet_config::AppConfig;
use swarmlet_core::error::BackendError;
use swarmlet_core::{ModelBackend, ProviderKind};

/// Build the backend for a provider kind from configuration.
///
/// This is the only place a `ProviderKind` is matched against an
/// implementation. A kind without resolvable credentials fails fast with
/// [`BackendError::NotConfigured`] — a fatal configuration error that is
/// never retried.
pub fn backend_for(
    kind: ProviderKind,
    config: &AppConfig,
) -> Result<Arc<dyn ModelBackend>, BackendError> {
    let api_key = config.key_for(kind).ok_or_else(|| {
        BackendError::NotConfigured(format!(
            "no API key configured for provider '{kind}' (set it in config.toml or the environment)"
        ))
    })?;

    let settings = config.settings_for(kind);

    let backend: Arc<dyn ModelBackend> = match kind {
        ProviderKind::OpenAi => {
            let mut backend = OpenAiBackend::new(api_key);
            if let Some(base_url) = &settings.base_url {
                backend = backend.with_base_url(base_url);
            }
            Arc::new(backend)
        }
        ProviderKind::Anthropic => {
            let mut backend = AnthropicBackend::new(api_key);
            if let Some(base_url) = &settings.base_url {
                backend = backend.with_base_url(base_url);
            }
            Arc::new(backend)
        }
    };

    Ok(backend)
}
