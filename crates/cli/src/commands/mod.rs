pub mod agent;
pub mod network;
pub mod providers;

use std::sync::Arc;
use swarmlet_config::AppConfig;
use swarmlet_core::{ModelBackend, ModelConfig};

/// Load config and resolve the default backend, with a readable error when no
/// credentials are configured.
pub fn setup() -> Result<(AppConfig, Arc<dyn ModelBackend>, ModelConfig), Box<dyn std::error::Error>>
{
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let kind = config.default_provider;
    let backend = match swarmlet_providers::backend_for(kind, &config) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!();
            eprintln!("  ERROR: {e}");
            eprintln!();
            eprintln!("  Set one of these environment variables:");
            eprintln!("    SWARMLET_API_KEY   (generic)");
            eprintln!("    OPENAI_API_KEY     (for OpenAI)");
            eprintln!("    ANTHROPIC_API_KEY  (for Anthropic)");
            eprintln!();
            eprintln!("  Or add it to your config file:");
            eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
            eprintln!();
            return Err("No API key found. See above for setup instructions.".into());
        }
    };

    let model_name = config
        .settings_for(kind)
        .model
        .clone()
        .unwrap_or_else(|| config.default_model.clone());

    let mut model = ModelConfig::new(kind, model_name);
    model.temperature = config.default_temperature;

    Ok((config, backend, model))
}
