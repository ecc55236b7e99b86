//! `swarmlet providers` — show configured model backends.

use swarmlet_config::AppConfig;
use swarmlet_core::ProviderKind;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!();
    println!("  Configured backends (default: {}):", config.default_provider);
    println!();

    for kind in [ProviderKind::OpenAi, ProviderKind::Anthropic] {
        let settings = config.settings_for(kind);
        let model = settings
            .model
            .as_deref()
            .unwrap_or(config.default_model.as_str());
        let key = if config.key_for(kind).is_some() {
            "key configured"
        } else {
            "no key"
        };
        let marker = if kind == config.default_provider {
            "*"
        } else {
            " "
        };
        println!("  {marker} {:<10} model: {model:<24} {key}", kind.to_string());
    }

    println!();
    Ok(())
}
