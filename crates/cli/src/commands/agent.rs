//! `swarmlet agent` — one-shot single-agent invocation.

use swarmlet_core::NetworkContext;
use swarmlet_network::Agent;

const DEVELOPER_SYSTEM: &str = "You are a developer assistant. \
You create and read files and execute commands on the user's behalf. \
Inspect the working directory before changing it, and report what you did.";

pub async fn run(message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, backend, model) = super::setup()?;

    let agent = Agent::new("developer", DEVELOPER_SYSTEM, model, backend)
        .with_tools(swarmlet_tools::default_toolset());

    eprint!("  Thinking...");
    let result = agent.invoke(message, &NetworkContext::standalone()).await?;
    eprint!("\r             \r");

    println!("{}", result.content);
    tracing::debug!(
        tool_calls = result.tool_calls.len(),
        tokens = result.usage.tokens,
        time_ms = result.usage.time_ms,
        "Invocation finished"
    );

    Ok(())
}
