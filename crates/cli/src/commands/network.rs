//! `swarmlet network` — run the demo developer network on a task.
//!
//! One developer agent with the default toolset, and a router that keeps
//! re-selecting it until the last reply contains the completion sentinel.

use swarmlet_core::Role;
use swarmlet_network::{Agent, Network, Router};

const SENTINEL: &str = "TASK COMPLETE";

const DEVELOPER_SYSTEM: &str = "You are a developer assistant working through a task. \
You create and read files and execute commands as needed. \
Start by inspecting the current state of the working directory. \
When the whole task is finished, include the exact phrase \"TASK COMPLETE\" in your reply. \
Until then, keep working.";

pub async fn run(task: &str, max_iter: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let (config, backend, model) = super::setup()?;

    let developer = Agent::new("developer", DEVELOPER_SYSTEM, model, backend)
        .with_tools(swarmlet_tools::default_toolset());

    let mut network = Network::builder("developer-network")
        .agent(developer)
        .router(Router::until_sentinel("developer", SENTINEL))
        .max_iter(max_iter.unwrap_or(config.network.max_iter))
        .build()?;

    println!("  Running network '{}' ...", network.name());
    let history = network.run(task).await?;

    println!();
    for message in &history {
        match message.role {
            Role::User => println!("  [user] {}", message.content),
            Role::Assistant => println!(
                "  [{}] {}",
                message.agent.as_deref().unwrap_or("assistant"),
                message.content
            ),
            Role::Tool => println!("  [tool] {}", message.content),
        }
        println!();
    }
    println!("  {} messages total", history.len());

    Ok(())
}
