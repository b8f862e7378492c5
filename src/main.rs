use anyhow::{Context, Result};
use futures_util::future::try_join;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wazuh_sdk::managers::{Agents, Manager};
use wazuh_sdk::params::ListAgentsParams;
use wazuh_sdk::{ConfigManager, WazuhClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = ConfigManager::get_config_path()?;
    let config = ConfigManager::load().with_context(|| {
        format!("Configuration not found. Create {} first.", path.display())
    })?;

    let mut client = WazuhClient::connect(config)
        .await
        .context("Failed to authenticate against the Wazuh API")?;

    // One initialized session, several managers in flight.
    let agents = Agents::new(&client);
    let manager = Manager::new(&client);
    let (listing, daemons) = try_join(
        agents.list(Some(ListAgentsParams::paged(0, 20)?), &[]),
        manager.status(false, false),
    )
    .await?;

    info!(
        total = listing.data.total_affected_items,
        version = client.version().unwrap_or("unknown"),
        "Fetched agents"
    );
    for agent in &listing.data.affected_items {
        let status = agent
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:<24} {:<16} {}",
            agent.id,
            agent.name.as_deref().unwrap_or("-"),
            agent.ip.as_deref().unwrap_or("-"),
            status
        );
    }

    if let Some(statuses) = daemons.data.affected_items.first() {
        for (daemon, state) in statuses {
            println!("{daemon:<24} {state}");
        }
    }

    client.close();
    Ok(())
}
