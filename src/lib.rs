//! Client library for the Wazuh manager REST API.
//!
//! A [`WazuhClient`] authenticates once, then resource managers
//! ([`managers::Agents`], [`managers::Manager`], [`managers::Syscheck`],
//! [`managers::Alerts`]) resolve symbolic operation names against the
//! endpoint table of the detected API version, serialize typed parameter
//! objects and decode typed responses.
//!
//! ```no_run
//! use wazuh_sdk::{ClientConfig, WazuhClient};
//! use wazuh_sdk::managers::Agents;
//!
//! # async fn run() -> wazuh_sdk::Result<()> {
//! let config = ClientConfig::new("https://localhost:55000", "wazuh", "wazuh");
//! let mut client = WazuhClient::connect(config).await?;
//! let agents = Agents::new(&client).list(None, &[("status", "active")]).await?;
//! println!("{} active agents", agents.data.total_affected_items);
//! client.close();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod managers;
pub mod models;
pub mod params;
pub mod request;

pub use client::{SessionStatus, WazuhClient};
pub use config::{ClientConfig, ConfigManager};
pub use endpoints::{ApiVersion, EndpointRegistry, EndpointResolver};
pub use error::{ConfigurationError, Result, WazuhError};
pub use params::{WireMap, WireParams};
pub use request::{BlockingRequestMaker, Operation, RequestMaker};
