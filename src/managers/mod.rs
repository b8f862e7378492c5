//! Resource managers: one per API area, each borrowing an initialized
//! [`WazuhClient`](crate::client::WazuhClient). The [`blocking`] module holds
//! the same managers over the blocking client.

mod agents;
mod alerts;
pub mod blocking;
mod manager;
mod syscheck;

pub use agents::Agents;
pub use alerts::Alerts;
pub use manager::Manager;
pub use syscheck::Syscheck;
