use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


#[derive(Debug, Serialize, Deserialize)]
pub struct AuthData {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub data: AuthData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Active,
    Pending,
    NeverConnected,
    Disconnected,
}

impl FromStr for AgentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(AgentStatus::Active),
            "pending" => Ok(AgentStatus::Pending),
            "never_connected" => Ok(AgentStatus::NeverConnected),
            "disconnected" => Ok(AgentStatus::Disconnected),
            other => Err(format!("unknown agent status '{other}'")),
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::params::WireEnum::wire_value(*self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupConfigStatus {
    Synced,
    NotSynced,
}

impl FromStr for GroupConfigStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "synced" => Ok(GroupConfigStatus::Synced),
            "not_synced" | "not synced" => Ok(GroupConfigStatus::NotSynced),
            other => Err(format!("unknown group config status '{other}'")),
        }
    }
}

impl fmt::Display for GroupConfigStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::params::WireEnum::wire_value(*self))
    }
}

/// Standard response envelope: `{message, error, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: i64,
    pub data: T,
}

/// `data` block of list-style responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffectedItems<T> {
    pub affected_items: Vec<T>,
    #[serde(default)]
    pub total_affected_items: u64,
    #[serde(default)]
    pub failed_items: Vec<FailedItem>,
    #[serde(default)]
    pub total_failed_items: u64,
}

pub type ListResponse<T> = Envelope<AffectedItems<T>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub remediation: Option<String>,
}

/// Entity identifiers come back as strings for agents and as numbers for
/// some other resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Text(String),
    Number(i64),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Text(s) => f.write_str(s),
            EntityId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One or more entities that failed with the same error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedItem {
    pub error: ErrorDetail,
    pub id: Vec<EntityId>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WazuhOS {
    pub arch: Option<String>,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub codename: Option<String>,
    pub version: Option<String>,
    pub platform: Option<String>,
    pub uname: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WazuhAgent {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default, rename = "registerIP")]
    pub register_ip: Option<String>,
    #[serde(default)]
    pub status: Option<AgentStatus>,
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub node_name: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub group: Option<Vec<String>>,
    #[serde(default)]
    pub group_config_status: Option<GroupConfigStatus>,
    #[serde(default, rename = "configSum")]
    pub config_sum: Option<String>,
    #[serde(default, rename = "mergedSum")]
    pub merged_sum: Option<String>,
    #[serde(default, rename = "dateAdd")]
    pub date_add: Option<DateTime<Utc>>,
    #[serde(default, rename = "lastKeepAlive")]
    pub last_keep_alive: Option<DateTime<Utc>>,
    #[serde(default)]
    pub os: Option<WazuhOS>,
}

/// `data` of `POST /agents` and the insert endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentIdKey {
    pub id: String,
    pub key: String,
}

pub type AgentsResponse = ListResponse<WazuhAgent>;
pub type AddAgentResponse = Envelope<AgentIdKey>;

/// Upgrade task created for one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeTask {
    pub agent: String,
    pub task_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeResult {
    pub agent: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub node: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub error_msg: Option<String>,
}

/// Daemon name (`wazuh-analysisd`, ...) to state (`running`, `stopped`, ...).
pub type DaemonStatuses = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerInfo {
    #[serde(default)]
    pub path: Option<String>,
    pub version: String,
    #[serde(default, rename = "type")]
    pub install_type: Option<String>,
    #[serde(default)]
    pub max_agents: Option<serde_json::Value>,
    #[serde(default)]
    pub openssl_support: Option<String>,
    #[serde(default)]
    pub tz_offset: Option<String>,
    #[serde(default)]
    pub tz_name: Option<String>,
}

/// One FIM database entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyscheckItem {
    pub file: String,
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub perm: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub gid: Option<String>,
    #[serde(default)]
    pub uname: Option<String>,
    #[serde(default)]
    pub gname: Option<String>,
    #[serde(default)]
    pub inode: Option<u64>,
    #[serde(default)]
    pub md5: Option<String>,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
    #[serde(default)]
    pub mtime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub changes: Option<u64>,
    #[serde(default)]
    pub attributes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastScan {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}
