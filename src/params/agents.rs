use super::{
    parse_bool, parse_enum_list, parse_list, parse_number, FlagParams, ListParams, WireMap,
    WireParams, WireWriter,
};
use crate::error::{Result, WazuhError};
use crate::models::{AgentStatus, GroupConfigStatus};

/// OS sub-filter of the agents listing, sent as `os.platform`, `os.version`
/// and `os.name`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OsFilter {
    pub platform: Option<String>,
    pub version: Option<String>,
    pub name: Option<String>,
}

impl OsFilter {
    pub fn platform(platform: impl Into<String>) -> Self {
        Self {
            platform: Some(platform.into()),
            ..Self::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.platform.is_none() && self.version.is_none() && self.name.is_none()
    }
}

impl WireParams for OsFilter {
    fn to_wire_map(&self) -> WireMap {
        WireWriter::new()
            .text("platform", self.platform.as_deref())
            .text("version", self.version.as_deref())
            .text("name", self.name.as_deref())
            .finish()
    }
}

/// Query parameters of `GET /agents`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListAgentsParams {
    pub list: ListParams,
    pub agents_list: Option<Vec<String>>,
    pub status: Option<Vec<AgentStatus>>,
    pub older_than: Option<String>,
    pub os: Option<OsFilter>,
    pub manager: Option<String>,
    pub version: Option<String>,
    pub group: Option<String>,
    pub node_name: Option<String>,
    pub name: Option<String>,
    pub ip: Option<String>,
    pub register_ip: Option<String>,
    /// Not sent by default, so agents in every sync state are listed. Set
    /// it to `Some(GroupConfigStatus::Synced)` to only list synced agents.
    pub group_config_status: Option<GroupConfigStatus>,
    pub distinct: Option<bool>,
}

impl Default for ListAgentsParams {
    fn default() -> Self {
        Self {
            list: ListParams::default(),
            agents_list: None,
            status: None,
            older_than: None,
            os: None,
            manager: None,
            version: None,
            group: None,
            node_name: None,
            name: None,
            ip: None,
            register_ip: None,
            group_config_status: None,
            distinct: Some(false),
        }
    }
}

impl ListAgentsParams {
    /// Names accepted by [`apply_override`](Self::apply_override).
    pub const FIELDS: &'static [&'static str] = &[
        "pretty",
        "wait_for_complete",
        "offset",
        "limit",
        "sort",
        "search",
        "select",
        "q",
        "agents_list",
        "status",
        "older_than",
        "os.platform",
        "os.version",
        "os.name",
        "manager",
        "version",
        "group",
        "node_name",
        "name",
        "ip",
        "registerIP",
        "group_config_status",
        "distinct",
    ];

    pub fn paged(offset: i64, limit: i64) -> Result<Self> {
        Ok(Self {
            list: ListParams::new(offset, limit)?,
            ..Self::default()
        })
    }

    pub fn with_status(mut self, status: impl IntoIterator<Item = AgentStatus>) -> Self {
        self.status = Some(status.into_iter().collect());
        self
    }

    pub fn with_agents<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.agents_list = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_os(mut self, os: OsFilter) -> Self {
        self.os = Some(os);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets one field from its wire name and a string value.
    ///
    /// Unknown names fail with `InvalidParameter`; values that do not parse
    /// for the field's type fail with `Validation`.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<()> {
        let text = || Some(value.to_string());
        match key {
            "pretty" => self.list.flags.pretty = Some(parse_bool("pretty", value)?),
            "wait_for_complete" => {
                self.list.flags.wait_for_complete = Some(parse_bool("wait_for_complete", value)?)
            }
            "offset" => self.list.set_offset(parse_number("offset", value)?)?,
            "limit" => self.list.set_limit(parse_number("limit", value)?)?,
            "sort" => self.list.sort = text(),
            "search" => self.list.search = text(),
            "select" => self.list.select = Some(parse_list(value)),
            "q" => self.list.q = text(),
            "agents_list" => self.agents_list = Some(parse_list(value)),
            "status" => self.status = Some(parse_enum_list("status", value)?),
            "older_than" => self.older_than = text(),
            "os.platform" => self.os.get_or_insert_with(OsFilter::default).platform = text(),
            "os.version" => self.os.get_or_insert_with(OsFilter::default).version = text(),
            "os.name" => self.os.get_or_insert_with(OsFilter::default).name = text(),
            "manager" => self.manager = text(),
            "version" => self.version = text(),
            "group" => self.group = text(),
            "node_name" => self.node_name = text(),
            "name" => self.name = text(),
            "ip" => self.ip = text(),
            "registerIP" => self.register_ip = text(),
            "group_config_status" => {
                self.group_config_status = Some(
                    value
                        .parse()
                        .map_err(|e| WazuhError::validation("group_config_status", e))?,
                )
            }
            "distinct" => self.distinct = Some(parse_bool("distinct", value)?),
            _ => {
                return Err(WazuhError::InvalidParameter {
                    key: key.to_string(),
                    valid: Self::FIELDS.to_vec(),
                })
            }
        }
        Ok(())
    }
}

impl WireParams for ListAgentsParams {
    fn to_wire_map(&self) -> WireMap {
        let os = self.os.as_ref().filter(|os| !os.is_empty());
        WireWriter::new()
            .merge(&self.list)
            .list("agents_list", self.agents_list.as_deref())
            .enum_list("status", self.status.as_deref())
            .text("older_than", self.older_than.as_deref())
            .nested("os", os)
            .text("manager", self.manager.as_deref())
            .text("version", self.version.as_deref())
            .text("group", self.group.as_deref())
            .text("node_name", self.node_name.as_deref())
            .text("name", self.name.as_deref())
            .text("ip", self.ip.as_deref())
            .text("registerIP", self.register_ip.as_deref())
            .wire_enum("group_config_status", self.group_config_status)
            .flag("distinct", self.distinct)
            .finish()
    }
}

/// Query parameters of `GET /agents/stats/distinct`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListAgentsDistinctParams {
    pub list: ListParams,
    pub fields: Vec<String>,
}

impl ListAgentsDistinctParams {
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Result<Self> {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.iter().all(|f| f.is_empty()) {
            return Err(WazuhError::validation("fields", "at least one field is required"));
        }
        Ok(Self {
            list: ListParams::default(),
            fields,
        })
    }
}

impl WireParams for ListAgentsDistinctParams {
    fn to_wire_map(&self) -> WireMap {
        WireWriter::new()
            .merge(&self.list)
            .list("fields", Some(self.fields.as_slice()))
            .finish()
    }
}

/// Query parameters of `GET /agents/outdated`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOutdatedAgentsParams {
    pub list: ListParams,
}

impl WireParams for ListOutdatedAgentsParams {
    fn to_wire_map(&self) -> WireMap {
        self.list.to_wire_map()
    }
}

/// Query parameters of `DELETE /agents`.
///
/// The API refuses to delete without an explicit selection, so `agents_list`
/// is required; use `["all"]` to target every agent matching `status`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteAgentsParams {
    pub flags: FlagParams,
    pub agents_list: Vec<String>,
    pub status: Option<Vec<AgentStatus>>,
    pub older_than: Option<String>,
    pub purge: Option<bool>,
}

impl DeleteAgentsParams {
    pub fn new<S: Into<String>>(agents: impl IntoIterator<Item = S>) -> Self {
        Self {
            flags: FlagParams::default(),
            agents_list: agents.into_iter().map(Into::into).collect(),
            status: None,
            older_than: None,
            purge: Some(false),
        }
    }

    pub fn with_status(mut self, status: impl IntoIterator<Item = AgentStatus>) -> Self {
        self.status = Some(status.into_iter().collect());
        self
    }

    pub fn purge(mut self, purge: bool) -> Self {
        self.purge = Some(purge);
        self
    }
}

impl WireParams for DeleteAgentsParams {
    fn to_wire_map(&self) -> WireMap {
        WireWriter::new()
            .merge(&self.flags)
            .list("agents_list", Some(self.agents_list.as_slice()))
            .enum_list("status", self.status.as_deref())
            .text("older_than", self.older_than.as_deref())
            .flag("purge", self.purge)
            .finish()
    }
}

/// Query parameters of `POST /agents`.
#[derive(Debug, Clone, PartialEq)]
pub struct AddAgentQueryParams {
    pub flags: FlagParams,
}

impl AddAgentQueryParams {
    pub fn new(pretty: bool, wait_for_complete: bool) -> Self {
        Self {
            flags: FlagParams::new(pretty, wait_for_complete),
        }
    }
}

impl WireParams for AddAgentQueryParams {
    fn to_wire_map(&self) -> WireMap {
        self.flags.to_wire_map()
    }
}

/// JSON body of `POST /agents`.
#[derive(Debug, Clone, PartialEq)]
pub struct AddAgentBody {
    pub name: String,
    pub ip: Option<String>,
}

impl AddAgentBody {
    pub fn new(name: impl Into<String>, ip: Option<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(WazuhError::validation("name", "must not be empty"));
        }
        Ok(Self { name, ip })
    }
}

impl WireParams for AddAgentBody {
    fn to_wire_map(&self) -> WireMap {
        WireWriter::new()
            .text("name", Some(self.name.as_str()))
            .text("ip", self.ip.as_deref())
            .finish()
    }
}

/// JSON body of `POST /agents/insert`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertAgentBody {
    pub name: String,
    pub ip: Option<String>,
    pub id: Option<String>,
    pub key: Option<String>,
}

impl WireParams for InsertAgentBody {
    fn to_wire_map(&self) -> WireMap {
        WireWriter::new()
            .text("name", Some(self.name.as_str()))
            .text("ip", self.ip.as_deref())
            .text("id", self.id.as_deref())
            .text("key", self.key.as_deref())
            .finish()
    }
}

/// An explicit set of agent ids plus the common flags, used by the bulk
/// restart, reconnect and group operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentsSelection {
    pub flags: FlagParams,
    pub agents_list: Option<Vec<String>>,
}

impl AgentsSelection {
    pub fn agents<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            flags: FlagParams::default(),
            agents_list: Some(ids.into_iter().map(Into::into).collect()),
        }
    }
}

impl WireParams for AgentsSelection {
    fn to_wire_map(&self) -> WireMap {
        WireWriter::new()
            .merge(&self.flags)
            .list("agents_list", self.agents_list.as_deref())
            .finish()
    }
}

/// Query parameters of the group assignment endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupAssignParams {
    pub selection: AgentsSelection,
    pub force_single_group: Option<bool>,
}

impl WireParams for GroupAssignParams {
    fn to_wire_map(&self) -> WireMap {
        WireWriter::new()
            .merge(&self.selection)
            .flag("force_single_group", self.force_single_group)
            .finish()
    }
}

/// Query parameters of `PUT /agents/upgrade`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpgradeParams {
    pub selection: AgentsSelection,
    pub wpk_repo: Option<String>,
    pub upgrade_version: Option<String>,
    pub use_http: Option<bool>,
    pub force: Option<bool>,
}

impl WireParams for UpgradeParams {
    fn to_wire_map(&self) -> WireMap {
        WireWriter::new()
            .merge(&self.selection)
            .text("wpk_repo", self.wpk_repo.as_deref())
            .text("upgrade_version", self.upgrade_version.as_deref())
            .flag("use_http", self.use_http)
            .flag("force", self.force)
            .finish()
    }
}

/// Query parameters of `PUT /agents/upgrade_custom`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeCustomParams {
    pub selection: AgentsSelection,
    pub file_path: String,
    pub installer: Option<String>,
}

impl WireParams for UpgradeCustomParams {
    fn to_wire_map(&self) -> WireMap {
        WireWriter::new()
            .merge(&self.selection)
            .text("file_path", Some(self.file_path.as_str()))
            .text("installer", self.installer.as_deref())
            .finish()
    }
}
