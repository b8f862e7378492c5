//! Typed query and body parameter objects.
//!
//! Each parameter type lists its fields explicitly and serializes them to a
//! flat [`WireMap`]: absent fields are skipped, booleans become `"true"` /
//! `"false"`, lists are comma-joined and the OS sub-filter is flattened under
//! `os.<field>` keys.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Result, WazuhError};
use crate::models::{AgentStatus, GroupConfigStatus};

mod agents;
mod syscheck;


pub use agents::{
    AddAgentBody, AddAgentQueryParams, AgentsSelection, DeleteAgentsParams, GroupAssignParams,
    InsertAgentBody, ListAgentsDistinctParams, ListAgentsParams, ListOutdatedAgentsParams,
    OsFilter, UpgradeCustomParams, UpgradeParams,
};
pub use syscheck::{SyscheckParams, SyscheckScanParams, SyscheckType};

/// Flat string-to-string mapping sent as a query string or JSON body.
pub type WireMap = BTreeMap<String, String>;

pub const DEFAULT_LIMIT: u32 = 500;
pub const MAX_LIMIT: u32 = 100_000;

/// Serialization to the wire format the API expects.
pub trait WireParams: Send + Sync {
    fn to_wire_map(&self) -> WireMap;
}

/// A plain mapping is already in wire format.
impl WireParams for WireMap {
    fn to_wire_map(&self) -> WireMap {
        self.clone()
    }
}

/// Enums whose wire value differs from their Rust name.
pub trait WireEnum: Copy {
    fn wire_value(self) -> &'static str;
}

impl WireEnum for AgentStatus {
    fn wire_value(self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Pending => "pending",
            AgentStatus::NeverConnected => "never_connected",
            AgentStatus::Disconnected => "disconnected",
        }
    }
}

impl WireEnum for GroupConfigStatus {
    fn wire_value(self) -> &'static str {
        match self {
            GroupConfigStatus::Synced => "synced",
            GroupConfigStatus::NotSynced => "not_synced",
        }
    }
}

/// Accumulates one parameter object's fields into a [`WireMap`].
#[derive(Debug, Default)]
pub struct WireWriter {
    map: WireMap,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(v) = value {
            self.map.insert(key.to_string(), v.to_string());
        }
        self
    }

    pub fn display<T: Display>(mut self, key: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.map.insert(key.to_string(), v.to_string());
        }
        self
    }

    pub fn flag(mut self, key: &str, value: Option<bool>) -> Self {
        if let Some(v) = value {
            self.map
                .insert(key.to_string(), if v { "true" } else { "false" }.to_string());
        }
        self
    }

    /// Comma-joins the non-empty elements; an empty result is omitted.
    pub fn list<S: AsRef<str>>(mut self, key: &str, values: Option<&[S]>) -> Self {
        if let Some(values) = values {
            let joined = values
                .iter()
                .map(|v| v.as_ref())
                .filter(|v: &&str| !v.is_empty())
                .collect::<Vec<_>>()
                .join(",");
            if !joined.is_empty() {
                self.map.insert(key.to_string(), joined);
            }
        }
        self
    }

    pub fn wire_enum<E: WireEnum>(mut self, key: &str, value: Option<E>) -> Self {
        if let Some(v) = value {
            self.map.insert(key.to_string(), v.wire_value().to_string());
        }
        self
    }

    pub fn enum_list<E: WireEnum>(self, key: &str, values: Option<&[E]>) -> Self {
        let wire: Option<Vec<&'static str>> =
            values.map(|vs| vs.iter().map(|v| v.wire_value()).collect());
        self.list(key, wire.as_deref())
    }

    /// Flattens a sub-filter under `<prefix>.<field>` keys.
    pub fn nested<P: WireParams>(mut self, prefix: &str, value: Option<&P>) -> Self {
        if let Some(nested) = value {
            for (k, v) in nested.to_wire_map() {
                self.map.insert(format!("{prefix}.{k}"), v);
            }
        }
        self
    }

    pub fn merge<P: WireParams>(mut self, value: &P) -> Self {
        self.map.extend(value.to_wire_map());
        self
    }

    pub fn finish(self) -> WireMap {
        self.map
    }
}

/// Query flags accepted by almost every endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagParams {
    pub pretty: Option<bool>,
    pub wait_for_complete: Option<bool>,
}

impl FlagParams {
    pub fn new(pretty: bool, wait_for_complete: bool) -> Self {
        Self {
            pretty: Some(pretty),
            wait_for_complete: Some(wait_for_complete),
        }
    }
}

impl WireParams for FlagParams {
    fn to_wire_map(&self) -> WireMap {
        WireWriter::new()
            .flag("pretty", self.pretty)
            .flag("wait_for_complete", self.wait_for_complete)
            .finish()
    }
}

/// Paging, sorting and selection fields shared by list endpoints.
///
/// `offset >= 0` and `0 < limit <= 100000` are checked at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub flags: FlagParams,
    offset: u32,
    limit: u32,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub select: Option<Vec<String>>,
    pub q: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            flags: FlagParams::new(false, false),
            offset: 0,
            limit: DEFAULT_LIMIT,
            sort: None,
            search: None,
            select: None,
            q: None,
        }
    }
}

impl ListParams {
    pub fn new(offset: i64, limit: i64) -> Result<Self> {
        let mut params = Self::default();
        params.set_offset(offset)?;
        params.set_limit(limit)?;
        Ok(params)
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn set_offset(&mut self, offset: i64) -> Result<()> {
        self.offset = u32::try_from(offset)
            .map_err(|_| WazuhError::validation("offset", format!("must be >= 0, got {offset}")))?;
        Ok(())
    }

    pub fn set_limit(&mut self, limit: i64) -> Result<()> {
        if limit <= 0 || limit > i64::from(MAX_LIMIT) {
            return Err(WazuhError::validation(
                "limit",
                format!("must be > 0 and <= {MAX_LIMIT}, got {limit}"),
            ));
        }
        self.limit = limit as u32;
        Ok(())
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_select<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.select = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }
}

impl WireParams for ListParams {
    fn to_wire_map(&self) -> WireMap {
        WireWriter::new()
            .merge(&self.flags)
            .display("offset", Some(self.offset))
            .display("limit", Some(self.limit))
            .text("sort", self.sort.as_deref())
            .text("search", self.search.as_deref())
            .list("select", self.select.as_deref())
            .text("q", self.q.as_deref())
            .finish()
    }
}

// Parsers for string overrides.

pub(crate) fn parse_bool(field: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(WazuhError::validation(field, format!("'{other}' is not a boolean"))),
    }
}

pub(crate) fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T>
where
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| WazuhError::validation(field, format!("'{value}': {e}")))
}

pub(crate) fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub(crate) fn parse_enum_list<E>(field: &'static str, value: &str) -> Result<Vec<E>>
where
    E: FromStr<Err = String>,
{
    parse_list(value)
        .iter()
        .map(|s| s.parse().map_err(|e| WazuhError::validation(field, e)))
        .collect()
}
