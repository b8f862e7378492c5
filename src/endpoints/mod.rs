//! Per-version endpoint tables and path-template resolution.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ConfigurationError, Result, WazuhError};

#[cfg(test)]
mod tests;

/// Path parameters for one request, as `(placeholder, value)` pairs.
pub type PathParams<'a> = [(&'a str, &'a str)];

const V3_PATHS: &[(&str, &str)] = &[
    ("agents_list", "/agents"),
    ("list_agents", "/agents"),
    ("agent_info", "/agents/{agent_id}"),
    ("agent_add", "/agents"),
    ("agent_delete", "/agents/{agent_id}"),
    ("alerts", "/alerts"),
    ("manager_info", "/manager/info"),
    ("wazuh_status", "/manager/status"),
];

const V4_PATHS: &[(&str, &str)] = &[
    ("generate_token", "/security/user/authenticate"),
    // Short names kept from the 3.x layout
    ("agents_list", "/agents"),
    ("agent_info", "/agents/{agent_id}"),
    ("agent_add", "/agents"),
    ("agent_delete", "/agents/{agent_id}"),
    ("agent_restart", "/agents/{agent_id}/restart"),
    ("alerts_search", "/syscheck/events"),
    ("alerts_summary", "/syscheck/summary"),
    // Agents
    ("list_agents", "/agents"),
    ("add_agent", "/agents"),
    ("delete_agents", "/agents"),
    ("list_agents_distinct", "/agents/stats/distinct"),
    ("list_outdated_agents", "/agents/outdated"),
    ("list_agents_without_group", "/agents/no_group"),
    (
        "get_active_configuration",
        "/agents/{agent_id}/config/{component}/{configuration}",
    ),
    ("remove_agent_from_groups", "/agents/{agent_id}/group"),
    ("remove_agent_from_group", "/agents/{agent_id}/group/{group_id}"),
    ("assign_agent_to_group", "/agents/{agent_id}/group/{group_id}"),
    ("get_agent_key", "/agents/{agent_id}/key"),
    ("restart_agent", "/agents/{agent_id}/restart"),
    ("get_daemon_stats", "/agents/{agent_id}/daemons/stats"),
    ("upgrade_agents", "/agents/upgrade"),
    ("upgrade_agents_custom", "/agents/upgrade_custom"),
    ("get_upgrade_results", "/agents/upgrade_result"),
    ("check_uninstall_permission", "/agents/uninstall"),
    ("remove_agents_from_group", "/agents/group"),
    ("assign_agents_to_group", "/agents/group"),
    ("restart_agents_in_group", "/agents/group/{group_id}/restart"),
    ("add_agent_full", "/agents/insert"),
    ("add_agent_quick", "/agents/insert/quick"),
    ("restart_agents_in_node", "/agents/node/{node_id}/restart"),
    ("force_reconnect_agents", "/agents/reconnect"),
    ("restart_agents", "/agents/restart"),
    ("summarize_agents_os", "/agents/summary/os"),
    ("summarize_agents_status", "/agents/summary/status"),
    // Manager
    ("manager_info", "/manager/info"),
    ("wazuh_status", "/manager/status"),
    // Syscheck
    ("run_syscheck_scan", "/syscheck"),
    ("get_syscheck_results", "/syscheck/{agent_id}"),
    ("clear_syscheck_results", "/syscheck/{agent_id}"),
    ("get_syscheck_last_scan", "/syscheck/{agent_id}/last_scan"),
];

/// Supported API major versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V3,
    V4,
}

impl ApiVersion {
    /// Selects the major version from the leading digit of a version string
    /// such as `"4.2.1"`, `"3.x"` or `"v4.7.3"`.
    pub fn from_version(version: &str) -> Result<Self> {
        match version.trim().trim_start_matches(['v', 'V']).chars().next() {
            Some('3') => Ok(ApiVersion::V3),
            Some('4') => Ok(ApiVersion::V4),
            _ => Err(ConfigurationError::UnsupportedVersion(version.to_string()).into()),
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ApiVersion::V3 => V3_PATHS,
            ApiVersion::V4 => V4_PATHS,
        }
    }
}

/// Operation key to path template mapping for one API version.
///
/// Tables are compiled into the crate and never mutated; a registry is built
/// once per session and handed to the [`EndpointResolver`].
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    version: String,
    api: ApiVersion,
    paths: HashMap<&'static str, &'static str>,
}

impl EndpointRegistry {
    pub fn for_version(version: &str) -> Result<Self> {
        let api = ApiVersion::from_version(version)?;
        Ok(Self {
            version: version.to_string(),
            api,
            paths: api.table().iter().copied().collect(),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn api_version(&self) -> ApiVersion {
        self.api
    }

    pub fn lookup(&self, operation: &str) -> Result<&'static str> {
        self.paths.get(operation).copied().ok_or_else(|| {
            ConfigurationError::UnknownOperation {
                operation: operation.to_string(),
                version: self.version.clone(),
            }
            .into()
        })
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.paths.contains_key(operation)
    }
}

/// Registry lookup without keeping the registry around.
pub fn lookup(version: &str, operation: &str) -> Result<&'static str> {
    EndpointRegistry::for_version(version)?.lookup(operation)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Encodes one value as a single path segment.
///
/// `.` and `..` are rejected since URL normalization would turn them into a
/// different path.
fn path_segment(name: &str, value: &str) -> Result<String> {
    if value == "." || value == ".." {
        return Err(WazuhError::validation(
            "path_params",
            format!("'{name}' cannot be '{value}'"),
        ));
    }
    Ok(urlencoding::encode(value).into_owned())
}

/// Fills `{name}` placeholders in `template`.
///
/// Pairs with an empty value are dropped first. Substitution is strict: a
/// supplied name that matches no placeholder is rejected with
/// `UnexpectedPathParameter`, and a placeholder left without a value fails
/// with `MissingPathParameter`. Values are percent-encoded, so `/`, `?` and
/// `#` stay inside their segment.
pub fn substitute(template: &str, params: &PathParams<'_>) -> Result<String> {
    let pattern = placeholder_pattern();
    let supplied: HashMap<&str, &str> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .copied()
        .collect();

    let placeholders: BTreeSet<&str> = pattern
        .captures_iter(template)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    if let Some(unexpected) = supplied.keys().find(|k| !placeholders.contains(*k)) {
        return Err(WazuhError::UnexpectedPathParameter(unexpected.to_string()));
    }
    if let Some(missing) = placeholders.iter().find(|p| !supplied.contains_key(*p)) {
        return Err(WazuhError::MissingPathParameter(missing.to_string()));
    }

    let encoded = supplied
        .iter()
        .map(|(name, value)| Ok((*name, path_segment(name, value)?)))
        .collect::<Result<HashMap<&str, String>>>()?;

    Ok(pattern
        .replace_all(template, |caps: &regex::Captures<'_>| {
            encoded.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned())
}

/// Turns operation keys into absolute URLs against one base URL.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    base_url: String,
    registry: EndpointRegistry,
}

impl EndpointResolver {
    pub fn new(base_url: impl Into<String>, registry: EndpointRegistry) -> Self {
        Self {
            base_url: base_url.into(),
            registry,
        }
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub fn resolve(&self, operation: &str, path_params: &PathParams<'_>) -> Result<String> {
        let template = self.registry.lookup(operation)?;
        let path = substitute(template, path_params)?;
        Ok(format!("{}{}", self.base_url, path))
    }
}

/// One-shot resolution: `base_url + template` for `operation` under `version`.
pub fn resolve(
    base_url: &str,
    version: &str,
    operation: &str,
    path_params: &PathParams<'_>,
) -> Result<String> {
    EndpointResolver::new(base_url, EndpointRegistry::for_version(version)?)
        .resolve(operation, path_params)
}

/// Strips exactly one trailing slash, as done once when a session is built.
pub fn normalize_base_url(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}
