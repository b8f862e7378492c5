//! Blocking counterparts of the domain managers, over a
//! [`blocking::WazuhClient`](crate::client::blocking::WazuhClient).
//!
//! Each method builds the same [`Operation`](crate::request::Operation) as
//! its async twin, so endpoints, parameters and decoding are identical.

use serde_json::Value;

use super::{agents, alerts, manager, syscheck};
use crate::client::blocking::WazuhClient;
use crate::error::Result;
use crate::models::{
    AddAgentResponse, AgentIdKey, AgentsResponse, DaemonStatuses, Envelope, LastScan,
    ListResponse, ManagerInfo, SyscheckItem, UpgradeResult, UpgradeTask,
};
use crate::params::{
    AgentsSelection, DeleteAgentsParams, FlagParams, GroupAssignParams, InsertAgentBody,
    ListAgentsDistinctParams, ListAgentsParams, ListOutdatedAgentsParams, ListParams,
    SyscheckParams, SyscheckScanParams, UpgradeCustomParams, UpgradeParams,
};
use crate::request::BlockingRequestMaker;

/// See [`managers::Agents`](super::Agents).
pub struct Agents<'a> {
    requests: BlockingRequestMaker<'a>,
}

impl<'a> Agents<'a> {
    pub fn new(client: &'a WazuhClient) -> Self {
        Self {
            requests: BlockingRequestMaker::new(client),
        }
    }

    pub fn list(
        &self,
        params: Option<ListAgentsParams>,
        overrides: &[(&str, &str)],
    ) -> Result<AgentsResponse> {
        self.requests.call(agents::ops::list(params, overrides)?)
    }

    pub fn list_distinct(&self, params: &ListAgentsDistinctParams) -> Result<ListResponse<Value>> {
        self.requests.call(agents::ops::list_distinct(params))
    }

    pub fn list_outdated(&self, params: Option<ListOutdatedAgentsParams>) -> Result<AgentsResponse> {
        self.requests.call(agents::ops::list_outdated(params))
    }

    pub fn list_without_group(&self, params: Option<ListParams>) -> Result<AgentsResponse> {
        self.requests.call(agents::ops::list_without_group(params))
    }

    pub fn delete(&self, params: &DeleteAgentsParams) -> Result<ListResponse<String>> {
        self.requests.call(agents::ops::delete(params))
    }

    pub fn add(
        &self,
        name: &str,
        ip: Option<&str>,
        pretty: bool,
        wait_for_complete: bool,
    ) -> Result<AddAgentResponse> {
        self.requests
            .call(agents::ops::add(name, ip, pretty, wait_for_complete)?)
    }

    pub fn add_full(&self, body: &InsertAgentBody, flags: &FlagParams) -> Result<AddAgentResponse> {
        self.requests.call(agents::ops::add_full(body, flags))
    }

    pub fn add_quick(&self, agent_name: &str) -> Result<AddAgentResponse> {
        self.requests.call(agents::ops::add_quick(agent_name))
    }

    pub fn get_active_configuration(
        &self,
        agent_id: &str,
        component: &str,
        configuration: &str,
    ) -> Result<Envelope<Value>> {
        self.requests.call(agents::ops::get_active_configuration(
            agent_id,
            component,
            configuration,
        ))
    }

    pub fn remove_from_groups(&self, agent_id: &str, groups: &[&str]) -> Result<ListResponse<String>> {
        self.requests
            .call(agents::ops::remove_from_groups(agent_id, groups))
    }

    pub fn remove_from_group(&self, agent_id: &str, group_id: &str) -> Result<Envelope<Value>> {
        self.requests
            .call(agents::ops::remove_from_group(agent_id, group_id))
    }

    pub fn assign_to_group(
        &self,
        agent_id: &str,
        group_id: &str,
        force_single_group: bool,
    ) -> Result<Envelope<Value>> {
        self.requests.call(agents::ops::assign_to_group(
            agent_id,
            group_id,
            force_single_group,
        ))
    }

    pub fn get_key(&self, agent_id: &str) -> Result<ListResponse<AgentIdKey>> {
        self.requests.call(agents::ops::get_key(agent_id))
    }

    pub fn restart(&self, agent_id: &str) -> Result<ListResponse<String>> {
        self.requests.call(agents::ops::restart(agent_id))
    }

    pub fn restart_many(&self, selection: &AgentsSelection) -> Result<ListResponse<String>> {
        self.requests.call(agents::ops::restart_many(selection))
    }

    pub fn restart_group(&self, group_id: &str) -> Result<ListResponse<String>> {
        self.requests.call(agents::ops::restart_group(group_id))
    }

    pub fn restart_node(&self, node_id: &str) -> Result<ListResponse<String>> {
        self.requests.call(agents::ops::restart_node(node_id))
    }

    pub fn force_reconnect(&self, selection: &AgentsSelection) -> Result<ListResponse<String>> {
        self.requests.call(agents::ops::force_reconnect(selection))
    }

    pub fn daemon_stats(&self, agent_id: &str, daemons: &[&str]) -> Result<ListResponse<Value>> {
        self.requests.call(agents::ops::daemon_stats(agent_id, daemons))
    }

    pub fn upgrade(&self, params: &UpgradeParams) -> Result<ListResponse<UpgradeTask>> {
        self.requests.call(agents::ops::upgrade(params))
    }

    pub fn upgrade_custom(&self, params: &UpgradeCustomParams) -> Result<ListResponse<UpgradeTask>> {
        self.requests.call(agents::ops::upgrade_custom(params))
    }

    pub fn upgrade_results(&self, selection: &AgentsSelection) -> Result<ListResponse<UpgradeResult>> {
        self.requests.call(agents::ops::upgrade_results(selection))
    }

    pub fn check_uninstall_permission(&self) -> Result<Envelope<Value>> {
        self.requests.call(agents::ops::check_uninstall_permission())
    }

    pub fn assign_many_to_group(
        &self,
        group_id: &str,
        params: &GroupAssignParams,
    ) -> Result<ListResponse<String>> {
        self.requests
            .call(agents::ops::assign_many_to_group(group_id, params))
    }

    pub fn remove_many_from_group(
        &self,
        group_id: &str,
        selection: &AgentsSelection,
    ) -> Result<ListResponse<String>> {
        self.requests
            .call(agents::ops::remove_many_from_group(group_id, selection))
    }

    pub fn summarize_os(&self) -> Result<ListResponse<String>> {
        self.requests.call(agents::ops::summarize_os())
    }

    pub fn summarize_status(&self) -> Result<Envelope<Value>> {
        self.requests.call(agents::ops::summarize_status())
    }
}

/// See [`managers::Manager`](super::Manager).
pub struct Manager<'a> {
    requests: BlockingRequestMaker<'a>,
}

impl<'a> Manager<'a> {
    pub fn new(client: &'a WazuhClient) -> Self {
        Self {
            requests: BlockingRequestMaker::new(client),
        }
    }

    pub fn status(
        &self,
        pretty: bool,
        wait_for_complete: bool,
    ) -> Result<ListResponse<DaemonStatuses>> {
        self.requests
            .call(manager::ops::status(pretty, wait_for_complete))
    }

    pub fn info(&self) -> Result<ListResponse<ManagerInfo>> {
        self.requests.call(manager::ops::info())
    }
}

/// See [`managers::Syscheck`](super::Syscheck).
pub struct Syscheck<'a> {
    requests: BlockingRequestMaker<'a>,
}

impl<'a> Syscheck<'a> {
    pub fn new(client: &'a WazuhClient) -> Self {
        Self {
            requests: BlockingRequestMaker::new(client),
        }
    }

    pub fn run_scan(&self, selection: &SyscheckScanParams) -> Result<ListResponse<String>> {
        self.requests.call(syscheck::ops::run_scan(selection))
    }

    pub fn results(
        &self,
        agent_id: &str,
        params: Option<SyscheckParams>,
    ) -> Result<ListResponse<SyscheckItem>> {
        self.requests.call(syscheck::ops::results(agent_id, params))
    }

    pub fn clear(&self, agent_id: &str) -> Result<ListResponse<String>> {
        self.requests.call(syscheck::ops::clear(agent_id))
    }

    pub fn last_scan(&self, agent_id: &str) -> Result<ListResponse<LastScan>> {
        self.requests.call(syscheck::ops::last_scan(agent_id))
    }
}

/// See [`managers::Alerts`](super::Alerts).
pub struct Alerts<'a> {
    requests: BlockingRequestMaker<'a>,
}

impl<'a> Alerts<'a> {
    pub fn new(client: &'a WazuhClient) -> Self {
        Self {
            requests: BlockingRequestMaker::new(client),
        }
    }

    pub fn list(&self) -> Result<ListResponse<Value>> {
        let api = self.requests.client().resolver()?.registry().api_version();
        self.requests.call(alerts::ops::list(api))
    }

    pub fn summary(&self) -> Result<ListResponse<Value>> {
        self.requests.call(alerts::ops::summary())
    }
}
