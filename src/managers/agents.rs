use serde_json::Value;

use crate::client::WazuhClient;
use crate::error::Result;
use crate::models::{
    AddAgentResponse, AgentIdKey, AgentsResponse, Envelope, ListResponse, UpgradeResult,
    UpgradeTask,
};
use crate::params::{
    AgentsSelection, DeleteAgentsParams, FlagParams, GroupAssignParams, InsertAgentBody,
    ListAgentsDistinctParams, ListAgentsParams, ListOutdatedAgentsParams, ListParams,
    UpgradeCustomParams, UpgradeParams,
};
use crate::request::RequestMaker;

/// Agent inventory and lifecycle operations.
///
/// Operations answering with agent ids only (restart, delete, group changes)
/// decode into `ListResponse<String>`.
pub struct Agents<'a> {
    requests: RequestMaker<'a>,
}

impl<'a> Agents<'a> {
    pub fn new(client: &'a WazuhClient) -> Self {
        Self {
            requests: RequestMaker::new(client),
        }
    }

    /// `GET /agents`. Starts from the default parameters when `params` is
    /// `None`, then applies `overrides` by field name.
    pub async fn list(
        &self,
        params: Option<ListAgentsParams>,
        overrides: &[(&str, &str)],
    ) -> Result<AgentsResponse> {
        self.requests.call(ops::list(params, overrides)?).await
    }

    /// `GET /agents/stats/distinct`
    pub async fn list_distinct(
        &self,
        params: &ListAgentsDistinctParams,
    ) -> Result<ListResponse<Value>> {
        self.requests.call(ops::list_distinct(params)).await
    }

    /// `GET /agents/outdated`
    pub async fn list_outdated(
        &self,
        params: Option<ListOutdatedAgentsParams>,
    ) -> Result<AgentsResponse> {
        self.requests.call(ops::list_outdated(params)).await
    }

    /// `GET /agents/no_group`
    pub async fn list_without_group(&self, params: Option<ListParams>) -> Result<AgentsResponse> {
        self.requests.call(ops::list_without_group(params)).await
    }

    /// `DELETE /agents`
    pub async fn delete(&self, params: &DeleteAgentsParams) -> Result<ListResponse<String>> {
        self.requests.call(ops::delete(params)).await
    }

    /// `POST /agents`: registers a new agent and returns its id and key.
    pub async fn add(
        &self,
        name: &str,
        ip: Option<&str>,
        pretty: bool,
        wait_for_complete: bool,
    ) -> Result<AddAgentResponse> {
        self.requests
            .call(ops::add(name, ip, pretty, wait_for_complete)?)
            .await
    }

    /// `POST /agents/insert`: registers an agent with a caller-chosen id/key.
    pub async fn add_full(
        &self,
        body: &InsertAgentBody,
        flags: &FlagParams,
    ) -> Result<AddAgentResponse> {
        self.requests.call(ops::add_full(body, flags)).await
    }

    /// `POST /agents/insert/quick`
    pub async fn add_quick(&self, agent_name: &str) -> Result<AddAgentResponse> {
        self.requests.call(ops::add_quick(agent_name)).await
    }

    /// `GET /agents/{agent_id}/config/{component}/{configuration}`
    pub async fn get_active_configuration(
        &self,
        agent_id: &str,
        component: &str,
        configuration: &str,
    ) -> Result<Envelope<Value>> {
        self.requests
            .call(ops::get_active_configuration(agent_id, component, configuration))
            .await
    }

    /// `DELETE /agents/{agent_id}/group`: removes the agent from every group
    /// in `groups`, or from all groups when empty.
    pub async fn remove_from_groups(
        &self,
        agent_id: &str,
        groups: &[&str],
    ) -> Result<ListResponse<String>> {
        self.requests
            .call(ops::remove_from_groups(agent_id, groups))
            .await
    }

    /// `DELETE /agents/{agent_id}/group/{group_id}`
    pub async fn remove_from_group(&self, agent_id: &str, group_id: &str) -> Result<Envelope<Value>> {
        self.requests
            .call(ops::remove_from_group(agent_id, group_id))
            .await
    }

    /// `PUT /agents/{agent_id}/group/{group_id}`
    pub async fn assign_to_group(
        &self,
        agent_id: &str,
        group_id: &str,
        force_single_group: bool,
    ) -> Result<Envelope<Value>> {
        self.requests
            .call(ops::assign_to_group(agent_id, group_id, force_single_group))
            .await
    }

    /// `GET /agents/{agent_id}/key`
    pub async fn get_key(&self, agent_id: &str) -> Result<ListResponse<AgentIdKey>> {
        self.requests.call(ops::get_key(agent_id)).await
    }

    /// `PUT /agents/{agent_id}/restart`
    pub async fn restart(&self, agent_id: &str) -> Result<ListResponse<String>> {
        self.requests.call(ops::restart(agent_id)).await
    }

    /// `PUT /agents/restart`: restarts the selected agents, or all of them
    /// when the selection has no ids.
    pub async fn restart_many(&self, selection: &AgentsSelection) -> Result<ListResponse<String>> {
        self.requests.call(ops::restart_many(selection)).await
    }

    /// `PUT /agents/group/{group_id}/restart`
    pub async fn restart_group(&self, group_id: &str) -> Result<ListResponse<String>> {
        self.requests.call(ops::restart_group(group_id)).await
    }

    /// `PUT /agents/node/{node_id}/restart`
    pub async fn restart_node(&self, node_id: &str) -> Result<ListResponse<String>> {
        self.requests.call(ops::restart_node(node_id)).await
    }

    /// `PUT /agents/reconnect`
    pub async fn force_reconnect(
        &self,
        selection: &AgentsSelection,
    ) -> Result<ListResponse<String>> {
        self.requests.call(ops::force_reconnect(selection)).await
    }

    /// `GET /agents/{agent_id}/daemons/stats`
    pub async fn daemon_stats(
        &self,
        agent_id: &str,
        daemons: &[&str],
    ) -> Result<ListResponse<Value>> {
        self.requests.call(ops::daemon_stats(agent_id, daemons)).await
    }

    /// `PUT /agents/upgrade`
    pub async fn upgrade(&self, params: &UpgradeParams) -> Result<ListResponse<UpgradeTask>> {
        self.requests.call(ops::upgrade(params)).await
    }

    /// `PUT /agents/upgrade_custom`
    pub async fn upgrade_custom(
        &self,
        params: &UpgradeCustomParams,
    ) -> Result<ListResponse<UpgradeTask>> {
        self.requests.call(ops::upgrade_custom(params)).await
    }

    /// `GET /agents/upgrade_result`
    pub async fn upgrade_results(
        &self,
        selection: &AgentsSelection,
    ) -> Result<ListResponse<UpgradeResult>> {
        self.requests.call(ops::upgrade_results(selection)).await
    }

    /// `GET /agents/uninstall`: whether the current user may uninstall agents.
    pub async fn check_uninstall_permission(&self) -> Result<Envelope<Value>> {
        self.requests.call(ops::check_uninstall_permission()).await
    }

    /// `PUT /agents/group`
    pub async fn assign_many_to_group(
        &self,
        group_id: &str,
        params: &GroupAssignParams,
    ) -> Result<ListResponse<String>> {
        self.requests
            .call(ops::assign_many_to_group(group_id, params))
            .await
    }

    /// `DELETE /agents/group`
    pub async fn remove_many_from_group(
        &self,
        group_id: &str,
        selection: &AgentsSelection,
    ) -> Result<ListResponse<String>> {
        self.requests
            .call(ops::remove_many_from_group(group_id, selection))
            .await
    }

    /// `GET /agents/summary/os`
    pub async fn summarize_os(&self) -> Result<ListResponse<String>> {
        self.requests.call(ops::summarize_os()).await
    }

    /// `GET /agents/summary/status`
    pub async fn summarize_status(&self) -> Result<Envelope<Value>> {
        self.requests.call(ops::summarize_status()).await
    }
}

/// Operation builders shared by the async and blocking managers.
pub(super) mod ops {
    use tracing::debug;

    use crate::error::Result;
    use crate::params::{
        AddAgentBody, AddAgentQueryParams, AgentsSelection, DeleteAgentsParams, FlagParams,
        GroupAssignParams, InsertAgentBody, ListAgentsDistinctParams, ListAgentsParams,
        ListOutdatedAgentsParams, ListParams, UpgradeCustomParams, UpgradeParams, WireMap,
        WireParams,
    };
    use crate::request::Operation;

    fn comma_list(key: &str, values: &[&str]) -> WireMap {
        let mut query = WireMap::new();
        if !values.is_empty() {
            query.insert(key.to_string(), values.join(","));
        }
        query
    }

    pub fn list(
        params: Option<ListAgentsParams>,
        overrides: &[(&str, &str)],
    ) -> Result<Operation<'static>> {
        let mut params = params.unwrap_or_default();
        for (key, value) in overrides {
            params.apply_override(key, value)?;
        }
        Ok(Operation::get("list_agents").query(&params))
    }

    pub fn list_distinct(params: &ListAgentsDistinctParams) -> Operation<'static> {
        Operation::get("list_agents_distinct").query(params)
    }

    pub fn list_outdated(params: Option<ListOutdatedAgentsParams>) -> Operation<'static> {
        Operation::get("list_outdated_agents").query(&params.unwrap_or_default())
    }

    pub fn list_without_group(params: Option<ListParams>) -> Operation<'static> {
        Operation::get("list_agents_without_group").query(&params.unwrap_or_default())
    }

    pub fn delete(params: &DeleteAgentsParams) -> Operation<'static> {
        Operation::delete("delete_agents").query(params)
    }

    pub fn add(
        name: &str,
        ip: Option<&str>,
        pretty: bool,
        wait_for_complete: bool,
    ) -> Result<Operation<'static>> {
        let body = AddAgentBody::new(name, ip.map(str::to_string))?;
        debug!(agent_name = name, "Adding agent");
        Ok(Operation::post("add_agent")
            .query(&AddAgentQueryParams::new(pretty, wait_for_complete))
            .body(&body))
    }

    pub fn add_full(body: &InsertAgentBody, flags: &FlagParams) -> Operation<'static> {
        Operation::post("add_agent_full").query(flags).body(body)
    }

    pub fn add_quick(agent_name: &str) -> Operation<'static> {
        let mut query = WireMap::new();
        query.insert("agent_name".to_string(), agent_name.to_string());
        Operation::post("add_agent_quick").query(&query)
    }

    pub fn get_active_configuration<'p>(
        agent_id: &'p str,
        component: &'p str,
        configuration: &'p str,
    ) -> Operation<'p> {
        Operation::get("get_active_configuration")
            .query(&FlagParams::default())
            .path("agent_id", agent_id)
            .path("component", component)
            .path("configuration", configuration)
    }

    pub fn remove_from_groups<'p>(agent_id: &'p str, groups: &[&str]) -> Operation<'p> {
        Operation::delete("remove_agent_from_groups")
            .query(&comma_list("groups_list", groups))
            .path("agent_id", agent_id)
    }

    pub fn remove_from_group<'p>(agent_id: &'p str, group_id: &'p str) -> Operation<'p> {
        Operation::delete("remove_agent_from_group")
            .path("agent_id", agent_id)
            .path("group_id", group_id)
    }

    pub fn assign_to_group<'p>(
        agent_id: &'p str,
        group_id: &'p str,
        force_single_group: bool,
    ) -> Operation<'p> {
        let params = GroupAssignParams {
            force_single_group: Some(force_single_group),
            ..GroupAssignParams::default()
        };
        Operation::put("assign_agent_to_group")
            .query(&params)
            .path("agent_id", agent_id)
            .path("group_id", group_id)
    }

    pub fn get_key(agent_id: &str) -> Operation<'_> {
        Operation::get("get_agent_key").path("agent_id", agent_id)
    }

    pub fn restart(agent_id: &str) -> Operation<'_> {
        Operation::put("restart_agent").path("agent_id", agent_id)
    }

    pub fn restart_many(selection: &AgentsSelection) -> Operation<'static> {
        Operation::put("restart_agents").query(selection)
    }

    pub fn restart_group(group_id: &str) -> Operation<'_> {
        Operation::put("restart_agents_in_group").path("group_id", group_id)
    }

    pub fn restart_node(node_id: &str) -> Operation<'_> {
        Operation::put("restart_agents_in_node").path("node_id", node_id)
    }

    pub fn force_reconnect(selection: &AgentsSelection) -> Operation<'static> {
        Operation::put("force_reconnect_agents").query(selection)
    }

    pub fn daemon_stats<'p>(agent_id: &'p str, daemons: &[&str]) -> Operation<'p> {
        Operation::get("get_daemon_stats")
            .query(&comma_list("daemons_list", daemons))
            .path("agent_id", agent_id)
    }

    pub fn upgrade(params: &UpgradeParams) -> Operation<'static> {
        Operation::put("upgrade_agents").query(params)
    }

    pub fn upgrade_custom(params: &UpgradeCustomParams) -> Operation<'static> {
        Operation::put("upgrade_agents_custom").query(params)
    }

    pub fn upgrade_results(selection: &AgentsSelection) -> Operation<'static> {
        Operation::get("get_upgrade_results").query(selection)
    }

    pub fn check_uninstall_permission() -> Operation<'static> {
        Operation::get("check_uninstall_permission")
    }

    pub fn assign_many_to_group(group_id: &str, params: &GroupAssignParams) -> Operation<'static> {
        let mut query = params.to_wire_map();
        query.insert("group_id".to_string(), group_id.to_string());
        Operation::put("assign_agents_to_group").query(&query)
    }

    pub fn remove_many_from_group(
        group_id: &str,
        selection: &AgentsSelection,
    ) -> Operation<'static> {
        let mut query = selection.to_wire_map();
        query.insert("group_id".to_string(), group_id.to_string());
        Operation::delete("remove_agents_from_group").query(&query)
    }

    pub fn summarize_os() -> Operation<'static> {
        Operation::get("summarize_agents_os")
    }

    pub fn summarize_status() -> Operation<'static> {
        Operation::get("summarize_agents_status")
    }
}
