use crate::client::WazuhClient;
use crate::error::Result;
use crate::models::{LastScan, ListResponse, SyscheckItem};
use crate::params::{SyscheckParams, SyscheckScanParams};
use crate::request::RequestMaker;

/// File integrity monitoring (syscheck) results and scans.
pub struct Syscheck<'a> {
    requests: RequestMaker<'a>,
}

impl<'a> Syscheck<'a> {
    pub fn new(client: &'a WazuhClient) -> Self {
        Self {
            requests: RequestMaker::new(client),
        }
    }

    /// `PUT /syscheck`: starts a scan on the selected agents.
    pub async fn run_scan(&self, selection: &SyscheckScanParams) -> Result<ListResponse<String>> {
        self.requests.call(ops::run_scan(selection)).await
    }

    /// `GET /syscheck/{agent_id}`
    pub async fn results(
        &self,
        agent_id: &str,
        params: Option<SyscheckParams>,
    ) -> Result<ListResponse<SyscheckItem>> {
        self.requests.call(ops::results(agent_id, params)).await
    }

    /// `DELETE /syscheck/{agent_id}`
    pub async fn clear(&self, agent_id: &str) -> Result<ListResponse<String>> {
        self.requests.call(ops::clear(agent_id)).await
    }

    /// `GET /syscheck/{agent_id}/last_scan`
    pub async fn last_scan(&self, agent_id: &str) -> Result<ListResponse<LastScan>> {
        self.requests.call(ops::last_scan(agent_id)).await
    }
}

pub(super) mod ops {
    use crate::params::{SyscheckParams, SyscheckScanParams};
    use crate::request::Operation;

    pub fn run_scan(selection: &SyscheckScanParams) -> Operation<'static> {
        Operation::put("run_syscheck_scan").query(selection)
    }

    pub fn results(agent_id: &str, params: Option<SyscheckParams>) -> Operation<'_> {
        Operation::get("get_syscheck_results")
            .query(&params.unwrap_or_default())
            .path("agent_id", agent_id)
    }

    pub fn clear(agent_id: &str) -> Operation<'_> {
        Operation::delete("clear_syscheck_results").path("agent_id", agent_id)
    }

    pub fn last_scan(agent_id: &str) -> Operation<'_> {
        Operation::get("get_syscheck_last_scan").path("agent_id", agent_id)
    }
}
