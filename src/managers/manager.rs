use crate::client::WazuhClient;
use crate::error::Result;
use crate::models::{DaemonStatuses, ListResponse, ManagerInfo};
use crate::request::RequestMaker;

/// Manager-level status and information.
pub struct Manager<'a> {
    requests: RequestMaker<'a>,
}

impl<'a> Manager<'a> {
    pub fn new(client: &'a WazuhClient) -> Self {
        Self {
            requests: RequestMaker::new(client),
        }
    }

    /// `GET /manager/status`: state of every Wazuh daemon.
    pub async fn status(
        &self,
        pretty: bool,
        wait_for_complete: bool,
    ) -> Result<ListResponse<DaemonStatuses>> {
        self.requests
            .call(ops::status(pretty, wait_for_complete))
            .await
    }

    /// `GET /manager/info`
    pub async fn info(&self) -> Result<ListResponse<ManagerInfo>> {
        self.requests.call(ops::info()).await
    }
}

pub(super) mod ops {
    use crate::params::FlagParams;
    use crate::request::Operation;

    pub fn status(pretty: bool, wait_for_complete: bool) -> Operation<'static> {
        Operation::get("wazuh_status").query(&FlagParams::new(pretty, wait_for_complete))
    }

    pub fn info() -> Operation<'static> {
        Operation::get("manager_info")
    }
}
