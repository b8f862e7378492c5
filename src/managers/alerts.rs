use serde_json::Value;

use crate::client::WazuhClient;
use crate::error::Result;
use crate::models::ListResponse;
use crate::request::RequestMaker;

/// Alert retrieval. The endpoint differs between 3.x and 4.x managers.
pub struct Alerts<'a> {
    requests: RequestMaker<'a>,
}

impl<'a> Alerts<'a> {
    pub fn new(client: &'a WazuhClient) -> Self {
        Self {
            requests: RequestMaker::new(client),
        }
    }

    pub async fn list(&self) -> Result<ListResponse<Value>> {
        let api = self.requests.client().resolver()?.registry().api_version();
        self.requests.call(ops::list(api)).await
    }

    /// Only 4.x managers expose a summary; on 3.x the lookup fails with
    /// `UnknownOperation`.
    pub async fn summary(&self) -> Result<ListResponse<Value>> {
        self.requests.call(ops::summary()).await
    }
}

pub(super) mod ops {
    use crate::endpoints::ApiVersion;
    use crate::request::Operation;

    pub fn list(api: ApiVersion) -> Operation<'static> {
        match api {
            ApiVersion::V3 => Operation::get("alerts"),
            ApiVersion::V4 => Operation::get("alerts_search"),
        }
    }

    pub fn summary() -> Operation<'static> {
        Operation::get("alerts_summary")
    }
}
