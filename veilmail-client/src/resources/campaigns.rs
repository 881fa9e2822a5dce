// veilmail-client/src/resources/campaigns.rs
use crate::endpoint::{resource, Endpoint};
use serde_json::json;
use veilmail_api::{ApiError, HttpClient, JsonObject, Method, Query};

const SEND_TEST: Endpoint = Endpoint::new(Method::Post, "/v1/campaigns/{id}/test");

resource! {
    /// Marketing campaigns
    Campaigns {
        body create() => Post "/v1/campaigns", data;
        query list() => Get "/v1/campaigns";
        call get(id) => Get "/v1/campaigns/{id}", data;
        body update(id) => Patch "/v1/campaigns/{id}", data;
        call delete(id) => Delete "/v1/campaigns/{id}";
        /// Schedule for later delivery, body carries `scheduledAt`
        body schedule(id) => Post "/v1/campaigns/{id}/schedule", data;
        call send(id) => Post "/v1/campaigns/{id}/send", data;
        call pause(id) => Post "/v1/campaigns/{id}/pause", data;
        call resume(id) => Post "/v1/campaigns/{id}/resume", data;
        call cancel(id) => Post "/v1/campaigns/{id}/cancel", data;
        /// Copy a campaign, optionally overriding fields
        body clone_campaign(id) => Post "/v1/campaigns/{id}/clone";
        query links(id) => Get "/v1/campaigns/{id}/links";
    }
}

impl<C: HttpClient> Campaigns<'_, C> {
    /// Send a test copy to the given addresses
    pub async fn send_test(&self, id: &str, to: &[&str]) -> Result<JsonObject, ApiError> {
        SEND_TEST
            .call(self.transport, &[id], &Query::new(), Some(json!({ "to": to })))
            .await
    }
}

resource! {
    /// Open/click breakdowns by location and device
    Analytics {
        /// Filters: `days`, `eventType`
        query geo() => Get "/v1/analytics/geo";
        query devices() => Get "/v1/analytics/devices";
        query campaign_geo(campaign_id) => Get "/v1/campaigns/{campaign_id}/analytics/geo";
        query campaign_devices(campaign_id) => Get "/v1/campaigns/{campaign_id}/analytics/devices";
    }
}
