// veilmail-client/src/resources/content.rs
use crate::endpoint::{resource, Endpoint};
use serde::Serialize;
use serde_json::json;
use veilmail_api::{ApiError, HttpClient, JsonObject, Method, Query};

resource! {
    /// Reusable email templates
    Templates {
        body create() => Post "/v1/templates", data;
        query list() => Get "/v1/templates";
        call get(id) => Get "/v1/templates/{id}", data;
        body update(id) => Patch "/v1/templates/{id}", data;
        /// Render a template with sample data without saving it
        body preview() => Post "/v1/templates/preview";
        call delete(id) => Delete "/v1/templates/{id}";
    }
}

const REORDER_STEPS: Endpoint = Endpoint::new(Method::Post, "/v1/sequences/{id}/steps/reorder");
const ENROLL: Endpoint = Endpoint::new(Method::Post, "/v1/sequences/{id}/enroll");

resource! {
    /// Automated drip sequences
    Sequences {
        body create() => Post "/v1/sequences";
        query list() => Get "/v1/sequences";
        call get(id) => Get "/v1/sequences/{id}";
        body update(id) => Put "/v1/sequences/{id}";
        call delete(id) => Delete "/v1/sequences/{id}";
        call activate(id) => Post "/v1/sequences/{id}/activate";
        call pause(id) => Post "/v1/sequences/{id}/pause";
        call archive(id) => Post "/v1/sequences/{id}/archive";
        body add_step(sequence_id) => Post "/v1/sequences/{sequence_id}/steps";
        body update_step(sequence_id, step_id) => Put "/v1/sequences/{sequence_id}/steps/{step_id}";
        call delete_step(sequence_id, step_id) => Delete "/v1/sequences/{sequence_id}/steps/{step_id}";
        query list_enrollments(sequence_id) => Get "/v1/sequences/{sequence_id}/enrollments";
        call remove_enrollment(sequence_id, enrollment_id) => Delete "/v1/sequences/{sequence_id}/enrollments/{enrollment_id}";
    }
}

impl<C: HttpClient> Sequences<'_, C> {
    /// Reorder steps; each entry carries a step id and its new position
    pub async fn reorder_steps<S: Serialize>(
        &self,
        sequence_id: &str,
        steps: &[S],
    ) -> Result<JsonObject, ApiError> {
        let steps = steps
            .iter()
            .map(crate::endpoint::encode_body)
            .collect::<Result<Vec<_>, _>>()?;
        REORDER_STEPS
            .call(
                self.transport,
                &[sequence_id],
                &Query::new(),
                Some(json!({ "steps": steps })),
            )
            .await
    }

    pub async fn enroll(
        &self,
        sequence_id: &str,
        subscriber_ids: &[&str],
    ) -> Result<JsonObject, ApiError> {
        ENROLL
            .call(
                self.transport,
                &[sequence_id],
                &Query::new(),
                Some(json!({ "subscriberIds": subscriber_ids })),
            )
            .await
    }
}

resource! {
    /// RSS feeds that trigger campaigns
    Feeds {
        body create() => Post "/v1/feeds";
        call list() => Get "/v1/feeds";
        call get(id) => Get "/v1/feeds/{id}";
        body update(id) => Put "/v1/feeds/{id}";
        call delete(id) => Delete "/v1/feeds/{id}";
        /// Fetch the feed now instead of waiting for the schedule
        call poll(id) => Post "/v1/feeds/{id}/poll";
        call pause(id) => Post "/v1/feeds/{id}/pause";
        call resume(id) => Post "/v1/feeds/{id}/resume";
        /// Filters: `limit`, `cursor`, `processed` (boolean)
        query list_items(feed_id) => Get "/v1/feeds/{feed_id}/items";
    }
}

resource! {
    /// Hosted signup forms
    Forms {
        body create() => Post "/v1/forms";
        query list() => Get "/v1/forms";
        call get(id) => Get "/v1/forms/{id}";
        body update(id) => Put "/v1/forms/{id}";
        call delete(id) => Delete "/v1/forms/{id}";
    }
}
