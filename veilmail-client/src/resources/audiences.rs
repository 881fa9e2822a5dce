// veilmail-client/src/resources/audiences.rs
use crate::endpoint::resource;

resource! {
    /// Audience (mailing list) management
    Audiences {
        body create() => Post "/v1/audiences", data;
        query list() => Get "/v1/audiences";
        call get(id) => Get "/v1/audiences/{id}", data;
        body update(id) => Put "/v1/audiences/{id}", data;
        call delete(id) => Delete "/v1/audiences/{id}";
        /// Recompute engagement scores for every subscriber
        call recalculate_engagement(audience_id) => Post "/v1/audiences/{audience_id}/recalculate-engagement";
        call engagement_stats(audience_id) => Get "/v1/audiences/{audience_id}/engagement-stats";
    }
}

resource! {
    /// Subscribers of one audience
    Subscribers {
        /// Filters: `limit`, `cursor`, `status`, `email`
        query list(audience_id) => Get "/v1/audiences/{audience_id}/subscribers";
        body add(audience_id) => Post "/v1/audiences/{audience_id}/subscribers", data;
        call get(audience_id, subscriber_id) => Get "/v1/audiences/{audience_id}/subscribers/{subscriber_id}", data;
        body update(audience_id, subscriber_id) => Put "/v1/audiences/{audience_id}/subscribers/{subscriber_id}", data;
        call remove(audience_id, subscriber_id) => Delete "/v1/audiences/{audience_id}/subscribers/{subscriber_id}";
        /// Confirm a double opt-in subscriber
        call confirm(audience_id, subscriber_id) => Post "/v1/audiences/{audience_id}/subscribers/{subscriber_id}/confirm", data;
        body import(audience_id) => Post "/v1/audiences/{audience_id}/subscribers/import";
        /// Export as CSV, optionally filtered by `status`
        raw export(audience_id) => Get "/v1/audiences/{audience_id}/subscribers/export";
        /// Activity timeline, filters: `limit`, `cursor`, `type`
        query activity(audience_id, subscriber_id) => Get "/v1/audiences/{audience_id}/subscribers/{subscriber_id}/activity";
    }
}

resource! {
    /// Custom subscriber property definitions and values
    Properties {
        body create() => Post "/v1/properties", data;
        query list() => Get "/v1/properties";
        call get(id) => Get "/v1/properties/{id}", data;
        body update(id) => Patch "/v1/properties/{id}", data;
        call delete(id) => Delete "/v1/properties/{id}";
        call get_values(audience_id, subscriber_id) => Get "/v1/audiences/{audience_id}/subscribers/{subscriber_id}/properties";
        /// Null values are stripped before sending
        body set_values(audience_id, subscriber_id) => Put "/v1/audiences/{audience_id}/subscribers/{subscriber_id}/properties";
    }
}

resource! {
    /// Subscription topics and per-subscriber preferences
    Topics {
        body create() => Post "/v1/topics";
        query list() => Get "/v1/topics";
        call get(id) => Get "/v1/topics/{id}";
        body update(id) => Patch "/v1/topics/{id}";
        call delete(id) => Delete "/v1/topics/{id}";
        call get_preferences(audience_id, subscriber_id) => Get "/v1/audiences/{audience_id}/subscribers/{subscriber_id}/topics";
        body set_preferences(audience_id, subscriber_id) => Put "/v1/audiences/{audience_id}/subscribers/{subscriber_id}/topics";
    }
}
