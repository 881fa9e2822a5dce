// veilmail-client/src/resources/account.rs
use crate::endpoint::resource;

resource! {
    /// Sending domains and their DNS verification
    Domains {
        body create() => Post "/v1/domains", data;
        query list() => Get "/v1/domains";
        call get(id) => Get "/v1/domains/{id}", data;
        body update(id) => Patch "/v1/domains/{id}";
        /// Re-run the DNS checks
        call verify(id) => Post "/v1/domains/{id}/verify", data;
        call delete(id) => Delete "/v1/domains/{id}";
    }
}

resource! {
    /// Outbound webhook endpoints
    Webhooks {
        body create() => Post "/v1/webhooks", data;
        query list() => Get "/v1/webhooks";
        call get(id) => Get "/v1/webhooks/{id}", data;
        body update(id) => Patch "/v1/webhooks/{id}", data;
        call delete(id) => Delete "/v1/webhooks/{id}";
        /// Deliver a test event
        call test(id) => Post "/v1/webhooks/{id}/test";
        /// Issue a new signing secret; the old one stops working
        call rotate_secret(id) => Post "/v1/webhooks/{id}/rotate-secret", data;
    }
}
