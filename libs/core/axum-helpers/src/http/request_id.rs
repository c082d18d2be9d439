//! Request ID generation for tower-http's `SetRequestIdLayer`.

use axum::http::{HeaderValue, Request};
use std::time::{SystemTime, UNIX_EPOCH};
use tower_http::request_id::{MakeRequestId, RequestId};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates `{prefix}-{unix_nanos}` IDs, e.g. `tasks-api-1718030592123456789`.
///
/// Only consulted when the incoming request has no `x-request-id` of its own.
#[derive(Clone, Debug)]
pub struct TimestampRequestId {
    prefix: String,
}

impl TimestampRequestId {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn next_id(&self) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        format!("{}-{}", self.prefix, nanos)
    }
}

impl MakeRequestId for TimestampRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&self.next_id()).ok().map(RequestId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_has_prefix_and_timestamp() {
        let mut maker = TimestampRequestId::new("tasks-api");
        let request = Request::new(());

        let id = maker.make_request_id(&request).unwrap();
        let value = id.header_value().to_str().unwrap();

        let nanos = value.strip_prefix("tasks-api-").unwrap();
        assert!(nanos.parse::<u128>().unwrap() > 0);
    }
}
