use crate::domain::responses::UserResponse;
use opentelemetry::KeyValue;

/// Per-request identity built by the authentication middleware and handed to services.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user: UserResponse,
    pub session_id: String,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn user_id(&self) -> i32 {
        self.user.id
    }

    /// Span attributes for an operation on behalf of this request: `extra`, then the user id
    /// and, when the caller sent one, the request id.
    pub fn trace_attributes(&self, extra: impl IntoIterator<Item = KeyValue>) -> Vec<KeyValue> {
        let mut attributes: Vec<KeyValue> = extra.into_iter().collect();
        attributes.push(KeyValue::new("user.id", self.user_id().to_string()));
        if let Some(request_id) = &self.request_id {
            attributes.push(KeyValue::new("request.id", request_id.clone()));
        }
        attributes
    }
}
