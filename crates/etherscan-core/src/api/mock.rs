use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::Params;

use super::Transport;

/// A mock transport for testing. Records every parameter map it receives
/// and replies with queued results, falling back to `null`.
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<Params>>,
    replies: Mutex<VecDeque<Result<serde_json::Value, CoreError>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(self, result: serde_json::Value) -> Self {
        self.replies.lock().expect("mock lock").push_back(Ok(result));
        self
    }

    pub fn with_error(self, err: CoreError) -> Self {
        self.replies.lock().expect("mock lock").push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<Params> {
        self.calls.lock().expect("mock lock").clone()
    }

    /// The only call made so far; panics unless exactly one was made.
    pub fn single_call(&self) -> Params {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one transport call");
        calls.into_iter().next().expect("length checked above")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, params: &Params) -> Result<serde_json::Value, CoreError> {
        self.calls.lock().expect("mock lock").push(params.clone());
        self.replies
            .lock()
            .expect("mock lock")
            .pop_front()
            .unwrap_or(Ok(serde_json::Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_served_in_order_then_null() {
        let mock = MockTransport::new()
            .with_result(serde_json::json!("first"))
            .with_error(CoreError::InvalidArgument("second".into()));
        let params = Params::for_action("stats", "ethsupply");

        assert_eq!(
            mock.execute(&params).await.expect("first reply"),
            serde_json::json!("first")
        );
        assert!(mock.execute(&params).await.is_err());
        assert!(mock.execute(&params).await.expect("fallback").is_null());
        assert_eq!(mock.calls().len(), 3);
    }
}
