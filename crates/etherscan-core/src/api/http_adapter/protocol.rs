use serde_json::Value;

use crate::error::CoreError;

/// Messages Etherscan sends with `status: "0"` for a successful query that
/// simply matched nothing. These are empty results, not failures.
const EMPTY_RESULT_MESSAGES: [&str; 2] = ["No transactions found", "No records found"];

/// Unwrap an Etherscan response into its `result` payload.
///
/// Failure detection, in order:
/// 1. an object with a non-null `error` field is an API error;
/// 2. an object with a `status` field succeeds when the status is `"1"` (or
///    the status is `"0"` with one of the empty-result messages), and fails
///    with the envelope's `message` otherwise;
/// 3. anything else is not an envelope and is returned unchanged.
pub(super) fn decode_envelope(body: Value) -> Result<Value, CoreError> {
    let mut envelope = match body {
        Value::Object(envelope) => envelope,
        other => return Ok(other),
    };

    if let Some(error) = envelope.remove("error").filter(|e| !e.is_null()) {
        return Err(CoreError::Api {
            message: error_message(&error),
            result: None,
        });
    }

    let Some(status) = envelope.get("status").cloned() else {
        return Ok(Value::Object(envelope));
    };
    let result = envelope.remove("result").unwrap_or(Value::Null);
    if is_ok_status(&status) {
        return Ok(result);
    }

    let message = match envelope.get("message").and_then(Value::as_str) {
        Some(message) => message.to_owned(),
        None => format!("request failed with status {status}"),
    };
    if EMPTY_RESULT_MESSAGES
        .iter()
        .any(|empty| message.starts_with(empty))
    {
        return Ok(result);
    }

    Err(CoreError::Api {
        message,
        result: result.as_str().map(str::to_owned),
    })
}

/// Whether `body` is shaped like an Etherscan reply (`status` or `error` key).
pub(super) fn is_envelope(body: &Value) -> bool {
    body.as_object()
        .is_some_and(|fields| fields.contains_key("status") || fields.contains_key("error"))
}

fn is_ok_status(status: &Value) -> bool {
    status.as_str() == Some("1") || status.as_u64() == Some(1)
}

// `error` is usually a plain string; JSON-RPC style bodies carry
// `{"code": .., "message": ..}` instead.
fn error_message(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        Value::Object(fields) => fields
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}
