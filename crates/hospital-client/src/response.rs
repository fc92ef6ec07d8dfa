//! Decoding of REST API response bodies.
//!
//! The API is not uniform: single creates answer `{ "message", "<kind>": R }`
//! (or just `{ "<kind>": R }`), bulk creates answer either the stored array
//! or a bare `{ "message" }` acknowledgement, and failures carry their text
//! in `message` or `error`.

use hospital_core::{Record, ResourceKind};
use hospital_storage::StorageError;
use serde_json::Value;

pub(crate) fn decode_list<R: Record>(body: &str) -> Result<Vec<R>, StorageError> {
    serde_json::from_str(body).map_err(|e| {
        StorageError::invalid_response(format!("expected a {} array: {e}", R::KIND))
    })
}

pub(crate) fn decode_created<R: Record>(body: &str, submitted: &R) -> Result<R, StorageError> {
    let value = parse_body(body)?;
    let Some(value) = value else {
        return Ok(submitted.clone());
    };

    if let Some(wrapped) = value.get(R::KIND.as_str()) {
        return serde_json::from_value(wrapped.clone()).map_err(|e| {
            StorageError::invalid_response(format!("malformed {} in response: {e}", R::KIND))
        });
    }
    if value.get(R::KIND.id_field()).is_some() {
        return serde_json::from_value(value).map_err(|e| {
            StorageError::invalid_response(format!("malformed {} in response: {e}", R::KIND))
        });
    }
    // Acknowledged without echoing the record.
    Ok(submitted.clone())
}

pub(crate) fn decode_created_many<R: Record>(
    body: &str,
    submitted: &[R],
) -> Result<Vec<R>, StorageError> {
    match parse_body(body)? {
        Some(value @ Value::Array(_)) => serde_json::from_value(value).map_err(|e| {
            StorageError::invalid_response(format!("malformed {} array: {e}", R::KIND))
        }),
        _ => Ok(submitted.to_vec()),
    }
}

pub(crate) fn error_for_status(
    kind: ResourceKind,
    id: Option<&str>,
    status: u16,
    body: &str,
) -> StorageError {
    match (status, id) {
        (404, Some(id)) => StorageError::not_found(kind, id),
        (409, Some(id)) => StorageError::already_exists(kind, id),
        _ => StorageError::remote(status, error_message(body)),
    }
}

fn parse_body(body: &str) -> Result<Option<Value>, StorageError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(|e| StorageError::invalid_response(format!("Failed to parse response JSON: {e}")))
}

fn error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = json.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    if body.is_empty() {
        "(empty response body)".to_string()
    } else {
        body.to_string()
    }
}
