//! Job DTOs for the remote job service

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::job::JobHandle;

/// Body returned by `POST /api/count-primes` once the job is queued
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobResponse {
    pub job_id: JobHandle,
}

/// Error body returned with a non-success status
///
/// `detail` is a plain string for handled errors and an array of
/// `{ loc, msg, type }` objects when the service rejects the request schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Value,
}

impl ErrorBody {
    /// Extracts a human-readable message, if the body carries one
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":"Failed to submit job: broker down"}"#).unwrap();
        assert_eq!(
            body.message(),
            Some("Failed to submit job: broker down".to_string())
        );
    }

    #[test]
    fn test_validation_detail_list() {
        let body: ErrorBody = serde_json::from_value(serde_json::json!({
            "detail": [
                { "loc": ["body", "n"], "msg": "Input should be greater than or equal to 10000", "type": "greater_than_equal" },
                { "loc": ["body", "chunks"], "msg": "Input should be less than or equal to 128", "type": "less_than_equal" }
            ]
        }))
        .unwrap();

        assert_eq!(
            body.message(),
            Some(
                "Input should be greater than or equal to 10000; Input should be less than or equal to 128"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_missing_detail() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message(), None);
    }
}
