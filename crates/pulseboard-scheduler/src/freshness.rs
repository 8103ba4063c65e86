use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Metadata key carrying the completion timestamp of the producing run.
pub const UPDATED_KEY: &str = "_updated";

/// Shallow-merge a job result with the freshness envelope.
///
/// The `_updated` field is always attached fresh — if the job's own value
/// carries the key, the envelope wins. A non-object result is wrapped under
/// `"value"` first so the envelope always has an object to land on.
pub fn stamp(value: Value, completed_at: DateTime<Utc>) -> Value {
    let mut fields = match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    };
    fields.insert(
        UPDATED_KEY.to_string(),
        Value::String(completed_at.to_rfc3339()),
    );
    Value::Object(fields)
}
