//! Serde support for Record against plain JSON objects.
//!
//! ## Write Format (Serialization)
//!
//! A record serializes as a flat JSON object of its fields, in field order:
//! `{"name": "Ada", "age": 36}`. Nested records become nested objects,
//! sequences become arrays, nulls are kept.
//!
//! ## Read Format (Deserialization)
//!
//! A JSON object deserializes field by field:
//! - numbers map to `Int`/`Long` by range, or `Float`;
//! - strings are probed as UUID, then RFC 3339 datetime, else kept as text;
//! - arrays map recursively to `List`;
//! - objects map recursively to nested `Record`s.
//!
//! Deserialized records carry an empty schema name; the caller assigns one
//! with [`Record::set_schema_name`] before handing rows to a session.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;
use uuid::Uuid;

use super::Record;
use super::Value;

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object representing a record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new("");

        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;
            record.fields.insert(key, json_value_to_value(value));
        }

        Ok(record)
    }
}

/// Converts a serde_json::Value to our Value enum.
fn json_value_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                    Value::Int(i as i32)
                } else {
                    Value::Long(i)
                }
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Null
            }
        }
        serde_json::Value::String(s) => {
            // Try to parse as UUID
            if let Ok(uuid) = Uuid::parse_str(&s) {
                Value::Guid(uuid)
            }
            // Try to parse as DateTime (ISO 8601)
            else if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                Value::DateTime(dt.with_timezone(&chrono::Utc))
            }
            // Otherwise keep as string
            else {
                Value::String(s)
            }
        }
        serde_json::Value::Array(arr) => {
            Value::List(arr.into_iter().map(json_value_to_value).collect())
        }
        serde_json::Value::Object(obj) => {
            let mut nested = Record::new("");
            for (key, value) in obj {
                nested.fields.insert(key, json_value_to_value(value));
            }
            Value::Record(Box::new(nested))
        }
    }
}
