//! Schema descriptor

use super::Record;
use super::Value;

/// Describes a record type: a logical name plus a sample record exhibiting
/// the type's shape.
///
/// The sample stands in for "an instance of the class" — the validator
/// checks mapping property names against it and the resolver derives the
/// implicit column set from its field order. It should carry every property
/// a conforming record may have, with representative values.
///
/// # Example
///
/// ```
/// use datagrid::model::{Record, Schema};
///
/// let schema = Schema::new(
///     "person",
///     Record::new("person").set("id", 0i32).set("name", ""),
/// );
/// assert_eq!(schema.name(), "person");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    sample: Record,
}

impl Schema {
    /// Creates a schema from a logical name and a sample record.
    ///
    /// The sample's own schema name is overwritten with `name`.
    pub fn new(name: impl Into<String>, mut sample: Record) -> Self {
        let name = name.into();
        sample.set_schema_name(name.clone());
        Self { name, sample }
    }

    /// Returns the logical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sample record.
    pub fn sample(&self) -> &Record {
        &self.sample
    }

    /// Returns `true` if the value is a record instantiating this schema.
    pub fn is_instance(&self, value: &Value) -> bool {
        matches!(value, Value::Record(r) if r.schema_name() == self.name)
    }
}
