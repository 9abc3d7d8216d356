//! Cell value location and display formatting

use crate::mapping::PropertyMapping;
use crate::model::Record;
use crate::model::Value;

/// Locates a mapped property's value on a record and renders its display
/// text. Returns `None` when the property exists nowhere in the record's
/// value graph.
///
/// The property is looked up directly on the record first — a present
/// `Null` counts as found and renders normally — then depth-first through
/// nested records and through record elements of sequences, in field
/// iteration order. The first match wins.
pub fn find_property_value(
    record: &Record,
    mapping: &PropertyMapping,
    date_format: Option<&str>,
) -> Option<String> {
    if let Some(value) = record.get(mapping.property_name()) {
        return Some(display_value(value, mapping, date_format));
    }

    record
        .fields()
        .values()
        .find_map(|value| search_value(value, mapping, date_format))
}

fn search_value(
    value: &Value,
    mapping: &PropertyMapping,
    date_format: Option<&str>,
) -> Option<String> {
    match value {
        Value::Record(nested) => find_property_value(nested, mapping, date_format),
        Value::List(items) => items
            .iter()
            .find_map(|item| search_value(item, mapping, date_format)),
        _ => None,
    }
}

/// Renders one located value as display text.
///
/// Dispatch priority: sequence, then date, then composed record, then
/// primitive. Every cell's displayed text reproduces exactly this
/// precedence.
///
/// - A sequence of non-record elements joins their natural string forms
///   with a bare comma; a sequence of records maps each element through the
///   mapping's composition property and joins with `", "`.
/// - A date renders through the strftime `date_format` pattern when one is
///   configured, else its RFC 2822 long form.
/// - A composed record renders the composition property's value; an absent
///   sub-property renders empty.
/// - Anything else renders its natural string form (`Null` as `null`).
pub fn display_value(
    value: &Value,
    mapping: &PropertyMapping,
    date_format: Option<&str>,
) -> String {
    match value {
        Value::List(items) => display_sequence(items, mapping),
        Value::DateTime(dt) => match date_format {
            Some(pattern) => dt.format(pattern).to_string(),
            None => dt.to_rfc2822(),
        },
        Value::Record(nested) => nested
            .get(mapping.composition_property())
            .map(Value::to_string)
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

fn display_sequence(items: &[Value], mapping: &PropertyMapping) -> String {
    match items.first() {
        None => String::new(),
        Some(Value::Record(_)) => {
            let parts: Vec<_> = items
                .iter()
                .map(|item| match item {
                    Value::Record(nested) => nested
                        .get(mapping.composition_property())
                        .map(Value::to_string)
                        .unwrap_or_default(),
                    other => other.to_string(),
                })
                .collect();
            parts.join(", ")
        }
        Some(_) => {
            let parts: Vec<_> = items.iter().map(Value::to_string).collect();
            parts.join(",")
        }
    }
}
