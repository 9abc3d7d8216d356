//! Pre-session rule checks
//!
//! Stateless, referentially transparent functions run before a table
//! session becomes usable. A session initializer runs them in a fixed
//! order — schema, data shape, mapping set, key uniqueness, expand/click
//! preconditions — and aborts at the first error.

use crate::error::ValidationError;
use crate::mapping::PropertyMapping;
use crate::model::Record;
use crate::model::Schema;
use crate::model::Value;

/// Checks that a schema was provided at all.
pub fn validate_schema(schema: Option<&Schema>) -> Result<&Schema, ValidationError> {
    schema.ok_or(ValidationError::MissingSchema)
}

/// Checks that every data source entry is a record instantiating `schema`.
///
/// The shape rule runs over the whole collection before the instance rule:
/// a non-record entry anywhere is reported ahead of any schema mismatch.
pub fn validate_data_provided(data: &[Value], schema: &Schema) -> Result<(), ValidationError> {
    if let Some((index, value)) = data
        .iter()
        .enumerate()
        .find(|(_, v)| !matches!(v, Value::Record(_)))
    {
        return Err(ValidationError::DataNotARecord {
            index,
            actual: value.type_name(),
        });
    }

    if let Some((index, _)) = data.iter().enumerate().find(|(_, v)| !schema.is_instance(v)) {
        return Err(ValidationError::NotInstanceOfSchema {
            index,
            schema: schema.name().to_string(),
        });
    }

    Ok(())
}

/// Checks that no two records share a value for the key property.
///
/// Succeeds automatically when no key property is configured. A record
/// missing the key contributes an absent value; two absences collide.
pub fn validate_uniqueness_of_key_property(
    records: &[Record],
    key_property: Option<&str>,
) -> Result<(), ValidationError> {
    let Some(key) = key_property else {
        return Ok(());
    };

    let mut seen: Vec<Option<&Value>> = Vec::with_capacity(records.len());
    for record in records {
        let value = record.get(key);
        if seen.contains(&value) {
            return Err(ValidationError::DuplicateKeyValue {
                property: key.to_string(),
            });
        }
        seen.push(value);
    }

    Ok(())
}

/// Validates a set of explicit mappings against the schema sample.
///
/// Per mapping, in order: the property must exist on the sample or within
/// its compositions, and the primary-key and expandable-content flags must
/// each appear at most once across the set. The first violation in mapping
/// order is returned.
pub fn validate_property_mappings(
    sample: &Record,
    mappings: &[PropertyMapping],
) -> Result<(), ValidationError> {
    let mut primary_key_seen: Option<&PropertyMapping> = None;
    let mut expand_seen: Option<&PropertyMapping> = None;

    for mapping in mappings {
        if !has_property(sample, mapping.property_name()) {
            return Err(ValidationError::UnknownProperty {
                property: mapping.property_name().to_string(),
            });
        }

        if mapping.is_primary_key() {
            if let Some(first) = primary_key_seen {
                return Err(ValidationError::DuplicatePrimaryKey {
                    first: first.property_name().to_string(),
                    second: mapping.property_name().to_string(),
                });
            }
            primary_key_seen = Some(mapping);
        }

        if mapping.is_expandable_content() {
            if let Some(first) = expand_seen {
                return Err(ValidationError::DuplicateExpandKey {
                    first: first.property_name().to_string(),
                    second: mapping.property_name().to_string(),
                });
            }
            expand_seen = Some(mapping);
        }
    }

    Ok(())
}

/// Validates the preconditions of the expansion and click features.
///
/// Either feature requires a key property. Expansion additionally requires
/// something to render: an expanded-content template on the renderer side,
/// or an expandable property. An expandable property, when set, must exist
/// on the sample or within its compositions.
pub fn check_expansion_and_click_options(
    sample: &Record,
    use_expansion: bool,
    use_click: bool,
    key_property: Option<&str>,
    has_expanded_template: bool,
    expandable_property: Option<&str>,
) -> Result<(), ValidationError> {
    if !(use_expansion || use_click) {
        return Ok(());
    }

    if key_property.is_none_or(str::is_empty) {
        return Err(ValidationError::MissingKeyProperty);
    }

    if use_expansion && !has_expanded_template && expandable_property.is_none_or(str::is_empty) {
        return Err(ValidationError::MissingExpandContent);
    }

    if let Some(property) = expandable_property.filter(|p| !p.is_empty()) {
        if !has_property(sample, property) {
            return Err(ValidationError::InvalidExpandableProperty {
                property: property.to_string(),
            });
        }
    }

    Ok(())
}

/// Returns `true` if the property exists on the record or anywhere within
/// its nested values: depth-first through composed records and through
/// record elements of sequences, in field iteration order.
pub fn has_property(record: &Record, property: &str) -> bool {
    if record.contains(property) {
        return true;
    }

    record
        .fields()
        .values()
        .any(|value| value_has_property(value, property))
}

fn value_has_property(value: &Value, property: &str) -> bool {
    match value {
        Value::Record(nested) => has_property(nested, property),
        Value::List(items) => items.iter().any(|item| value_has_property(item, property)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_schema() -> Schema {
        Schema::new(
            "person",
            Record::new("person")
                .set("id", 0i32)
                .set("name", "")
                .set("address", Record::new("address").set("city", "")),
        )
    }

    fn person(id: i32, name: &str) -> Record {
        Record::new("person").set("id", id).set("name", name)
    }

    #[test]
    fn test_validate_schema_missing() {
        assert_eq!(
            validate_schema(None).unwrap_err(),
            ValidationError::MissingSchema
        );

        let schema = person_schema();
        assert!(validate_schema(Some(&schema)).is_ok());
    }

    #[test]
    fn test_validate_data_rejects_non_record() {
        let schema = person_schema();
        let data = vec![Value::from(person(1, "Ada")), Value::from(42i32)];

        assert_eq!(
            validate_data_provided(&data, &schema).unwrap_err(),
            ValidationError::DataNotARecord {
                index: 1,
                actual: "int"
            }
        );
    }

    #[test]
    fn test_validate_data_rejects_wrong_schema() {
        let schema = person_schema();
        let data = vec![
            Value::from(person(1, "Ada")),
            Value::from(Record::new("order").set("id", 2i32)),
        ];

        assert_eq!(
            validate_data_provided(&data, &schema).unwrap_err(),
            ValidationError::NotInstanceOfSchema {
                index: 1,
                schema: "person".into()
            }
        );
    }

    #[test]
    fn test_validate_data_shape_rule_wins() {
        // A non-record entry is reported even when an earlier entry already
        // fails the instance rule.
        let schema = person_schema();
        let data = vec![
            Value::from(Record::new("order").set("id", 2i32)),
            Value::from("stray"),
        ];

        assert!(matches!(
            validate_data_provided(&data, &schema).unwrap_err(),
            ValidationError::DataNotARecord { index: 1, .. }
        ));
    }

    #[test]
    fn test_uniqueness_without_key_is_vacuous() {
        let records = vec![person(1, "Ada"), person(1, "Grace")];
        assert!(validate_uniqueness_of_key_property(&records, None).is_ok());
    }

    #[test]
    fn test_uniqueness_detects_duplicates() {
        let records = vec![person(1, "Ada"), person(2, "Grace"), person(1, "Edsger")];

        assert_eq!(
            validate_uniqueness_of_key_property(&records, Some("id")).unwrap_err(),
            ValidationError::DuplicateKeyValue {
                property: "id".into()
            }
        );

        let records = vec![person(1, "Ada"), person(2, "Grace")];
        assert!(validate_uniqueness_of_key_property(&records, Some("id")).is_ok());
    }

    #[test]
    fn test_uniqueness_treats_missing_keys_as_colliding() {
        let records = vec![
            Record::new("person").set("name", "Ada"),
            Record::new("person").set("name", "Grace"),
        ];

        assert!(validate_uniqueness_of_key_property(&records, Some("id")).is_err());
    }

    #[test]
    fn test_mappings_unknown_property() {
        let schema = person_schema();
        let mappings = vec![PropertyMapping::new("salary")];

        assert_eq!(
            validate_property_mappings(schema.sample(), &mappings).unwrap_err(),
            ValidationError::UnknownProperty {
                property: "salary".into()
            }
        );
    }

    #[test]
    fn test_mappings_accept_composition_property() {
        let schema = person_schema();
        let mappings = vec![PropertyMapping::new("city")];

        assert!(validate_property_mappings(schema.sample(), &mappings).is_ok());
    }

    #[test]
    fn test_mappings_duplicate_primary_key() {
        let schema = person_schema();
        let mappings = vec![
            PropertyMapping::new("id").primary_key(),
            PropertyMapping::new("name").primary_key(),
        ];

        assert_eq!(
            validate_property_mappings(schema.sample(), &mappings).unwrap_err(),
            ValidationError::DuplicatePrimaryKey {
                first: "id".into(),
                second: "name".into()
            }
        );
    }

    #[test]
    fn test_mappings_duplicate_expand_key() {
        let schema = person_schema();
        let mappings = vec![
            PropertyMapping::new("id").expandable_content(),
            PropertyMapping::new("name").expandable_content(),
        ];

        assert!(matches!(
            validate_property_mappings(schema.sample(), &mappings).unwrap_err(),
            ValidationError::DuplicateExpandKey { .. }
        ));
    }

    #[test]
    fn test_mappings_first_violation_wins() {
        let schema = person_schema();
        let mappings = vec![
            PropertyMapping::new("id").primary_key(),
            PropertyMapping::new("salary"),
            PropertyMapping::new("name").primary_key(),
        ];

        // The unknown property at position 1 precedes the duplicate at 2.
        assert!(matches!(
            validate_property_mappings(schema.sample(), &mappings).unwrap_err(),
            ValidationError::UnknownProperty { .. }
        ));
    }

    #[test]
    fn test_expansion_requires_key_property() {
        let schema = person_schema();

        assert_eq!(
            check_expansion_and_click_options(schema.sample(), true, false, None, true, None)
                .unwrap_err(),
            ValidationError::MissingKeyProperty
        );

        assert_eq!(
            check_expansion_and_click_options(schema.sample(), false, true, Some(""), false, None)
                .unwrap_err(),
            ValidationError::MissingKeyProperty
        );
    }

    #[test]
    fn test_expansion_requires_content_source() {
        let schema = person_schema();

        assert_eq!(
            check_expansion_and_click_options(
                schema.sample(),
                true,
                false,
                Some("id"),
                false,
                None
            )
            .unwrap_err(),
            ValidationError::MissingExpandContent
        );

        // A renderer-side template alone is enough.
        assert!(
            check_expansion_and_click_options(schema.sample(), true, false, Some("id"), true, None)
                .is_ok()
        );
    }

    #[test]
    fn test_expansion_rejects_unknown_expandable_property() {
        let schema = person_schema();

        assert_eq!(
            check_expansion_and_click_options(
                schema.sample(),
                true,
                false,
                Some("id"),
                false,
                Some("bio")
            )
            .unwrap_err(),
            ValidationError::InvalidExpandableProperty {
                property: "bio".into()
            }
        );

        // A composition property is a valid source.
        assert!(
            check_expansion_and_click_options(
                schema.sample(),
                true,
                false,
                Some("id"),
                false,
                Some("city")
            )
            .is_ok()
        );
    }

    #[test]
    fn test_click_alone_ignores_expandable_property() {
        let schema = person_schema();

        assert!(
            check_expansion_and_click_options(schema.sample(), false, true, Some("id"), false, None)
                .is_ok()
        );
    }

    #[test]
    fn test_has_property_searches_sequences() {
        let record = Record::new("person").set(
            "roles",
            vec![Value::from(Record::new("role").set("title", "admin"))],
        );

        assert!(has_property(&record, "title"));
        assert!(!has_property(&record, "salary"));
    }
}
