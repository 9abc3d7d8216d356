//! End-to-end table session scenarios.

use datagrid::error::ValidationError;
use datagrid::mapping::PropertyMapping;
use datagrid::model::{Record, Schema, Value};
use datagrid::{TableConfig, TableSession};

fn person_schema() -> Schema {
    Schema::new(
        "person",
        Record::new("person")
            .set("id", 0i32)
            .set("name", "")
            .set("city", ""),
    )
}

fn person(id: i32, name: &str, city: &str) -> Record {
    Record::new("person")
        .set("id", id)
        .set("name", name)
        .set("city", city)
}

fn people(count: i32) -> Vec<Record> {
    (1..=count)
        .map(|id| person(id, &format!("person {id}"), "London"))
        .collect()
}

fn names_on_page(session: &TableSession) -> Vec<String> {
    session
        .page_records()
        .map(|r| r.get_string("name").unwrap().unwrap().to_string())
        .collect()
}

#[test]
fn paginates_25_records_into_3_pages() {
    let session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(people(25))
            .page_size(10),
    )
    .unwrap();

    assert_eq!(session.max_page(), 3);
    assert_eq!(session.page(), 1);
    assert_eq!(session.page_records().count(), 10);
    assert_eq!(session.label_actual_page(), "Page: 1");
    assert_eq!(session.label_total_pages(), "Total Pages: 3");
    assert_eq!(session.label_total_elements(), "Entries: 25");
}

#[test]
fn page_navigation_stops_at_bounds() {
    let mut session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(people(25))
            .page_size(10),
    )
    .unwrap();

    session.previous_page();
    assert_eq!(session.page(), 1);

    session.next_page();
    session.next_page();
    assert_eq!(session.page(), 3);
    assert_eq!(session.page_records().count(), 5);

    session.next_page();
    assert_eq!(session.page(), 3);
    assert_eq!(session.label_actual_page(), "Page: 3");
}

#[test]
fn filtering_from_last_page_clamps_to_single_page() {
    let mut records = people(20);
    records.extend((21..=25).map(|id| person(id, &format!("match {id}"), "Paris")));

    let mut session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(records)
            .page_size(10)
            .with_general_filter(),
    )
    .unwrap();

    session.next_page();
    session.next_page();
    assert_eq!(session.page(), 3);

    session.set_general_filter("match");

    assert_eq!(session.filtered_len(), 5);
    assert_eq!(session.max_page(), 1);
    assert_eq!(session.page(), 1);
    assert_eq!(session.page_records().count(), 5);
    assert_eq!(session.label_total_elements(), "Entries: 5");
}

#[test]
fn clearing_the_general_filter_restores_the_collection() {
    let mut session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(people(25))
            .page_size(10)
            .with_general_filter(),
    )
    .unwrap();

    session.set_general_filter("person 25");
    assert_eq!(session.filtered_len(), 1);

    session.set_general_filter("");
    assert_eq!(session.filtered_len(), 25);
    assert_eq!(session.max_page(), 3);
}

#[test]
fn general_filter_matches_any_mapped_column() {
    let records = vec![
        person(1, "Ada", "London"),
        person(2, "Grace", "Paris"),
        person(3, "London Smith", "Lisbon"),
    ];

    let mut session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(records)
            .with_general_filter(),
    )
    .unwrap();

    // "london" matches record 1 by city and record 3 by name.
    session.set_general_filter("LONDON");
    assert_eq!(names_on_page(&session), ["Ada", "London Smith"]);
}

#[test]
fn column_filters_compose_with_and_semantics() {
    let records = vec![
        person(1, "Ada", "London"),
        person(2, "Adam", "Paris"),
        person(3, "Grace", "London"),
    ];

    let mut session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(records)
            .with_column_filters(),
    )
    .unwrap();

    session.set_column_filter("name", "ad");
    assert_eq!(names_on_page(&session), ["Ada", "Adam"]);

    session.set_column_filter("city", "london");
    assert_eq!(names_on_page(&session), ["Ada"]);

    session.set_column_filter("name", "");
    assert_eq!(names_on_page(&session), ["Ada", "Grace"]);
}

#[test]
fn column_pass_runs_before_general_pass() {
    let records = vec![
        person(1, "Ada", "London"),
        person(2, "Adam", "Paris"),
        person(3, "Grace", "London"),
        person(4, "Alan", "Lisbon"),
    ];

    let mut session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(records)
            .with_general_filter()
            .with_column_filters(),
    )
    .unwrap();

    session.set_column_filter("name", "ad");
    session.set_general_filter("paris");

    // The general pass narrows the column pass result: names containing
    // "ad" AND any column containing "paris". A union of the two passes
    // would also keep Ada.
    assert_eq!(names_on_page(&session), ["Adam"]);
    assert_eq!(session.filtered_len(), 1);
}

#[test]
fn update_pagination_is_idempotent() {
    let mut session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(people(25))
            .page_size(10),
    )
    .unwrap();

    session.next_page();
    let names = names_on_page(&session);
    let label = session.label_actual_page().to_string();

    session.update_pagination();
    session.update_pagination();

    assert_eq!(names_on_page(&session), names);
    assert_eq!(session.label_actual_page(), label);
}

#[test]
fn unfiltered_session_shows_everything() {
    let session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(people(5)),
    )
    .unwrap();

    assert_eq!(session.filtered_len(), 5);
    assert_eq!(session.max_page(), 1);
}

#[test]
fn duplicate_key_values_abort_initialization() {
    let records = vec![
        person(1, "Ada", "London"),
        person(2, "Grace", "Paris"),
        person(1, "Edsger", "Lisbon"),
    ];

    let error = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(records)
            .mapping(PropertyMapping::new("id").primary_key()),
    )
    .unwrap_err();

    assert_eq!(
        error,
        ValidationError::DuplicateKeyValue {
            property: "id".into()
        }
    );
}

#[test]
fn missing_schema_aborts_initialization() {
    let error = TableSession::new(TableConfig::new().records(people(3))).unwrap_err();

    assert_eq!(error, ValidationError::MissingSchema);
}

#[test]
fn explicit_mappings_precede_implicit_ones() {
    let session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(people(3))
            .mapping(PropertyMapping::new("city").named("City")),
    )
    .unwrap();

    let columns: Vec<_> = session
        .mappings()
        .iter()
        .map(|m| m.property_name())
        .collect();
    assert_eq!(columns, ["city", "id", "name"]);
}

#[test]
fn ignored_mappings_are_removed_from_columns() {
    let session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(people(3))
            .mapping(PropertyMapping::new("id").primary_key().ignored()),
    )
    .unwrap();

    let columns: Vec<_> = session
        .mappings()
        .iter()
        .map(|m| m.property_name())
        .collect();
    assert_eq!(columns, ["name", "city"]);

    // The ignored property still serves as the key.
    assert_eq!(session.primary_key_property(), Some("id"));
}

#[test]
fn cell_text_resolves_nested_properties() {
    let schema = Schema::new(
        "person",
        Record::new("person")
            .set("id", 0i32)
            .set("address", Record::new("address").set("city", "")),
    );
    let records = vec![
        Record::new("person")
            .set("id", 1i32)
            .set("address", Record::new("address").set("city", "London")),
    ];

    let session = TableSession::new(
        TableConfig::new()
            .schema(schema)
            .records(records)
            .mapping(PropertyMapping::new("city")),
    )
    .unwrap();

    let record = session.record_at(0).unwrap();
    let city = session.mappings().first().unwrap();
    assert_eq!(session.cell_text(record, city), Some("London".into()));
}

#[test]
fn row_click_returns_the_primary_key() {
    let mut session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(people(3))
            .mapping(PropertyMapping::new("id").primary_key())
            .with_click(),
    )
    .unwrap();

    assert_eq!(session.row_clicked(1).unwrap(), Some(Value::Int(2)));
    assert!(session.row_clicked(7).is_err());
}

#[test]
fn expansion_toggles_one_row_at_a_time() {
    let mut session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(people(3))
            .mapping(PropertyMapping::new("id").primary_key())
            .expandable_property("name")
            .with_expansion(),
    )
    .unwrap();

    session.toggle_expansion(0).unwrap();
    assert_eq!(session.expanded_key(), Some(&Value::Int(1)));
    assert_eq!(session.expanded_content(), Some("person 1".into()));

    // Expanding another row moves the expansion.
    session.toggle_expansion(2).unwrap();
    assert_eq!(session.expanded_key(), Some(&Value::Int(3)));

    // Toggling the expanded row collapses it.
    session.toggle_expansion(2).unwrap();
    assert_eq!(session.expanded_key(), None);
    assert_eq!(session.expanded_content(), None);
}

#[test]
fn expansion_without_content_source_aborts_initialization() {
    let error = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(people(3))
            .mapping(PropertyMapping::new("id").primary_key())
            .with_expansion(),
    )
    .unwrap_err();

    assert_eq!(error, ValidationError::MissingExpandContent);
}

#[test]
fn selection_tracks_keys_across_toggles() {
    let mut session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(people(3))
            .mapping(PropertyMapping::new("id").primary_key())
            .with_selection(),
    )
    .unwrap();

    assert!(session.selection_enabled());

    session.toggle_selection(0).unwrap();
    session.toggle_selection(2).unwrap();
    assert_eq!(session.selection(), [Value::Int(1), Value::Int(3)]);

    // Unchecking removes the matching entry only.
    session.toggle_selection(0).unwrap();
    assert_eq!(session.selection(), [Value::Int(3)]);
}

#[test]
fn date_columns_use_the_configured_format() {
    use chrono::TimeZone;

    let hired = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let schema = Schema::new(
        "person",
        Record::new("person").set("id", 0i32).set("hired", hired),
    );
    let records = vec![
        Record::new("person").set("id", 1i32).set("hired", hired),
    ];

    let session = TableSession::new(
        TableConfig::new()
            .schema(schema)
            .records(records)
            .date_format("%d/%m/%Y"),
    )
    .unwrap();

    let record = session.record_at(0).unwrap();
    let hired_column = session
        .mappings()
        .iter()
        .find(|m| m.property_name() == "hired")
        .unwrap();
    assert_eq!(
        session.cell_text(record, hired_column),
        Some("01/03/2024".into())
    );
}

#[test]
fn rows_ingested_from_json_drive_a_session() {
    let rows = r#"[
        {"id": 1, "name": "Ada", "city": "London"},
        {"id": 2, "name": "Grace", "city": "Paris"}
    ]"#;

    let records: Vec<Record> = serde_json::from_str::<Vec<Record>>(rows)
        .unwrap()
        .into_iter()
        .map(|mut record| {
            record.set_schema_name("person");
            record
        })
        .collect();

    let mut session = TableSession::new(
        TableConfig::new()
            .schema(person_schema())
            .records(records)
            .with_general_filter(),
    )
    .unwrap();

    session.set_general_filter("grace");
    assert_eq!(names_on_page(&session), ["Grace"]);
}
