//! Table session and pipeline

use log::debug;
use log::warn;

use super::Pagination;
use super::TableConfig;
use crate::display;
use crate::error::InteractionError;
use crate::error::ValidationError;
use crate::mapping;
use crate::mapping::FilterMapping;
use crate::mapping::PropertyMapping;
use crate::model::Record;
use crate::model::Value;
use crate::validate;

/// One table session: the frozen column set, the record collection, and the
/// filter/pagination pipeline state over it.
///
/// A session is built from a [`TableConfig`] by [`TableSession::new`], which
/// runs every configuration check in a fixed order — schema, data shape,
/// mapping set, key uniqueness, expand/click preconditions — and returns the
/// first violation without building any pipeline state.
///
/// All state is owned by the session and mutated only through its methods;
/// every operation runs to completion synchronously.
///
/// # Example
///
/// ```
/// use datagrid::{TableConfig, TableSession};
/// use datagrid::model::{Record, Schema};
///
/// let schema = Schema::new("person", Record::new("person").set("id", 0i32).set("name", ""));
/// let session = TableSession::new(
///     TableConfig::new()
///         .schema(schema)
///         .records([
///             Record::new("person").set("id", 1i32).set("name", "Ada"),
///             Record::new("person").set("id", 2i32).set("name", "Grace"),
///         ])
///         .page_size(10),
/// )
/// .unwrap();
///
/// assert_eq!(session.page_records().count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TableSession {
    mappings: Vec<PropertyMapping>,
    filter_mappings: Vec<FilterMapping>,
    records: Vec<Record>,

    // Index views over `records`; records are never copied.
    filtered: Vec<usize>,
    paginated: Vec<usize>,

    filter_input: String,
    pagination: Pagination,
    label_actual_page: String,
    label_total_pages: String,
    label_total_elements: String,

    primary_key_property: Option<String>,
    expandable_property: Option<String>,
    default_composition_property: String,
    date_format: Option<String>,

    use_expansion: bool,
    use_click: bool,
    use_filter: bool,
    use_columns_filter: bool,
    use_selection: bool,

    selection: Vec<Value>,
    expanded_key: Option<Value>,
}

impl TableSession {
    /// Validates the configuration and builds the session.
    ///
    /// On error nothing is built: there is no partially initialized state
    /// to observe.
    pub fn new(config: TableConfig) -> Result<Self, ValidationError> {
        let TableConfig {
            schema,
            data,
            mappings: explicit_mappings,
            default_composition_property,
            date_format,
            page_size,
            primary_key_property: key_override,
            expandable_property: expand_override,
            use_expansion,
            use_click,
            use_filter,
            use_columns_filter,
            use_selection,
            has_expanded_template,
        } = config;

        let schema = validate::validate_schema(schema.as_ref())?;
        validate::validate_data_provided(&data, schema)?;

        let sample = schema.sample();
        validate::validate_property_mappings(sample, &explicit_mappings)?;

        let implicit = {
            let explicit_names: Vec<&str> = explicit_mappings
                .iter()
                .map(PropertyMapping::property_name)
                .collect();
            mapping::implicit_mappings(sample, &explicit_names, &default_composition_property)
        };
        let mut working = explicit_mappings;
        working.extend(implicit);

        // A flagged mapping wins over the configured override.
        let primary_key_property = working
            .iter()
            .find(|m| m.is_primary_key())
            .map(|m| m.property_name().to_string())
            .or_else(|| key_override.filter(|p| !p.is_empty()));
        let expandable_property = working
            .iter()
            .find(|m| m.is_expandable_content())
            .map(|m| m.property_name().to_string())
            .or_else(|| expand_override.filter(|p| !p.is_empty()));

        let records: Vec<Record> = data
            .into_iter()
            .filter_map(|value| match value {
                Value::Record(record) => Some(*record),
                // excluded by validate_data_provided
                _ => None,
            })
            .collect();

        validate::validate_uniqueness_of_key_property(&records, primary_key_property.as_deref())?;
        validate::check_expansion_and_click_options(
            sample,
            use_expansion,
            use_click,
            primary_key_property.as_deref(),
            has_expanded_template,
            expandable_property.as_deref(),
        )?;

        working.retain(|m| !m.is_ignored());
        let filter_mappings = if use_columns_filter {
            working.iter().cloned().map(FilterMapping::new).collect()
        } else {
            Vec::new()
        };

        let filtered: Vec<usize> = (0..records.len()).collect();

        let mut session = Self {
            mappings: working,
            filter_mappings,
            records,
            filtered,
            paginated: Vec::new(),
            filter_input: String::new(),
            pagination: Pagination::new(page_size),
            label_actual_page: String::new(),
            label_total_pages: String::new(),
            label_total_elements: String::new(),
            primary_key_property,
            expandable_property,
            default_composition_property,
            date_format,
            use_expansion,
            use_click,
            use_filter,
            use_columns_filter,
            use_selection,
            selection: Vec::new(),
            expanded_key: None,
        };
        session.update_pagination();

        debug!(
            "table session initialized: {} records, {} columns",
            session.records.len(),
            session.mappings.len()
        );
        Ok(session)
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Recomputes the filtered collection from the filter inputs.
    ///
    /// With per-column filtering enabled, a record must satisfy EVERY column
    /// filter that has text (AND). With general filtering enabled and a
    /// non-empty general input, the records kept by the column pass are then
    /// narrowed to those where AT LEAST ONE mapped column matches (OR). The
    /// column pass always runs before the general pass; the two compose by
    /// intersection. With neither active the filtered collection is the
    /// whole source. Always ends by re-deriving pagination.
    pub fn filter_data(&mut self) {
        let mut filtered: Vec<usize> = (0..self.records.len()).collect();

        if self.use_columns_filter {
            filtered.retain(|&index| self.matches_column_filters(&self.records[index]));
        }

        if self.use_filter && !self.filter_input.is_empty() {
            filtered.retain(|&index| self.matches_general_filter(&self.records[index]));
        }

        debug!(
            "filter pass kept {} of {} records",
            filtered.len(),
            self.records.len()
        );
        self.filtered = filtered;
        self.update_pagination();
    }

    /// Sets the general filter text and re-runs the pipeline.
    pub fn set_general_filter(&mut self, text: impl Into<String>) {
        self.filter_input = text.into();
        self.filter_data();
    }

    /// Sets one column's filter text and re-runs the pipeline.
    pub fn set_column_filter(&mut self, property: &str, text: impl Into<String>) {
        match self
            .filter_mappings
            .iter_mut()
            .find(|f| f.mapping().property_name() == property)
        {
            Some(filter) => {
                filter.set_input(text);
                self.filter_data();
            }
            None => warn!("no filter column named '{property}'"),
        }
    }

    fn matches_column_filters(&self, record: &Record) -> bool {
        self.filter_mappings
            .iter()
            .filter(|f| f.is_active())
            .all(|f| {
                display::find_property_value(record, f.mapping(), self.date_format.as_deref())
                    .is_some_and(|text| {
                        text.to_lowercase().contains(&f.input().to_lowercase())
                    })
            })
    }

    fn matches_general_filter(&self, record: &Record) -> bool {
        let needle = self.filter_input.to_lowercase();
        self.mappings.iter().any(|m| {
            display::find_property_value(record, m, self.date_format.as_deref())
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Re-derives the cursor, the current page slice, and the labels from
    /// the filtered collection. Idempotent.
    pub fn update_pagination(&mut self) {
        self.pagination.update(self.filtered.len());
        let range = self.pagination.range(self.filtered.len());
        self.paginated = self.filtered[range].to_vec();

        self.label_actual_page = format!("Page: {}", self.pagination.page());
        self.label_total_pages = format!("Total Pages: {}", self.pagination.max_page());
        self.label_total_elements = format!("Entries: {}", self.filtered.len());
    }

    /// Moves to the next page. No-op on the last page.
    pub fn next_page(&mut self) {
        if self.pagination.next() {
            self.update_pagination();
        }
    }

    /// Moves to the previous page. No-op on page 1.
    pub fn previous_page(&mut self) {
        if self.pagination.previous() {
            self.update_pagination();
        }
    }

    // =========================================================================
    // Render outputs
    // =========================================================================

    /// The columns to render, in order. Ignored mappings are already
    /// removed.
    pub fn mappings(&self) -> &[PropertyMapping] {
        &self.mappings
    }

    /// The per-column filter inputs. Empty unless per-column filtering is
    /// enabled.
    pub fn filter_mappings(&self) -> &[FilterMapping] {
        &self.filter_mappings
    }

    /// The records on the current page, in order.
    pub fn page_records(&self) -> impl Iterator<Item = &Record> {
        self.paginated.iter().map(|&index| &self.records[index])
    }

    /// One record of the current page, by row position.
    pub fn record_at(&self, row: usize) -> Option<&Record> {
        self.paginated.get(row).map(|&index| &self.records[index])
    }

    /// A cell's display text: the mapped property's value located on the
    /// record and formatted, `None` when the property is absent from the
    /// record's value graph.
    pub fn cell_text(&self, record: &Record, mapping: &PropertyMapping) -> Option<String> {
        display::find_property_value(record, mapping, self.date_format.as_deref())
    }

    /// Number of records that pass the current filters.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The current page, 1-based.
    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    /// The last page number.
    pub fn max_page(&self) -> usize {
        self.pagination.max_page()
    }

    /// The configured page size.
    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    /// The current-page label, e.g. `Page: 2`.
    pub fn label_actual_page(&self) -> &str {
        &self.label_actual_page
    }

    /// The total-pages label, e.g. `Total Pages: 3`.
    pub fn label_total_pages(&self) -> &str {
        &self.label_total_pages
    }

    /// The entry-count label, e.g. `Entries: 25`.
    pub fn label_total_elements(&self) -> &str {
        &self.label_total_elements
    }

    /// The current general filter text.
    pub fn general_filter(&self) -> &str {
        &self.filter_input
    }

    /// The resolved primary key property, if any.
    pub fn primary_key_property(&self) -> Option<&str> {
        self.primary_key_property.as_deref()
    }

    /// The resolved expandable property, if any.
    pub fn expandable_property(&self) -> Option<&str> {
        self.expandable_property.as_deref()
    }

    /// Returns `true` if row selection is enabled.
    pub fn selection_enabled(&self) -> bool {
        self.use_selection
    }

    // =========================================================================
    // Row interactions
    //
    // Failures here never abort the session; the pipeline stays usable.
    // =========================================================================

    /// Dispatches a row click: with expansion enabled the row's expansion
    /// toggles and no key is returned; otherwise, with click enabled, the
    /// row's primary-key value is returned for the caller to emit as the
    /// row-activated event.
    pub fn row_clicked(&mut self, row: usize) -> Result<Option<Value>, InteractionError> {
        let result = if self.use_expansion {
            self.toggle_expansion(row).map(|_| None)
        } else if self.use_click {
            self.activate_row(row).map(Some)
        } else {
            Ok(None)
        };

        if let Err(error) = &result {
            warn!("row interaction failed: {error}");
        }
        result
    }

    /// Returns the primary-key value of a row on the current page — the
    /// payload of the row-activated event.
    pub fn activate_row(&self, row: usize) -> Result<Value, InteractionError> {
        let record = self.page_record(row)?;
        self.key_of(record)
    }

    /// Toggles a row's expansion state. At most one row is expanded at a
    /// time; toggling the expanded row collapses it. Returns the key of the
    /// row that is expanded after the change, if any.
    pub fn toggle_expansion(&mut self, row: usize) -> Result<Option<&Value>, InteractionError> {
        let key = self.key_of(self.page_record(row)?)?;

        if self.expanded_key.as_ref() == Some(&key) {
            self.expanded_key = None;
        } else {
            self.expanded_key = Some(key);
        }
        Ok(self.expanded_key.as_ref())
    }

    /// The key of the currently expanded row, if any.
    pub fn expanded_key(&self) -> Option<&Value> {
        self.expanded_key.as_ref()
    }

    /// The expandable property's display text for the expanded row, if a
    /// row is expanded, an expandable property is configured, and the row
    /// still passes the current filters.
    pub fn expanded_content(&self) -> Option<String> {
        let key = self.expanded_key.as_ref()?;
        let key_property = self.primary_key_property.as_deref()?;
        let property = self.expandable_property.as_deref()?;

        let record = self
            .filtered
            .iter()
            .map(|&index| &self.records[index])
            .find(|record| record.get(key_property) == Some(key))?;

        let mapping = PropertyMapping::new(property)
            .with_composition_property(self.default_composition_property.as_str());
        display::find_property_value(record, &mapping, self.date_format.as_deref())
    }

    /// Toggles the checked state of a row, keyed by its primary-key value.
    /// Returns the selection set after the change — the payload of the
    /// selection-changed event.
    pub fn toggle_selection(&mut self, row: usize) -> Result<&[Value], InteractionError> {
        let key = self.key_of(self.page_record(row)?)?;

        if let Some(position) = self.selection.iter().position(|k| *k == key) {
            self.selection.remove(position);
        } else {
            self.selection.push(key);
        }
        Ok(&self.selection)
    }

    /// The currently selected keys, in selection order.
    pub fn selection(&self) -> &[Value] {
        &self.selection
    }

    fn page_record(&self, row: usize) -> Result<&Record, InteractionError> {
        self.record_at(row)
            .ok_or(InteractionError::RowOutOfRange { row })
    }

    fn key_of(&self, record: &Record) -> Result<Value, InteractionError> {
        let property = self
            .primary_key_property
            .as_deref()
            .ok_or(InteractionError::NoKeyProperty)?;

        record
            .get(property)
            .cloned()
            .ok_or_else(|| InteractionError::MissingKeyValue {
                property: property.to_string(),
            })
    }
}
