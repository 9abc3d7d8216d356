//! Per-session configuration

use crate::mapping::PropertyMapping;
use crate::model::Record;
use crate::model::Schema;
use crate::model::Value;

/// Everything a table session is built from, supplied once per session.
///
/// # Example
///
/// ```
/// use datagrid::TableConfig;
/// use datagrid::mapping::PropertyMapping;
/// use datagrid::model::{Record, Schema};
///
/// let schema = Schema::new("person", Record::new("person").set("id", 0i32).set("name", ""));
/// let config = TableConfig::new()
///     .schema(schema)
///     .records([Record::new("person").set("id", 1i32).set("name", "Ada")])
///     .mapping(PropertyMapping::new("id").primary_key())
///     .page_size(10)
///     .with_general_filter();
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub(crate) schema: Option<Schema>,
    pub(crate) data: Vec<Value>,
    pub(crate) mappings: Vec<PropertyMapping>,
    pub(crate) default_composition_property: String,
    pub(crate) date_format: Option<String>,
    pub(crate) page_size: usize,
    pub(crate) primary_key_property: Option<String>,
    pub(crate) expandable_property: Option<String>,
    pub(crate) use_expansion: bool,
    pub(crate) use_click: bool,
    pub(crate) use_filter: bool,
    pub(crate) use_columns_filter: bool,
    pub(crate) use_selection: bool,
    pub(crate) has_expanded_template: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            schema: None,
            data: Vec::new(),
            mappings: Vec::new(),
            default_composition_property: String::new(),
            date_format: None,
            page_size: 20,
            primary_key_property: None,
            expandable_property: None,
            use_expansion: false,
            use_click: false,
            use_filter: false,
            use_columns_filter: false,
            use_selection: false,
            has_expanded_template: false,
        }
    }
}

impl TableConfig {
    /// Creates an empty configuration with a page size of 20.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the record schema.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Sets the raw data source.
    pub fn data(mut self, data: Vec<Value>) -> Self {
        self.data = data;
        self
    }

    /// Sets the data source from records.
    pub fn records(mut self, records: impl IntoIterator<Item = Record>) -> Self {
        self.data = records.into_iter().map(Value::from).collect();
        self
    }

    /// Adds one explicit column mapping.
    pub fn mapping(mut self, mapping: PropertyMapping) -> Self {
        self.mappings.push(mapping);
        self
    }

    /// Sets the explicit column mappings.
    pub fn mappings(mut self, mappings: Vec<PropertyMapping>) -> Self {
        self.mappings = mappings;
        self
    }

    /// Sets the composition property given to implicit mappings.
    pub fn default_composition_property(mut self, name: impl Into<String>) -> Self {
        self.default_composition_property = name.into();
        self
    }

    /// Sets the strftime pattern used to render date values.
    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = Some(pattern.into());
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Overrides the primary key property.
    ///
    /// A mapping carrying the primary-key flag takes precedence over this.
    pub fn primary_key_property(mut self, name: impl Into<String>) -> Self {
        self.primary_key_property = Some(name.into());
        self
    }

    /// Overrides the expandable property.
    ///
    /// A mapping carrying the expandable-content flag takes precedence.
    pub fn expandable_property(mut self, name: impl Into<String>) -> Self {
        self.expandable_property = Some(name.into());
        self
    }

    /// Enables row expansion.
    pub fn with_expansion(mut self) -> Self {
        self.use_expansion = true;
        self
    }

    /// Enables row click activation.
    pub fn with_click(mut self) -> Self {
        self.use_click = true;
        self
    }

    /// Enables the general free-text filter.
    pub fn with_general_filter(mut self) -> Self {
        self.use_filter = true;
        self
    }

    /// Enables per-column filters.
    pub fn with_column_filters(mut self) -> Self {
        self.use_columns_filter = true;
        self
    }

    /// Enables row selection.
    pub fn with_selection(mut self) -> Self {
        self.use_selection = true;
        self
    }

    /// Declares that the renderer supplies an expanded-content template, so
    /// expansion does not require an expandable property.
    pub fn with_expanded_template(mut self) -> Self {
        self.has_expanded_template = true;
        self
    }
}
