//! Column configuration for one record property

/// Describes how one record property becomes one table column.
///
/// The property name is fixed at construction. The remaining configuration
/// is applied through a consuming builder and is read-only once the working
/// mapping set is frozen at session initialization.
///
/// # Example
///
/// ```
/// use datagrid::mapping::PropertyMapping;
///
/// let mapping = PropertyMapping::new("id")
///     .named("Employee Id")
///     .primary_key();
///
/// assert_eq!(mapping.column_name(), "Employee Id");
/// assert!(mapping.is_primary_key());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMapping {
    property_name: String,
    column_name: String,
    ignored: bool,
    primary_key: bool,
    expandable_content: bool,
    composition_property: String,
}

impl PropertyMapping {
    /// Creates a mapping for the given property.
    ///
    /// The column display name defaults to the property name.
    pub fn new(property_name: impl Into<String>) -> Self {
        let property_name = property_name.into();
        let column_name = property_name.clone();
        Self {
            property_name,
            column_name,
            ignored: false,
            primary_key: false,
            expandable_content: false,
            composition_property: String::new(),
        }
    }

    /// Sets the column display name.
    pub fn named(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = column_name.into();
        self
    }

    /// Sets the sub-property read from nested values to obtain display text.
    pub fn with_composition_property(mut self, composition_property: impl Into<String>) -> Self {
        self.composition_property = composition_property.into();
        self
    }

    /// Marks this mapping's property as the primary key.
    ///
    /// At most one mapping in a working set may carry this flag.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Excludes the column from rendering. The property may still be used
    /// internally, e.g. as the key or expandable property.
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Marks this mapping's property as the expandable row content source.
    ///
    /// At most one mapping in a working set may carry this flag.
    pub fn expandable_content(mut self) -> Self {
        self.expandable_content = true;
        self
    }

    /// Returns the source property name.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// Returns the column display name.
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// Returns `true` if the column is excluded from rendering.
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// Returns `true` if this property is the primary key.
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Returns `true` if this property is the expandable content source.
    pub fn is_expandable_content(&self) -> bool {
        self.expandable_content
    }

    /// Returns the composition sub-property name. Empty when unset.
    pub fn composition_property(&self) -> &str {
        &self.composition_property
    }
}
