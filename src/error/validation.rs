//! Session configuration validation errors

/// A configuration rule violation detected before a table session is built.
///
/// Every validation routine returns `Result<(), ValidationError>` (or the
/// checked value on success). Any error aborts session initialization; no
/// pipeline state is built until the configuration passes every check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// No record schema was supplied for the session.
    #[error("no record schema was provided; a table session requires one")]
    MissingSchema,

    /// The data source contains a value that is not a record.
    #[error("the data source entry at index {index} is a {actual}, not a record")]
    DataNotARecord { index: usize, actual: &'static str },

    /// A record in the data source claims a different schema.
    #[error("the data source entry at index {index} is not an instance of schema '{schema}'")]
    NotInstanceOfSchema { index: usize, schema: String },

    /// A mapping names a property that exists neither on the sample record
    /// nor within any of its compositions.
    #[error(
        "mapping property '{property}' does not exist on the schema sample or its compositions"
    )]
    UnknownProperty { property: String },

    /// Two mappings both carry the primary-key flag.
    #[error("mappings '{first}' and '{second}' both claim the primary key; only one may")]
    DuplicatePrimaryKey { first: String, second: String },

    /// Two mappings both carry the expandable-content flag.
    #[error("mappings '{first}' and '{second}' both claim expandable content; only one may")]
    DuplicateExpandKey { first: String, second: String },

    /// Two or more records share a value for the key property.
    #[error(
        "two or more records share the same value for key property '{property}'; \
         key values must be unique"
    )]
    DuplicateKeyValue { property: String },

    /// Expansion or click is enabled but no key property is configured.
    #[error("row expansion and row click require a primary key property, but none is configured")]
    MissingKeyProperty,

    /// Expansion is enabled with nothing to render for an expanded row.
    #[error(
        "row expansion is enabled but neither an expanded-content template nor an \
         expandable property was provided"
    )]
    MissingExpandContent,

    /// The configured expandable property cannot be located.
    #[error(
        "expandable property '{property}' does not exist on the schema sample or its compositions"
    )]
    InvalidExpandableProperty { property: String },
}
