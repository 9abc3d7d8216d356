//! Per-interaction errors

/// A failure of a single row interaction.
///
/// Unlike [`ValidationError`](super::ValidationError), these never abort the
/// session: the failed interaction is reported and the pipeline stays usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    /// The interaction needs a primary key property and none is configured.
    #[error("row interaction requires a primary key property, but none is configured")]
    NoKeyProperty,

    /// The row index does not fall within the current page.
    #[error("row {row} is outside the current page")]
    RowOutOfRange { row: usize },

    /// The record carries no value for the configured key property.
    #[error("the record has no value for key property '{property}'")]
    MissingKeyValue { property: String },
}
