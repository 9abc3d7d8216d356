//! Implicit mapping synthesis

use super::PropertyMapping;
use crate::model::Record;

/// Synthesizes implicit mappings for every sample property not already
/// covered by an explicit mapping.
///
/// Enumeration follows the sample's field insertion order, which is what
/// fixes the default column order. Synthesis is shallow: nested records
/// never contribute implicit columns of their own (only the validator's
/// existence check looks inside compositions).
pub fn implicit_mappings(
    sample: &Record,
    explicit: &[&str],
    default_composition: &str,
) -> Vec<PropertyMapping> {
    sample
        .fields()
        .keys()
        .filter(|name| !explicit.contains(&name.as_str()))
        .map(|name| {
            PropertyMapping::new(name).with_composition_property(default_composition)
        })
        .collect()
}
