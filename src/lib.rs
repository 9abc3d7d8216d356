//! Record-driven data table engine
//!
//! Derives table columns by reflecting over dynamic records, reconciles and
//! validates explicit column mappings, and runs the filter and pagination
//! pipeline that produces the page a renderer displays.

pub mod display;
pub mod error;
pub mod mapping;
pub mod model;
pub mod validate;

mod table;

pub use table::*;
