//! Dynamic record model

mod record;
mod record_serde;
mod schema;
mod value;

pub use record::*;
pub use schema::*;
pub use value::*;
