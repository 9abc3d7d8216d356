//! Table session: configuration, the validation order, and the
//! filter/pagination pipeline.

mod config;
mod pagination;
mod session;

pub use config::*;
pub use pagination::*;
pub use session::*;
