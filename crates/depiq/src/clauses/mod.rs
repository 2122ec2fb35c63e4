//! Per-statement clause containers.
//!
//! A clause container is the immutable value object behind a dataset: one
//! slot per clause, read accessors, and copy-on-write setters/appenders.
//! Containers never validate dialect grammar — rendering does.

mod delete;
mod insert;
mod select;
mod truncate;
mod update;

pub use delete::DeleteClauses;
pub use insert::InsertClauses;
pub use select::{LimitVal, SelectClauses};
pub use truncate::{TruncateClauses, TruncateOptions};
pub use update::UpdateClauses;
