//! Execution adapter: driver traits, row scanning, databases, transactions.

mod database;
mod driver;
mod row;
pub(crate) mod scan;

pub use database::{Database, TxDatabase};
pub use driver::{BoxFuture, Driver, ExecResult, IsolationLevel, RowIter, TxDriver, TxOptions};
pub use row::{FromRow, FromValue, Row};
