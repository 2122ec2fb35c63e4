//! The driver capability traits.
//!
//! A [`Driver`] is the caller-supplied database handle the execution layer
//! runs statements against. The traits are object-safe (boxed futures) so a
//! dataset can hold `Arc<dyn Driver>` without infecting every builder with a
//! type parameter. Cancellation is the usual async contract: dropping a
//! returned future aborts the call, and drivers that detect native
//! cancellation surface [`Error::Canceled`](crate::Error::Canceled).

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use crate::exec::row::Row;
use crate::value::Value;

/// Boxed future used by the object-safe driver traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Outcome of a statement execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecResult {
    pub rows_affected: u64,
    pub last_insert_id: Option<i64>,
}

/// Transaction isolation level requested from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

/// Options passed to [`Driver::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxOptions {
    pub isolation: Option<IsolationLevel>,
    pub read_only: bool,
}

/// Streaming result-set iterator.
///
/// Dropping the iterator releases the underlying cursor.
pub trait RowIter: Send {
    /// The next row, `None` at end of stream. A cancellation or driver
    /// failure ends the stream with `Some(Err(..))`; rows already yielded
    /// stay valid.
    fn next(&mut self) -> BoxFuture<'_, Option<Result<Row>>>;

    /// Column names of the result set.
    fn columns(&self) -> &[String];
}

/// The capability set the execution layer needs from a database handle.
pub trait Driver: Send + Sync {
    /// Run a statement, returning affected-row count and last insert id.
    fn exec<'a>(&'a self, sql: &'a str, args: &'a [Value]) -> BoxFuture<'a, Result<ExecResult>>;

    /// Run a query, returning a streaming iterator.
    fn query<'a>(
        &'a self,
        sql: &'a str,
        args: &'a [Value],
    ) -> BoxFuture<'a, Result<Box<dyn RowIter>>>;

    /// Begin a transaction.
    fn begin<'a>(&'a self, opts: TxOptions) -> BoxFuture<'a, Result<Box<dyn TxDriver>>>;
}

/// A driver handle scoped to one transaction.
///
/// Dropping an unresolved transaction handle must roll it back; the helper
/// in [`Database::with_tx`](crate::Database::with_tx) relies on that for
/// unwind safety.
pub trait TxDriver: Driver {
    fn commit<'a>(&'a self) -> BoxFuture<'a, Result<()>>;
    fn rollback<'a>(&'a self) -> BoxFuture<'a, Result<()>>;
}
