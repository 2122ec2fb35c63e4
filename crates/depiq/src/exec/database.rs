//! The database and transaction wrappers.
//!
//! A [`Database`] pairs a registered dialect with a caller-supplied
//! [`Driver`] handle. Datasets created through it are bound to the handle,
//! so their scan/exec methods can run without further wiring.

use std::future::Future;
use std::sync::Arc;

use crate::config;
use crate::dataset::{
    DeleteDataset, InsertDataset, SelectDataset, TruncateDataset, UpdateDataset,
};
use crate::dialect::SqlDialect;
use crate::error::{Error, Result};
use crate::exec::driver::{Driver, ExecResult, RowIter, TxDriver, TxOptions};
use crate::expr::{IntoColumnExpr, IntoColumnList};
use crate::value::Value;

/// A dialect name paired with a driver handle.
#[derive(Clone)]
pub struct Database {
    dialect: Arc<SqlDialect>,
    driver: Arc<dyn Driver>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("dialect", &self.dialect.name())
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Pair the named registered dialect with a driver handle.
    pub fn new(dialect: &str, driver: impl Driver + 'static) -> Self {
        Database {
            dialect: config::get_dialect(dialect),
            driver: Arc::new(driver),
        }
    }

    pub(crate) fn from_parts(dialect: Arc<SqlDialect>, driver: Arc<dyn Driver>) -> Self {
        Database { dialect, driver }
    }

    pub fn dialect_name(&self) -> &str {
        self.dialect.name()
    }

    /// `SELECT * FROM <tables>`, bound to this database.
    pub fn from(&self, tables: impl IntoColumnList) -> SelectDataset {
        SelectDataset::with_dialect_handle(self.dialect.clone())
            .from(tables)
            .bind_driver(self.driver.clone())
    }

    /// `SELECT <cols>`, bound to this database.
    pub fn select(&self, cols: impl IntoColumnList) -> SelectDataset {
        SelectDataset::with_dialect_handle(self.dialect.clone())
            .select(cols)
            .bind_driver(self.driver.clone())
    }

    /// `INSERT INTO <table>`, bound to this database.
    pub fn insert(&self, table: impl IntoColumnExpr) -> InsertDataset {
        InsertDataset::with_dialect_handle(self.dialect.clone(), table)
            .bind_driver(self.driver.clone())
    }

    /// `UPDATE <table>`, bound to this database.
    pub fn update(&self, table: impl IntoColumnExpr) -> UpdateDataset {
        UpdateDataset::with_dialect_handle(self.dialect.clone(), table)
            .bind_driver(self.driver.clone())
    }

    /// `DELETE FROM <table>`, bound to this database.
    pub fn delete(&self, table: impl IntoColumnExpr) -> DeleteDataset {
        DeleteDataset::with_dialect_handle(self.dialect.clone(), table)
            .bind_driver(self.driver.clone())
    }

    /// `TRUNCATE <tables>`, bound to this database.
    pub fn truncate(&self, tables: impl IntoColumnList) -> TruncateDataset {
        TruncateDataset::with_dialect_handle(self.dialect.clone(), tables)
            .bind_driver(self.driver.clone())
    }

    /// Run raw SQL.
    pub async fn exec_sql(&self, sql: &str, args: &[Value]) -> Result<ExecResult> {
        super::scan::exec(self.driver.as_ref(), sql, args).await
    }

    /// Query raw SQL.
    pub async fn query_sql(&self, sql: &str, args: &[Value]) -> Result<Box<dyn RowIter>> {
        super::scan::query(self.driver.as_ref(), sql, args).await
    }

    /// Begin a transaction with default options.
    pub async fn begin(&self) -> Result<TxDatabase> {
        self.begin_with(TxOptions::default()).await
    }

    /// Begin a transaction with explicit options.
    pub async fn begin_with(&self, opts: TxOptions) -> Result<TxDatabase> {
        tracing::debug!(target: "depiq", "begin transaction");
        let tx = self.driver.begin(opts).await?;
        Ok(TxDatabase {
            dialect: self.dialect.clone(),
            tx: Arc::new(TxHandle { inner: tx }),
        })
    }

    /// Run `f` inside a transaction: commit when it returns `Ok`, roll back
    /// when it returns `Err`.
    ///
    /// If the future unwinds, the dropped transaction handle rolls back per
    /// the [`TxDriver`] drop contract.
    pub async fn with_tx<T, F, Fut>(&self, f: F) -> Result<T>
    where
        F: FnOnce(TxDatabase) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let tx = self.begin().await?;
        match f(tx.clone()).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(error) => match tx.rollback().await {
                Ok(()) => Err(error),
                Err(rollback_err) => Err(Error::driver(format!(
                    "{error} (rollback failed: {rollback_err})"
                ))),
            },
        }
    }
}

/// Wraps the boxed transaction driver so `TxDatabase` can also hand it out
/// as a plain `Arc<dyn Driver>` for dataset binding.
struct TxHandle {
    inner: Box<dyn TxDriver>,
}

impl Driver for TxHandle {
    fn exec<'a>(
        &'a self,
        sql: &'a str,
        args: &'a [Value],
    ) -> crate::exec::driver::BoxFuture<'a, Result<ExecResult>> {
        self.inner.exec(sql, args)
    }

    fn query<'a>(
        &'a self,
        sql: &'a str,
        args: &'a [Value],
    ) -> crate::exec::driver::BoxFuture<'a, Result<Box<dyn RowIter>>> {
        self.inner.query(sql, args)
    }

    fn begin<'a>(
        &'a self,
        opts: TxOptions,
    ) -> crate::exec::driver::BoxFuture<'a, Result<Box<dyn TxDriver>>> {
        self.inner.begin(opts)
    }
}

/// A [`Database`] scoped to one transaction.
#[derive(Clone)]
pub struct TxDatabase {
    dialect: Arc<SqlDialect>,
    tx: Arc<TxHandle>,
}

impl std::fmt::Debug for TxDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxDatabase")
            .field("dialect", &self.dialect.name())
            .finish_non_exhaustive()
    }
}

impl TxDatabase {
    fn db(&self) -> Database {
        Database::from_parts(self.dialect.clone(), self.tx.clone())
    }

    pub fn from(&self, tables: impl IntoColumnList) -> SelectDataset {
        self.db().from(tables)
    }

    pub fn select(&self, cols: impl IntoColumnList) -> SelectDataset {
        self.db().select(cols)
    }

    pub fn insert(&self, table: impl IntoColumnExpr) -> InsertDataset {
        self.db().insert(table)
    }

    pub fn update(&self, table: impl IntoColumnExpr) -> UpdateDataset {
        self.db().update(table)
    }

    pub fn delete(&self, table: impl IntoColumnExpr) -> DeleteDataset {
        self.db().delete(table)
    }

    pub fn truncate(&self, tables: impl IntoColumnList) -> TruncateDataset {
        self.db().truncate(tables)
    }

    pub async fn exec_sql(&self, sql: &str, args: &[Value]) -> Result<ExecResult> {
        self.db().exec_sql(sql, args).await
    }

    /// Commit the transaction.
    pub async fn commit(&self) -> Result<()> {
        tracing::debug!(target: "depiq", "commit transaction");
        self.tx.inner.commit().await
    }

    /// Roll the transaction back.
    pub async fn rollback(&self) -> Result<()> {
        tracing::debug!(target: "depiq", "rollback transaction");
        self.tx.inner.rollback().await
    }
}
