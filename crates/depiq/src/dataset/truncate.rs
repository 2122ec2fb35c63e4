//! The TRUNCATE dataset builder.

use std::sync::Arc;

use crate::clauses::{TruncateClauses, TruncateOptions};
use crate::config;
use crate::dialect::SqlDialect;
use crate::error::{Error, Result};
use crate::exec::{scan, Driver, ExecResult};
use crate::expr::IntoColumnList;
use crate::value::Value;

/// A fluent builder for a single TRUNCATE statement.
#[derive(Clone)]
pub struct TruncateDataset {
    dialect: Arc<SqlDialect>,
    clauses: TruncateClauses,
    prepared: Option<bool>,
    error: Option<Error>,
    driver: Option<Arc<dyn Driver>>,
}

impl std::fmt::Debug for TruncateDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TruncateDataset")
            .field("dialect", &self.dialect.name())
            .field("clauses", &self.clauses)
            .field("prepared", &self.prepared)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl TruncateDataset {
    pub(crate) fn with_dialect_handle(
        dialect: Arc<SqlDialect>,
        tables: impl IntoColumnList,
    ) -> Self {
        TruncateDataset {
            dialect,
            clauses: TruncateClauses::new().set_tables(tables.into_column_list()),
            prepared: None,
            error: None,
            driver: None,
        }
    }

    pub fn new(tables: impl IntoColumnList) -> Self {
        Self::with_dialect_handle(config::default_dialect(), tables)
    }

    pub(crate) fn from_parts(
        dialect: Arc<SqlDialect>,
        clauses: TruncateClauses,
        prepared: Option<bool>,
        error: Option<Error>,
        driver: Option<Arc<dyn Driver>>,
    ) -> Self {
        TruncateDataset {
            dialect,
            clauses,
            prepared,
            error,
            driver,
        }
    }

    fn derive(&self, clauses: TruncateClauses) -> Self {
        TruncateDataset {
            dialect: self.dialect.clone(),
            clauses,
            prepared: self.prepared,
            error: self.error.clone(),
            driver: self.driver.clone(),
        }
    }

    pub(crate) fn bind_driver(mut self, driver: Arc<dyn Driver>) -> Self {
        self.driver = Some(driver);
        self
    }

    // ==================== Dialect, prepared, errors ====================

    pub fn dialect(&self) -> &Arc<SqlDialect> {
        &self.dialect
    }

    pub fn with_dialect(&self, name: &str) -> Self {
        self.set_dialect(config::get_dialect(name))
    }

    pub fn set_dialect(&self, dialect: Arc<SqlDialect>) -> Self {
        let mut ds = self.clone();
        ds.dialect = dialect;
        ds
    }

    pub fn prepared(&self, prepared: bool) -> Self {
        let mut ds = self.clone();
        ds.prepared = Some(prepared);
        ds
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared.unwrap_or_else(config::default_prepared)
    }

    pub fn set_error(&self, err: Error) -> Self {
        let mut ds = self.clone();
        if ds.error.is_none() {
            ds.error = Some(err);
        }
        ds
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn clauses(&self) -> &TruncateClauses {
        &self.clauses
    }

    // ==================== Clauses ====================

    /// Replace the tables being truncated.
    pub fn table(&self, tables: impl IntoColumnList) -> Self {
        self.derive(self.clauses.set_tables(tables.into_column_list()))
    }

    fn options(&self, f: impl FnOnce(&mut TruncateOptions)) -> Self {
        let mut opts = self.clauses.options().clone();
        f(&mut opts);
        self.derive(self.clauses.set_options(opts))
    }

    /// `CASCADE`
    pub fn cascade(&self) -> Self {
        self.options(|o| o.cascade = true)
    }

    pub fn no_cascade(&self) -> Self {
        self.options(|o| o.cascade = false)
    }

    /// `RESTRICT`
    pub fn restrict(&self) -> Self {
        self.options(|o| o.restrict = true)
    }

    pub fn no_restrict(&self) -> Self {
        self.options(|o| o.restrict = false)
    }

    /// `RESTART IDENTITY` / `CONTINUE IDENTITY`
    pub fn identity(&self, identity: impl Into<String>) -> Self {
        self.options(|o| o.identity = identity.into())
    }

    // ==================== Rendering & execution ====================

    pub fn to_sql(&self) -> Result<(String, Vec<Value>)> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let mut b = self.dialect.sql_builder(self.is_prepared());
        self.dialect.to_truncate_sql(&mut b, &self.clauses);
        b.finish()
    }

    fn require_driver(&self) -> Result<&Arc<dyn Driver>> {
        self.driver.as_ref().ok_or(Error::QueryFactoryNotFound)
    }

    /// Run the statement.
    pub async fn exec(&self) -> Result<ExecResult> {
        let driver = self.require_driver()?.clone();
        let (sql, args) = self.to_sql()?;
        scan::exec(driver.as_ref(), &sql, &args).await
    }
}
