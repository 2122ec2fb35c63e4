//! The UPDATE dataset builder.

use std::sync::Arc;

use crate::clauses::{LimitVal, UpdateClauses};
use crate::config;
use crate::dataset::{adopt_subquery, from_list, IntoSubquery};
use crate::dialect::SqlDialect;
use crate::error::{Error, Result};
use crate::exec::{scan, Driver, ExecResult, RowIter};
use crate::exec::{FromRow, FromValue};
use crate::expr::{CommonTableExpr, IntoColumnExpr, IntoColumnList, IntoExpr, Subquery, SubqueryKind};
use crate::record::IntoSetRecord;
use crate::value::Value;

/// A fluent builder for a single UPDATE statement.
#[derive(Clone)]
pub struct UpdateDataset {
    dialect: Arc<SqlDialect>,
    clauses: UpdateClauses,
    prepared: Option<bool>,
    error: Option<Error>,
    driver: Option<Arc<dyn Driver>>,
}

impl std::fmt::Debug for UpdateDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateDataset")
            .field("dialect", &self.dialect.name())
            .field("clauses", &self.clauses)
            .field("prepared", &self.prepared)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl UpdateDataset {
    pub(crate) fn with_dialect_handle(
        dialect: Arc<SqlDialect>,
        table: impl IntoColumnExpr,
    ) -> Self {
        UpdateDataset {
            dialect,
            clauses: UpdateClauses::new().set_table(table.into_column_expr()),
            prepared: None,
            error: None,
            driver: None,
        }
    }

    pub fn new(table: impl IntoColumnExpr) -> Self {
        Self::with_dialect_handle(config::default_dialect(), table)
    }

    pub(crate) fn from_parts(
        dialect: Arc<SqlDialect>,
        clauses: UpdateClauses,
        prepared: Option<bool>,
        error: Option<Error>,
        driver: Option<Arc<dyn Driver>>,
    ) -> Self {
        UpdateDataset {
            dialect,
            clauses,
            prepared,
            error,
            driver,
        }
    }

    fn derive(&self, clauses: UpdateClauses) -> Self {
        UpdateDataset {
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

    pub fn clauses(&self) -> &UpdateClauses {
        &self.clauses
    }

    // ==================== Target & values ====================

    /// Change the table being updated.
    pub fn table(&self, table: impl IntoColumnExpr) -> Self {
        self.derive(self.clauses.set_table(table.into_column_expr()))
    }

    /// Replace the SET values (a record, mapped struct, or `set(...)` pairs).
    pub fn set(&self, values: impl IntoSetRecord) -> Self {
        match values.into_set_record() {
            Ok(rec) => self.derive(self.clauses.set_set_values(rec)),
            Err(err) => self.set_error(err),
        }
    }

    /// Additional tables of a multi-table update. Rendering depends on the
    /// dialect (a `FROM` clause, or inline after `UPDATE`).
    pub fn from(&self, tables: impl IntoColumnList) -> Self {
        let (items, err) = from_list(&self.dialect, tables.into_column_list());
        let ds = self.derive(self.clauses.set_from(items));
        match err {
            Some(e) => ds.set_error(e),
            None => ds,
        }
    }

    // ==================== WHERE / ORDER / LIMIT / RETURNING ====================

    /// Append a predicate; predicates AND together at render time.
    pub fn where_(&self, cond: impl IntoExpr) -> Self {
        self.derive(self.clauses.where_append(cond.into_expr()))
    }

    pub fn clear_where(&self) -> Self {
        self.derive(self.clauses.clear_where())
    }

    pub fn order(&self, order: impl IntoColumnList) -> Self {
        self.derive(self.clauses.set_order(order.into_column_list()))
    }

    pub fn order_append(&self, order: impl IntoColumnList) -> Self {
        self.derive(self.clauses.order_append(order.into_column_list()))
    }

    pub fn order_prepend(&self, order: impl IntoColumnList) -> Self {
        self.derive(self.clauses.order_prepend(order.into_column_list()))
    }

    pub fn clear_order(&self) -> Self {
        self.derive(self.clauses.clear_order())
    }

    /// `LIMIT n`; `limit(0)` clears the limit.
    pub fn limit(&self, limit: u64) -> Self {
        if limit == 0 {
            self.clear_limit()
        } else {
            self.derive(self.clauses.set_limit(Some(LimitVal::Number(limit))))
        }
    }

    pub fn limit_all(&self) -> Self {
        self.derive(self.clauses.set_limit(Some(LimitVal::All)))
    }

    pub fn clear_limit(&self) -> Self {
        self.derive(self.clauses.set_limit(None))
    }

    pub fn returning(&self, cols: impl IntoColumnList) -> Self {
        self.derive(self.clauses.set_returning(Some(cols.into_column_list())))
    }

    // ==================== CTEs ====================

    fn with_cte(&self, recursive: bool, name: &str, query: impl IntoSubquery) -> Self {
        let mut sq = query.into_subquery();
        let err = adopt_subquery(&self.dialect, &mut sq);
        let ds = self.derive(self.clauses.common_tables_append(CommonTableExpr {
            recursive,
            name: name.to_string(),
            query: sq,
        }));
        match err {
            Some(e) => ds.set_error(e),
            None => ds,
        }
    }

    pub fn with(&self, name: &str, query: impl IntoSubquery) -> Self {
        self.with_cte(false, name, query)
    }

    pub fn with_recursive(&self, name: &str, query: impl IntoSubquery) -> Self {
        self.with_cte(true, name, query)
    }

    // ==================== Rendering & execution ====================

    pub fn to_sql(&self) -> Result<(String, Vec<Value>)> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let mut b = self.dialect.sql_builder(self.is_prepared());
        self.dialect.to_update_sql(&mut b, &self.clauses);
        b.finish()
    }

    fn require_driver(&self) -> Result<&Arc<dyn Driver>> {
        self.driver.as_ref().ok_or(Error::QueryFactoryNotFound)
    }

    /// Run the statement, returning the number of affected rows.
    pub async fn exec(&self) -> Result<ExecResult> {
        let driver = self.require_driver()?.clone();
        let (sql, args) = self.to_sql()?;
        scan::exec(driver.as_ref(), &sql, &args).await
    }

    /// Read every `RETURNING` row into `dest`.
    pub async fn scan_structs<T: FromRow>(&self, dest: &mut Vec<T>) -> Result<()> {
        let driver = self.require_driver()?.clone();
        let (sql, args) = self.to_sql()?;
        scan::scan_structs(driver.as_ref(), &sql, &args, dest).await
    }

    /// Read the first `RETURNING` column of every row into `dest`.
    pub async fn scan_vals<T: FromValue>(&self, dest: &mut Vec<T>) -> Result<()> {
        let driver = self.require_driver()?.clone();
        let (sql, args) = self.to_sql()?;
        scan::scan_vals(driver.as_ref(), &sql, &args, dest).await
    }

    /// Read the first `RETURNING` column of the first row into `dest`.
    pub async fn scan_val<T: FromValue>(&self, dest: &mut T) -> Result<bool> {
        let driver = self.require_driver()?.clone();
        let (sql, args) = self.to_sql()?;
        scan::scan_val(driver.as_ref(), &sql, &args, dest).await
    }

    /// The streaming row iterator for the `RETURNING` result set.
    pub async fn scanner(&self) -> Result<Box<dyn RowIter>> {
        let driver = self.require_driver()?.clone();
        let (sql, args) = self.to_sql()?;
        scan::query(driver.as_ref(), &sql, &args).await
    }

    pub(crate) fn subquery(&self) -> Subquery {
        Subquery {
            kind: SubqueryKind::Update(Box::new(self.clauses.clone())),
            dialect: self.dialect.name().to_string(),
            error: self.error.clone(),
        }
    }
}

impl IntoSubquery for UpdateDataset {
    fn into_subquery(self) -> Subquery {
        self.subquery()
    }
}
