//! The INSERT dataset builder.

use std::sync::Arc;

use crate::clauses::InsertClauses;
use crate::config;
use crate::dataset::{adopt_subquery, IntoSubquery};
use crate::dialect::SqlDialect;
use crate::error::{Error, Result};
use crate::exec::{scan, Driver, ExecResult, RowIter};
use crate::exec::{FromRow, FromValue};
use crate::expr::{
    CommonTableExpr, ConflictExpr, Expr, IntoColumnExpr, IntoColumnList, Subquery, SubqueryKind,
};
use crate::record::IntoRows;
use crate::value::Value;

/// A fluent builder for a single INSERT statement.
#[derive(Clone)]
pub struct InsertDataset {
    dialect: Arc<SqlDialect>,
    clauses: InsertClauses,
    prepared: Option<bool>,
    error: Option<Error>,
    driver: Option<Arc<dyn Driver>>,
}

impl std::fmt::Debug for InsertDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsertDataset")
            .field("dialect", &self.dialect.name())
            .field("clauses", &self.clauses)
            .field("prepared", &self.prepared)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl InsertDataset {
    pub(crate) fn with_dialect_handle(
        dialect: Arc<SqlDialect>,
        table: impl IntoColumnExpr,
    ) -> Self {
        InsertDataset {
            dialect,
            clauses: InsertClauses::new().set_into(table.into_column_expr()),
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
        clauses: InsertClauses,
        prepared: Option<bool>,
        error: Option<Error>,
        driver: Option<Arc<dyn Driver>>,
    ) -> Self {
        InsertDataset {
            dialect,
            clauses,
            prepared,
            error,
            driver,
        }
    }

    fn derive(&self, clauses: InsertClauses) -> Self {
        InsertDataset {
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

    pub fn clauses(&self) -> &InsertClauses {
        &self.clauses
    }

    // ==================== Target ====================

    /// Change the target table. An aliased expression (`table("t").as_(..)`)
    /// renders as `INSERT INTO <table> AS <alias>`.
    pub fn into(&self, table: impl IntoColumnExpr) -> Self {
        self.derive(self.clauses.set_into(table.into_column_expr()))
    }

    // ==================== Source ====================

    /// Replace the explicit column list.
    pub fn cols(&self, cols: impl IntoColumnList) -> Self {
        self.derive(self.clauses.set_cols(Some(cols.into_column_list())))
    }

    pub fn cols_append(&self, cols: impl IntoColumnList) -> Self {
        self.derive(self.clauses.cols_append(cols.into_column_list()))
    }

    pub fn clear_cols(&self) -> Self {
        self.derive(self.clauses.set_cols(None))
    }

    /// Append value rows matching the explicit column list.
    pub fn vals(&self, vals: Vec<Vec<Expr>>) -> Self {
        self.derive(self.clauses.vals_append(vals))
    }

    pub fn clear_vals(&self) -> Self {
        self.derive(self.clauses.clear_vals())
    }

    /// Append rows (records, mapped structs, or vectors of either). The
    /// column list is the lexicographic union across all rows; missing cells
    /// render `DEFAULT`.
    pub fn rows(&self, rows: impl IntoRows) -> Self {
        match rows.into_rows() {
            Ok(mut rows) => {
                let mut all = self.clauses.rows().to_vec();
                all.append(&mut rows);
                self.derive(self.clauses.set_rows(all))
            }
            Err(err) => self.set_error(err),
        }
    }

    pub fn clear_rows(&self) -> Self {
        self.derive(self.clauses.clear_rows())
    }

    /// Insert from a SELECT. A default-dialect query adopts this dataset's
    /// dialect; differing non-default dialects latch an incompatibility
    /// error.
    pub fn from_query(&self, query: impl IntoSubquery) -> Self {
        let mut sq = query.into_subquery();
        let err = adopt_subquery(&self.dialect, &mut sq);
        let ds = self.derive(self.clauses.set_from(sq));
        match err {
            Some(e) => ds.set_error(e),
            None => ds,
        }
    }

    // ==================== Conflict & returning ====================

    /// Attach an `ON CONFLICT` clause (see [`do_nothing`](crate::do_nothing)
    /// and [`do_update`](crate::do_update)).
    pub fn on_conflict(&self, conflict: ConflictExpr) -> Self {
        self.derive(self.clauses.set_conflict(Some(conflict)))
    }

    pub fn clear_on_conflict(&self) -> Self {
        self.derive(self.clauses.set_conflict(None))
    }

    /// `RETURNING <cols>`
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
        self.dialect.to_insert_sql(&mut b, &self.clauses);
        b.finish()
    }

    fn require_driver(&self) -> Result<&Arc<dyn Driver>> {
        self.driver.as_ref().ok_or(Error::QueryFactoryNotFound)
    }

    /// Run the statement, returning affected rows and last insert id.
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

    /// Read the first `RETURNING` row into `dest`.
    pub async fn scan_struct<T: FromRow>(&self, dest: &mut T) -> Result<bool> {
        let driver = self.require_driver()?.clone();
        let (sql, args) = self.to_sql()?;
        scan::scan_struct(driver.as_ref(), &sql, &args, dest).await
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
            kind: SubqueryKind::Insert(Box::new(self.clauses.clone())),
            dialect: self.dialect.name().to_string(),
            error: self.error.clone(),
        }
    }
}

impl IntoSubquery for InsertDataset {
    fn into_subquery(self) -> Subquery {
        self.subquery()
    }
}
