//! The SELECT dataset builder.

use std::sync::Arc;

use crate::clauses::{DeleteClauses, InsertClauses, LimitVal, SelectClauses, TruncateClauses, UpdateClauses};
use crate::config;
use crate::dataset::{adopt_expr, adopt_subquery, from_list, IntoSubquery};
use crate::dataset::{DeleteDataset, InsertDataset, TruncateDataset, UpdateDataset};
use crate::dialect::SqlDialect;
use crate::error::{Error, Result};
use crate::exec::{scan, Driver, RowIter};
use crate::exec::{FromRow, FromValue};
use crate::expr::IntoInOperand;
use crate::expr::{
    CommonTableExpr, CompoundExpr, CompoundOp, Expr, ExprOps, IntoColumnExpr, IntoColumnList,
    IntoExpr, IntoIdent, JoinCond, JoinExpr, JoinKind, Lock, LockStrength, Subquery, SubqueryKind,
    WaitOption, WindowExpr,
};
use crate::value::Value;
use crate::{func, star};

/// A fluent builder for a single SELECT statement.
///
/// Datasets are immutable: every method returns a new dataset and the
/// receiver is unchanged, so intermediate builders can be shared and reused
/// across threads freely.
#[derive(Clone)]
pub struct SelectDataset {
    dialect: Arc<SqlDialect>,
    clauses: SelectClauses,
    prepared: Option<bool>,
    error: Option<Error>,
    driver: Option<Arc<dyn Driver>>,
}

impl std::fmt::Debug for SelectDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectDataset")
            .field("dialect", &self.dialect.name())
            .field("clauses", &self.clauses)
            .field("prepared", &self.prepared)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl SelectDataset {
    pub(crate) fn with_dialect_handle(dialect: Arc<SqlDialect>) -> Self {
        SelectDataset {
            dialect,
            clauses: SelectClauses::new(),
            prepared: None,
            error: None,
            driver: None,
        }
    }

    pub fn new() -> Self {
        Self::with_dialect_handle(config::default_dialect())
    }

    fn derive(&self, clauses: SelectClauses) -> Self {
        SelectDataset {
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

    /// Switch to a registered dialect by name.
    pub fn with_dialect(&self, name: &str) -> Self {
        self.set_dialect(config::get_dialect(name))
    }

    /// Switch to an explicit dialect handle.
    pub fn set_dialect(&self, dialect: Arc<SqlDialect>) -> Self {
        let mut ds = self.clone();
        ds.dialect = dialect;
        ds
    }

    /// Toggle prepared (parameterized) rendering. The flag propagates to
    /// every dataset derived from this one.
    pub fn prepared(&self, prepared: bool) -> Self {
        let mut ds = self.clone();
        ds.prepared = Some(prepared);
        ds
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared.unwrap_or_else(config::default_prepared)
    }

    /// Latch an error on the dataset; the first error wins and is returned
    /// by every later `to_sql()`.
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

    pub fn clauses(&self) -> &SelectClauses {
        &self.clauses
    }

    /// True when the statement projects columns.
    pub fn returns_columns(&self) -> bool {
        self.clauses.returns_columns()
    }

    // ==================== FROM & joins ====================

    /// Replace the FROM sources. Sub-queries without an alias get a
    /// positional `t1`, `t2`, ... alias.
    pub fn from(&self, tables: impl IntoColumnList) -> Self {
        let (items, err) = from_list(&self.dialect, tables.into_column_list());
        let ds = self.derive(self.clauses.set_from(items));
        match err {
            Some(e) => ds.set_error(e),
            None => ds,
        }
    }

    /// Use this dataset as the FROM source of a fresh one (aliased `t1`
    /// unless an alias was set with [`as_`](Self::as_)).
    pub fn from_self(&self) -> Self {
        self.derive(SelectClauses::new()).from(self.clone())
    }

    /// Wrap in a sub-select only when clauses that do not distribute over
    /// compound operators (ORDER BY / LIMIT) are present.
    pub fn compound_from_self(&self) -> Self {
        if self.clauses.is_compound_wrap_needed() {
            self.from_self()
        } else {
            self.clone()
        }
    }

    fn join_cond(&self, kind: JoinKind, target: impl IntoColumnExpr, cond: JoinCond) -> Self {
        let mut target = target.into_column_expr();
        let err = adopt_expr(&self.dialect, &mut target);
        let ds = self.derive(self.clauses.joins_append(JoinExpr {
            kind,
            target: Box::new(target),
            cond,
        }));
        match err {
            Some(e) => ds.set_error(e),
            None => ds,
        }
    }

    /// `INNER JOIN` (alias of [`inner_join`](Self::inner_join)).
    pub fn join(&self, target: impl IntoColumnExpr, cond: JoinCond) -> Self {
        self.inner_join(target, cond)
    }

    pub fn inner_join(&self, target: impl IntoColumnExpr, cond: JoinCond) -> Self {
        self.join_cond(JoinKind::Inner, target, cond)
    }

    pub fn left_join(&self, target: impl IntoColumnExpr, cond: JoinCond) -> Self {
        self.join_cond(JoinKind::Left, target, cond)
    }

    pub fn right_join(&self, target: impl IntoColumnExpr, cond: JoinCond) -> Self {
        self.join_cond(JoinKind::Right, target, cond)
    }

    pub fn full_join(&self, target: impl IntoColumnExpr, cond: JoinCond) -> Self {
        self.join_cond(JoinKind::Full, target, cond)
    }

    pub fn left_outer_join(&self, target: impl IntoColumnExpr, cond: JoinCond) -> Self {
        self.join_cond(JoinKind::LeftOuter, target, cond)
    }

    pub fn right_outer_join(&self, target: impl IntoColumnExpr, cond: JoinCond) -> Self {
        self.join_cond(JoinKind::RightOuter, target, cond)
    }

    pub fn full_outer_join(&self, target: impl IntoColumnExpr, cond: JoinCond) -> Self {
        self.join_cond(JoinKind::FullOuter, target, cond)
    }

    pub fn natural_join(&self, target: impl IntoColumnExpr) -> Self {
        self.join_cond(JoinKind::Natural, target, JoinCond::None)
    }

    pub fn natural_left_join(&self, target: impl IntoColumnExpr) -> Self {
        self.join_cond(JoinKind::NaturalLeft, target, JoinCond::None)
    }

    pub fn natural_right_join(&self, target: impl IntoColumnExpr) -> Self {
        self.join_cond(JoinKind::NaturalRight, target, JoinCond::None)
    }

    pub fn natural_full_join(&self, target: impl IntoColumnExpr) -> Self {
        self.join_cond(JoinKind::NaturalFull, target, JoinCond::None)
    }

    pub fn cross_join(&self, target: impl IntoColumnExpr) -> Self {
        self.join_cond(JoinKind::Cross, target, JoinCond::None)
    }

    // ==================== Projection ====================

    /// Replace the selected columns; an empty list restores `*`.
    pub fn select(&self, cols: impl IntoColumnList) -> Self {
        self.derive(self.clauses.set_select(cols.into_column_list()))
    }

    /// Append selected columns.
    pub fn select_append(&self, cols: impl IntoColumnList) -> Self {
        self.derive(self.clauses.select_append(cols.into_column_list()))
    }

    pub fn clear_select(&self) -> Self {
        self.derive(self.clauses.set_select(Vec::new()))
    }

    /// `SELECT DISTINCT <cols>` — replaces the selection and turns on
    /// `DISTINCT`; with no columns restores `SELECT *` without `DISTINCT`.
    pub fn select_distinct(&self, cols: impl IntoColumnList) -> Self {
        let cols = cols.into_column_list();
        if cols.is_empty() {
            self.derive(self.clauses.set_select(vec![star()]).set_distinct(None))
        } else {
            self.derive(
                self.clauses
                    .set_select(cols)
                    .set_distinct(Some(Vec::new())),
            )
        }
    }

    /// `DISTINCT` with no columns, `DISTINCT ON (<cols>)` with columns.
    pub fn distinct(&self, on: impl IntoColumnList) -> Self {
        self.derive(self.clauses.set_distinct(Some(on.into_column_list())))
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

    /// Append a predicate; predicates AND together at render time.
    pub fn where_(&self, cond: impl IntoExpr) -> Self {
        self.derive(self.clauses.where_append(cond.into_expr()))
    }

    pub fn clear_where(&self) -> Self {
        self.derive(self.clauses.clear_where())
    }

    /// Replace the GROUP BY columns.
    pub fn group_by(&self, cols: impl IntoColumnList) -> Self {
        self.derive(self.clauses.set_group_by(cols.into_column_list()))
    }

    /// Append a HAVING predicate.
    pub fn having(&self, cond: impl IntoExpr) -> Self {
        self.derive(self.clauses.having_append(cond.into_expr()))
    }

    // ==================== Windows ====================

    /// Replace the WINDOW clause definitions.
    pub fn window(&self, window: WindowExpr) -> Self {
        self.derive(self.clauses.set_windows(vec![window]))
    }

    pub fn window_append(&self, window: WindowExpr) -> Self {
        self.derive(self.clauses.windows_append(window))
    }

    pub fn clear_window(&self) -> Self {
        self.derive(self.clauses.clear_windows())
    }

    // ==================== Ordering & paging ====================

    /// Replace the ORDER BY list.
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

    /// `LIMIT ALL`
    pub fn limit_all(&self) -> Self {
        self.derive(self.clauses.set_limit(Some(LimitVal::All)))
    }

    pub fn clear_limit(&self) -> Self {
        self.derive(self.clauses.set_limit(None))
    }

    /// `OFFSET n`; `offset(0)` clears the offset.
    pub fn offset(&self, offset: u64) -> Self {
        self.derive(self.clauses.set_offset(offset))
    }

    pub fn clear_offset(&self) -> Self {
        self.derive(self.clauses.set_offset(0))
    }

    // ==================== Compounds ====================

    fn compound(&self, op: CompoundOp, other: SelectDataset) -> Self {
        let lhs = self.compound_from_self();
        let mut rhs = other.compound_from_self().subquery();
        let err = adopt_subquery(&lhs.dialect, &mut rhs);
        let ds = lhs.derive(lhs.clauses.compounds_append(CompoundExpr { op, rhs }));
        match err {
            Some(e) => ds.set_error(e),
            None => ds,
        }
    }

    pub fn union(&self, other: SelectDataset) -> Self {
        self.compound(CompoundOp::Union, other)
    }

    pub fn union_all(&self, other: SelectDataset) -> Self {
        self.compound(CompoundOp::UnionAll, other)
    }

    pub fn intersect(&self, other: SelectDataset) -> Self {
        self.compound(CompoundOp::Intersect, other)
    }

    pub fn intersect_all(&self, other: SelectDataset) -> Self {
        self.compound(CompoundOp::IntersectAll, other)
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

    /// `WITH <name> AS (<query>)`
    pub fn with(&self, name: &str, query: impl IntoSubquery) -> Self {
        self.with_cte(false, name, query)
    }

    /// `WITH RECURSIVE <name> AS (<query>)`
    pub fn with_recursive(&self, name: &str, query: impl IntoSubquery) -> Self {
        self.with_cte(true, name, query)
    }

    // ==================== Locking ====================

    fn lock(&self, strength: LockStrength, wait: WaitOption, of: Vec<Expr>) -> Self {
        self.derive(self.clauses.set_lock(Some(Lock::new(strength, wait, of))))
    }

    /// `FOR UPDATE [OF tables]`
    pub fn for_update(&self, wait: WaitOption, of: impl IntoColumnList) -> Self {
        self.lock(LockStrength::Update, wait, of.into_column_list())
    }

    /// `FOR NO KEY UPDATE [OF tables]`
    pub fn for_no_key_update(&self, wait: WaitOption, of: impl IntoColumnList) -> Self {
        self.lock(LockStrength::NoKeyUpdate, wait, of.into_column_list())
    }

    /// `FOR SHARE [OF tables]`
    pub fn for_share(&self, wait: WaitOption, of: impl IntoColumnList) -> Self {
        self.lock(LockStrength::Share, wait, of.into_column_list())
    }

    /// `FOR KEY SHARE [OF tables]`
    pub fn for_key_share(&self, wait: WaitOption, of: impl IntoColumnList) -> Self {
        self.lock(LockStrength::KeyShare, wait, of.into_column_list())
    }

    // ==================== Alias & embedding ====================

    /// Set the alias used when this dataset is embedded as a sub-query.
    pub fn as_(&self, alias: impl IntoIdent) -> Self {
        self.derive(self.clauses.set_alias(Some(alias.into_ident())))
    }

    pub(crate) fn subquery(&self) -> Subquery {
        Subquery {
            kind: SubqueryKind::Select(Box::new(self.clauses.clone())),
            dialect: self.dialect.name().to_string(),
            error: self.error.clone(),
        }
    }

    // ==================== Statement conversion ====================

    /// Convert to an UPDATE on the first FROM table, carrying CTEs, WHERE,
    /// ORDER BY, and LIMIT.
    pub fn update(&self) -> UpdateDataset {
        let mut clauses = UpdateClauses::new();
        if let Some(table) = self.clauses.from().first() {
            clauses = clauses.set_table(table.clone());
        }
        for cte in self.clauses.common_tables() {
            clauses = clauses.common_tables_append(cte.clone());
        }
        for cond in self.clauses.where_() {
            clauses = clauses.where_append(cond.clone());
        }
        if !self.clauses.order().is_empty() {
            clauses = clauses.set_order(self.clauses.order().to_vec());
        }
        clauses = clauses.set_limit(self.clauses.limit().cloned());
        UpdateDataset::from_parts(
            self.dialect.clone(),
            clauses,
            self.prepared,
            self.error.clone(),
            self.driver.clone(),
        )
    }

    /// Convert to an INSERT into the first FROM table, carrying CTEs.
    pub fn insert(&self) -> InsertDataset {
        let mut clauses = InsertClauses::new();
        if let Some(table) = self.clauses.from().first() {
            clauses = clauses.set_into(table.clone());
        }
        for cte in self.clauses.common_tables() {
            clauses = clauses.common_tables_append(cte.clone());
        }
        InsertDataset::from_parts(
            self.dialect.clone(),
            clauses,
            self.prepared,
            self.error.clone(),
            self.driver.clone(),
        )
    }

    /// Convert to a DELETE from the first FROM table, carrying CTEs, WHERE,
    /// ORDER BY, and LIMIT.
    pub fn delete(&self) -> DeleteDataset {
        let mut clauses = DeleteClauses::new();
        if let Some(table) = self.clauses.from().first() {
            clauses = clauses.set_from(table.clone());
        }
        for cte in self.clauses.common_tables() {
            clauses = clauses.common_tables_append(cte.clone());
        }
        for cond in self.clauses.where_() {
            clauses = clauses.where_append(cond.clone());
        }
        if !self.clauses.order().is_empty() {
            clauses = clauses.set_order(self.clauses.order().to_vec());
        }
        clauses = clauses.set_limit(self.clauses.limit().cloned());
        DeleteDataset::from_parts(
            self.dialect.clone(),
            clauses,
            self.prepared,
            self.error.clone(),
            self.driver.clone(),
        )
    }

    /// Convert to a TRUNCATE of the FROM tables.
    pub fn truncate(&self) -> TruncateDataset {
        let clauses = TruncateClauses::new().set_tables(self.clauses.from().to_vec());
        TruncateDataset::from_parts(
            self.dialect.clone(),
            clauses,
            self.prepared,
            self.error.clone(),
            self.driver.clone(),
        )
    }

    // ==================== Rendering ====================

    /// Render to `(sql, args)`. A latched error is returned unchanged with
    /// empty output; repeated calls yield identical results.
    pub fn to_sql(&self) -> Result<(String, Vec<Value>)> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let mut b = self.dialect.sql_builder(self.is_prepared());
        self.dialect.to_select_sql(&mut b, &self.clauses);
        b.finish()
    }

    // ==================== Execution ====================

    fn require_driver(&self) -> Result<&Arc<dyn Driver>> {
        self.driver.as_ref().ok_or(Error::QueryFactoryNotFound)
    }

    /// Read every row into `dest`, mapping columns via [`FromRow`].
    pub async fn scan_structs<T: FromRow>(&self, dest: &mut Vec<T>) -> Result<()> {
        let driver = self.require_driver()?.clone();
        let (sql, args) = self.to_sql()?;
        scan::scan_structs(driver.as_ref(), &sql, &args, dest).await
    }

    /// Read at most one row (`LIMIT 1`) into `dest`; returns whether a row
    /// was found.
    pub async fn scan_struct<T: FromRow>(&self, dest: &mut T) -> Result<bool> {
        let driver = self.require_driver()?.clone();
        let (sql, args) = self.limit(1).to_sql()?;
        scan::scan_struct(driver.as_ref(), &sql, &args, dest).await
    }

    /// Read the first column of every row into `dest`.
    pub async fn scan_vals<T: FromValue>(&self, dest: &mut Vec<T>) -> Result<()> {
        let driver = self.require_driver()?.clone();
        let (sql, args) = self.to_sql()?;
        scan::scan_vals(driver.as_ref(), &sql, &args, dest).await
    }

    /// Read the first column of at most one row (`LIMIT 1`); returns whether
    /// a row was found.
    pub async fn scan_val<T: FromValue>(&self, dest: &mut T) -> Result<bool> {
        let driver = self.require_driver()?.clone();
        let (sql, args) = self.limit(1).to_sql()?;
        scan::scan_val(driver.as_ref(), &sql, &args, dest).await
    }

    /// Select `col` and read it from every row.
    pub async fn pluck<T: FromValue>(&self, dest: &mut Vec<T>, col: &str) -> Result<()> {
        self.select(col).scan_vals(dest).await
    }

    /// `SELECT COUNT(*) AS "count" FROM (<self>)`.
    pub async fn count(&self) -> Result<i64> {
        let mut total = 0i64;
        self.from_self()
            .select(func("COUNT", star()).as_("count"))
            .scan_val(&mut total)
            .await?;
        Ok(total)
    }

    /// The streaming row iterator for this query.
    pub async fn scanner(&self) -> Result<Box<dyn RowIter>> {
        let driver = self.require_driver()?.clone();
        let (sql, args) = self.to_sql()?;
        let rows = scan::query(driver.as_ref(), &sql, &args).await?;
        Ok(rows)
    }
}

impl Default for SelectDataset {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoExpr for SelectDataset {
    fn into_expr(self) -> Expr {
        Expr::Subquery(Box::new(self.subquery()))
    }
}

impl IntoColumnExpr for SelectDataset {
    fn into_column_expr(self) -> Expr {
        let alias = self.clauses.alias().cloned();
        let sub = Expr::Subquery(Box::new(self.subquery()));
        match alias {
            Some(alias) => Expr::Aliased {
                expr: Box::new(sub),
                alias,
            },
            None => sub,
        }
    }
}

impl IntoInOperand for SelectDataset {
    fn into_in_operand(self) -> Expr {
        Expr::Subquery(Box::new(self.subquery()))
    }
}

impl IntoSubquery for SelectDataset {
    fn into_subquery(self) -> Subquery {
        self.subquery()
    }
}

impl ExprOps for SelectDataset {}
