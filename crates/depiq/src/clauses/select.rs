//! Clause container for SELECT statements.

use crate::expr::{CommonTableExpr, CompoundExpr, Expr, Ident, JoinExpr, Lock, WindowExpr};

/// The `LIMIT` slot: a number or the `ALL` keyword.
#[derive(Debug, Clone, PartialEq)]
pub enum LimitVal {
    Number(u64),
    All,
}

/// Clauses of a SELECT statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectClauses {
    common_tables: Vec<CommonTableExpr>,
    select: Vec<Expr>,
    distinct: Option<Vec<Expr>>,
    from: Vec<Expr>,
    joins: Vec<JoinExpr>,
    where_: Vec<Expr>,
    group_by: Vec<Expr>,
    having: Vec<Expr>,
    windows: Vec<WindowExpr>,
    order: Vec<Expr>,
    limit: Option<LimitVal>,
    offset: u64,
    compounds: Vec<CompoundExpr>,
    lock: Option<Lock>,
    alias: Option<Ident>,
}

impl SelectClauses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn common_tables(&self) -> &[CommonTableExpr] {
        &self.common_tables
    }

    pub fn common_tables_append(&self, cte: CommonTableExpr) -> Self {
        let mut c = self.clone();
        c.common_tables.push(cte);
        c
    }

    /// Selected columns; empty means `*`.
    pub fn select(&self) -> &[Expr] {
        &self.select
    }

    pub fn set_select(&self, cols: Vec<Expr>) -> Self {
        let mut c = self.clone();
        c.select = cols;
        c
    }

    pub fn select_append(&self, cols: Vec<Expr>) -> Self {
        let mut c = self.clone();
        c.select.extend(cols);
        c
    }

    /// `None` — no DISTINCT; `Some(empty)` — `DISTINCT`; `Some(cols)` —
    /// `DISTINCT ON (cols)`.
    pub fn distinct(&self) -> Option<&[Expr]> {
        self.distinct.as_deref()
    }

    pub fn set_distinct(&self, cols: Option<Vec<Expr>>) -> Self {
        let mut c = self.clone();
        c.distinct = cols;
        c
    }

    pub fn from(&self) -> &[Expr] {
        &self.from
    }

    pub fn set_from(&self, from: Vec<Expr>) -> Self {
        let mut c = self.clone();
        c.from = from;
        c
    }

    pub fn joins(&self) -> &[JoinExpr] {
        &self.joins
    }

    pub fn joins_append(&self, join: JoinExpr) -> Self {
        let mut c = self.clone();
        c.joins.push(join);
        c
    }

    pub fn where_(&self) -> &[Expr] {
        &self.where_
    }

    pub fn where_append(&self, cond: Expr) -> Self {
        let mut c = self.clone();
        c.where_.push(cond);
        c
    }

    pub fn clear_where(&self) -> Self {
        let mut c = self.clone();
        c.where_.clear();
        c
    }

    pub fn group_by(&self) -> &[Expr] {
        &self.group_by
    }

    pub fn set_group_by(&self, cols: Vec<Expr>) -> Self {
        let mut c = self.clone();
        c.group_by = cols;
        c
    }

    pub fn having(&self) -> &[Expr] {
        &self.having
    }

    pub fn having_append(&self, cond: Expr) -> Self {
        let mut c = self.clone();
        c.having.push(cond);
        c
    }

    pub fn windows(&self) -> &[WindowExpr] {
        &self.windows
    }

    pub fn set_windows(&self, windows: Vec<WindowExpr>) -> Self {
        let mut c = self.clone();
        c.windows = windows;
        c
    }

    pub fn windows_append(&self, window: WindowExpr) -> Self {
        let mut c = self.clone();
        c.windows.push(window);
        c
    }

    pub fn clear_windows(&self) -> Self {
        let mut c = self.clone();
        c.windows.clear();
        c
    }

    pub fn order(&self) -> &[Expr] {
        &self.order
    }

    pub fn set_order(&self, order: Vec<Expr>) -> Self {
        let mut c = self.clone();
        c.order = order;
        c
    }

    pub fn order_append(&self, order: Vec<Expr>) -> Self {
        let mut c = self.clone();
        c.order.extend(order);
        c
    }

    pub fn order_prepend(&self, order: Vec<Expr>) -> Self {
        let mut c = self.clone();
        let mut o = order;
        o.extend(c.order.drain(..));
        c.order = o;
        c
    }

    pub fn clear_order(&self) -> Self {
        let mut c = self.clone();
        c.order.clear();
        c
    }

    pub fn limit(&self) -> Option<&LimitVal> {
        self.limit.as_ref()
    }

    pub fn set_limit(&self, limit: Option<LimitVal>) -> Self {
        let mut c = self.clone();
        c.limit = limit;
        c
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn set_offset(&self, offset: u64) -> Self {
        let mut c = self.clone();
        c.offset = offset;
        c
    }

    pub fn compounds(&self) -> &[CompoundExpr] {
        &self.compounds
    }

    pub fn compounds_append(&self, compound: CompoundExpr) -> Self {
        let mut c = self.clone();
        c.compounds.push(compound);
        c
    }

    pub fn lock(&self) -> Option<&Lock> {
        self.lock.as_ref()
    }

    pub fn set_lock(&self, lock: Option<Lock>) -> Self {
        let mut c = self.clone();
        c.lock = lock;
        c
    }

    pub fn alias(&self) -> Option<&Ident> {
        self.alias.as_ref()
    }

    pub fn set_alias(&self, alias: Option<Ident>) -> Self {
        let mut c = self.clone();
        c.alias = alias;
        c
    }

    /// True when the statement projects columns (a non-empty select list or
    /// the implicit `*` over a FROM source).
    pub fn returns_columns(&self) -> bool {
        !self.select.is_empty() || !self.from.is_empty()
    }

    /// True when wrapping is needed before attaching a compound (the
    /// statement already carries clauses that do not distribute over
    /// `UNION`/`INTERSECT`).
    pub fn is_compound_wrap_needed(&self) -> bool {
        self.limit.is_some() || !self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Ex, IntoColumnList, IntoExpr};
    use crate::ExprOps;
    use crate::col;

    #[test]
    fn setters_do_not_mutate_original() {
        let base = SelectClauses::new().set_from("test".into_column_list());
        let derived = base.where_append(Ex::new().set("a", 1).into_expr());
        assert!(base.where_().is_empty());
        assert_eq!(derived.where_().len(), 1);
        assert_eq!(base.from(), derived.from());
    }

    #[test]
    fn order_prepend_keeps_existing_tail() {
        let base = SelectClauses::new().set_order(vec![col("a").asc()]);
        let c = base.order_prepend(vec![col("b").asc()]);
        assert_eq!(c.order()[0], col("b").asc());
        assert_eq!(c.order()[1], col("a").asc());
    }

    #[test]
    fn compound_wrap_needed() {
        let base = SelectClauses::new().set_from("test".into_column_list());
        assert!(!base.is_compound_wrap_needed());
        assert!(base
            .set_limit(Some(LimitVal::Number(1)))
            .is_compound_wrap_needed());
        assert!(base.set_order(vec![col("a").asc()]).is_compound_wrap_needed());
    }
}
