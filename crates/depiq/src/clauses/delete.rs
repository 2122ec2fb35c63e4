//! Clause container for DELETE statements.

use crate::clauses::LimitVal;
use crate::expr::{CommonTableExpr, Expr};

/// Clauses of a DELETE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteClauses {
    common_tables: Vec<CommonTableExpr>,
    from: Option<Expr>,
    where_: Vec<Expr>,
    order: Vec<Expr>,
    limit: Option<LimitVal>,
    returning: Option<Vec<Expr>>,
}

impl DeleteClauses {
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

    pub fn from(&self) -> Option<&Expr> {
        self.from.as_ref()
    }

    pub fn set_from(&self, from: Expr) -> Self {
        let mut c = self.clone();
        c.from = Some(from);
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

    pub fn returning(&self) -> Option<&[Expr]> {
        self.returning.as_deref()
    }

    pub fn set_returning(&self, returning: Option<Vec<Expr>>) -> Self {
        let mut c = self.clone();
        c.returning = returning;
        c
    }
}
