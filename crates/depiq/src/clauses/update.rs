//! Clause container for UPDATE statements.

use crate::clauses::LimitVal;
use crate::expr::{CommonTableExpr, Expr, Ident};
use crate::record::Record;

/// Clauses of an UPDATE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateClauses {
    common_tables: Vec<CommonTableExpr>,
    table: Option<Expr>,
    alias: Option<Ident>,
    set: Option<Record>,
    from: Vec<Expr>,
    where_: Vec<Expr>,
    order: Vec<Expr>,
    limit: Option<LimitVal>,
    returning: Option<Vec<Expr>>,
}

impl UpdateClauses {
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

    pub fn table(&self) -> Option<&Expr> {
        self.table.as_ref()
    }

    pub fn set_table(&self, table: Expr) -> Self {
        let mut c = self.clone();
        c.table = Some(table);
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

    pub fn set_values(&self) -> Option<&Record> {
        self.set.as_ref()
    }

    pub fn set_set_values(&self, set: Record) -> Self {
        let mut c = self.clone();
        c.set = Some(set);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::IntoColumnExpr;

    #[test]
    fn copy_on_write() {
        let base = UpdateClauses::new().set_table("items".into_column_expr());
        let derived = base.set_set_values(Record::new().set("a", 1));
        assert!(base.set_values().is_none());
        assert!(derived.set_values().is_some());
    }
}
