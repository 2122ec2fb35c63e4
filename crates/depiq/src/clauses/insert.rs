//! Clause container for INSERT statements.

use crate::expr::{CommonTableExpr, ConflictExpr, Expr, Ident, Subquery};
use crate::record::Record;

/// Clauses of an INSERT statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsertClauses {
    common_tables: Vec<CommonTableExpr>,
    into: Option<Expr>,
    alias: Option<Ident>,
    cols: Option<Vec<Expr>>,
    vals: Vec<Vec<Expr>>,
    rows: Vec<Record>,
    from: Option<Subquery>,
    conflict: Option<ConflictExpr>,
    returning: Option<Vec<Expr>>,
}

impl InsertClauses {
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

    pub fn into_table(&self) -> Option<&Expr> {
        self.into.as_ref()
    }

    pub fn set_into(&self, into: Expr) -> Self {
        let mut c = self.clone();
        c.into = Some(into);
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

    pub fn cols(&self) -> Option<&[Expr]> {
        self.cols.as_deref()
    }

    pub fn set_cols(&self, cols: Option<Vec<Expr>>) -> Self {
        let mut c = self.clone();
        c.cols = cols;
        c
    }

    pub fn cols_append(&self, cols: Vec<Expr>) -> Self {
        let mut c = self.clone();
        c.cols.get_or_insert_with(Vec::new).extend(cols);
        c
    }

    pub fn vals(&self) -> &[Vec<Expr>] {
        &self.vals
    }

    pub fn vals_append(&self, vals: Vec<Vec<Expr>>) -> Self {
        let mut c = self.clone();
        c.vals.extend(vals);
        c
    }

    pub fn clear_vals(&self) -> Self {
        let mut c = self.clone();
        c.vals.clear();
        c
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn set_rows(&self, rows: Vec<Record>) -> Self {
        let mut c = self.clone();
        c.rows = rows;
        c
    }

    pub fn clear_rows(&self) -> Self {
        let mut c = self.clone();
        c.rows.clear();
        c
    }

    pub fn from(&self) -> Option<&Subquery> {
        self.from.as_ref()
    }

    pub fn set_from(&self, from: Subquery) -> Self {
        let mut c = self.clone();
        c.from = Some(from);
        c
    }

    pub fn conflict(&self) -> Option<&ConflictExpr> {
        self.conflict.as_ref()
    }

    pub fn set_conflict(&self, conflict: Option<ConflictExpr>) -> Self {
        let mut c = self.clone();
        c.conflict = conflict;
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

    /// True when the insert has no explicit source (renders `DEFAULT VALUES`).
    pub fn is_empty_source(&self) -> bool {
        self.vals.is_empty() && self.rows.is_empty() && self.from.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::IntoColumnExpr;

    #[test]
    fn copy_on_write() {
        let base = InsertClauses::new().set_into("items".into_column_expr());
        let derived = base.set_rows(vec![Record::new().set("a", 1)]);
        assert!(base.rows().is_empty());
        assert_eq!(derived.rows().len(), 1);
    }

    #[test]
    fn empty_source() {
        let c = InsertClauses::new().set_into("items".into_column_expr());
        assert!(c.is_empty_source());
        assert!(!c.set_rows(vec![Record::new().set("a", 1)]).is_empty_source());
    }
}
