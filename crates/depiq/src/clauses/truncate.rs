//! Clause container for TRUNCATE statements.

use crate::expr::Expr;

/// Identity-sequence behavior of a TRUNCATE statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TruncateOptions {
    pub cascade: bool,
    pub restrict: bool,
    /// `""`, `"RESTART"`, or `"CONTINUE"`.
    pub identity: String,
}

/// Clauses of a TRUNCATE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TruncateClauses {
    tables: Vec<Expr>,
    options: TruncateOptions,
}

impl TruncateClauses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &[Expr] {
        &self.tables
    }

    pub fn set_tables(&self, tables: Vec<Expr>) -> Self {
        let mut c = self.clone();
        c.tables = tables;
        c
    }

    pub fn options(&self) -> &TruncateOptions {
        &self.options
    }

    pub fn set_options(&self, options: TruncateOptions) -> Self {
        let mut c = self.clone();
        c.options = options;
        c
    }
}
