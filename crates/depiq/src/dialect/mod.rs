//! Dialect layer: options, the rendering entry points, and the wrapper that
//! pre-binds a dialect to every statement constructor.
//!
//! A dialect is a `(name, DialectOptions)` pair held in the process-wide
//! registry (see [`crate::register_dialect`]). Rendering has one entry point
//! per statement kind, each serializing a clause container into a
//! [`SqlBuilder`] sink.

mod options;
pub(crate) mod render;

pub use options::{DialectOptions, QuoteEscape};

use std::sync::Arc;

use crate::clauses::{
    DeleteClauses, InsertClauses, SelectClauses, TruncateClauses, UpdateClauses,
};
use crate::config;
use crate::dataset::{
    DeleteDataset, InsertDataset, SelectDataset, TruncateDataset, UpdateDataset,
};
use crate::expr::{IntoColumnExpr, IntoColumnList};
use crate::sql_builder::{PlaceholderStyle, SqlBuilder};

/// A named dialect: options plus statement renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlDialect {
    name: String,
    options: DialectOptions,
}

impl SqlDialect {
    pub fn new(name: impl Into<String>, options: DialectOptions) -> Self {
        SqlDialect {
            name: name.into(),
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &DialectOptions {
        &self.options
    }

    /// Whether this is the process default dialect (relevant for dialect
    /// inheritance of sub-queries).
    pub fn is_default(&self) -> bool {
        self.name == "default"
    }

    /// A sink configured with this dialect's placeholder shape.
    pub fn sql_builder(&self, prepared: bool) -> SqlBuilder {
        SqlBuilder::new(
            prepared,
            PlaceholderStyle {
                fragment: self.options.placeholder_fragment.clone(),
                include_num: self.options.include_placeholder_num,
            },
        )
    }

    pub fn to_select_sql(&self, b: &mut SqlBuilder, clauses: &SelectClauses) {
        render::select::select_sql(self, b, clauses);
    }

    pub fn to_insert_sql(&self, b: &mut SqlBuilder, clauses: &InsertClauses) {
        render::insert::insert_sql(self, b, clauses);
    }

    pub fn to_update_sql(&self, b: &mut SqlBuilder, clauses: &UpdateClauses) {
        render::update::update_sql(self, b, clauses);
    }

    pub fn to_delete_sql(&self, b: &mut SqlBuilder, clauses: &DeleteClauses) {
        render::delete::delete_sql(self, b, clauses);
    }

    pub fn to_truncate_sql(&self, b: &mut SqlBuilder, clauses: &TruncateClauses) {
        render::truncate::truncate_sql(self, b, clauses);
    }
}

/// Pre-binds a registered dialect to every statement constructor.
///
/// ```
/// use depiq::ExprOps;
///
/// let ds = depiq::dialect("mysql").from("test").where_(depiq::col("a").eq(1));
/// let (sql, _) = ds.to_sql().unwrap();
/// assert_eq!(sql, "SELECT * FROM `test` WHERE (`a` = 1)");
/// ```
#[derive(Debug, Clone)]
pub struct DialectWrapper {
    dialect: Arc<SqlDialect>,
}

impl DialectWrapper {
    pub(crate) fn new(name: &str) -> Self {
        DialectWrapper {
            dialect: config::get_dialect(name),
        }
    }

    /// `SELECT * FROM <tables>`
    pub fn from(&self, tables: impl IntoColumnList) -> SelectDataset {
        SelectDataset::with_dialect_handle(self.dialect.clone()).from(tables)
    }

    /// `SELECT <cols>` with no FROM clause.
    pub fn select(&self, cols: impl IntoColumnList) -> SelectDataset {
        SelectDataset::with_dialect_handle(self.dialect.clone()).select(cols)
    }

    /// `INSERT INTO <table>`
    pub fn insert(&self, table: impl IntoColumnExpr) -> InsertDataset {
        InsertDataset::with_dialect_handle(self.dialect.clone(), table)
    }

    /// `UPDATE <table>`
    pub fn update(&self, table: impl IntoColumnExpr) -> UpdateDataset {
        UpdateDataset::with_dialect_handle(self.dialect.clone(), table)
    }

    /// `DELETE FROM <table>`
    pub fn delete(&self, table: impl IntoColumnExpr) -> DeleteDataset {
        DeleteDataset::with_dialect_handle(self.dialect.clone(), table)
    }

    /// `TRUNCATE <tables>`
    pub fn truncate(&self, tables: impl IntoColumnList) -> TruncateDataset {
        TruncateDataset::with_dialect_handle(self.dialect.clone(), tables)
    }
}
