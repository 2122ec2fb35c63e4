//! # depiq
//!
//! A fluent, composable SQL query builder with pluggable dialects and a
//! lightweight async execution layer.
//!
//! ## Features
//!
//! - **Expression algebra**: immutable trees for `SELECT`, `INSERT`,
//!   `UPDATE`, `DELETE`, and `TRUNCATE`, composed through chainable builders
//! - **Dialects**: one grammar table per database (`default`, `postgres`,
//!   `mysql`, `sqlite3`, `sqlserver`), extensible at runtime
//! - **Prepared or interpolated**: the same tree renders to placeholders plus
//!   an argument list, or to fully inlined SQL text
//! - **Sticky errors**: the first builder or rendering error stays attached
//!   to the dataset and is returned by every later `to_sql()`
//! - **Execution adapter**: bring your own driver handle; datasets bound to a
//!   [`Database`] scan rows into structs and scalars
//!
//! ## Building a query
//!
//! ```
//! use depiq::{col, ExprOps, Op, Ex};
//!
//! let ds = depiq::from("test").where_(
//!     Ex::new()
//!         .set("a", Op::gt(10))
//!         .set("b", Op::lt(10))
//!         .set("c", depiq::Value::Null)
//!         .set("d", vec!["a", "b", "c"]),
//! );
//! let (sql, args) = ds.to_sql().unwrap();
//! assert_eq!(
//!     sql,
//!     r#"SELECT * FROM "test" WHERE (("a" > 10) AND ("b" < 10) AND ("c" IS NULL) AND ("d" IN ('a', 'b', 'c')))"#
//! );
//! assert!(args.is_empty());
//!
//! let (sql, args) = ds.prepared(true).to_sql().unwrap();
//! assert_eq!(
//!     sql,
//!     r#"SELECT * FROM "test" WHERE (("a" > 10) AND ("b" < 10) AND ("c" IS NULL) AND ("d" IN (?, ?, ?)))"#
//! );
//! assert_eq!(args.len(), 3);
//! # let _ = col("unused");
//! ```

/// Build a [`lit_args`] literal: `lit!("? + ?", 1, 2)`.
#[macro_export]
macro_rules! lit {
    ($template:expr) => {
        $crate::lit($template)
    };
    ($template:expr, $($arg:expr),+ $(,)?) => {
        $crate::lit_args($template, vec![$($crate::IntoExpr::into_expr($arg)),+])
    };
}

/// Build one row of values for [`InsertDataset::vals`]:
/// `vals!["a1", "b1", 42]`.
#[macro_export]
macro_rules! vals {
    ($($v:expr),* $(,)?) => {
        vec![$($crate::IntoExpr::into_expr($v)),*]
    };
}

mod clauses;
mod config;
mod dataset;
mod dialect;
mod error;
mod exec;
mod expr;
mod record;
mod sql_builder;
mod value;

pub use clauses::{
    DeleteClauses, InsertClauses, LimitVal, SelectClauses, TruncateClauses, TruncateOptions,
    UpdateClauses,
};
pub use config::{
    default_prepared, deregister_dialect, get_dialect, register_dialect,
    set_column_rename_function, set_default_prepared, set_ignore_untagged_fields,
};
pub use dataset::{
    DeleteDataset, InsertDataset, IntoSubquery, SelectDataset, TruncateDataset, UpdateDataset,
};
pub use dialect::{DialectOptions, DialectWrapper, QuoteEscape, SqlDialect};
pub use error::{Error, Result};
pub use exec::{
    BoxFuture, Database, Driver, ExecResult, FromRow, FromValue, IsolationLevel, Row, RowIter,
    TxDatabase, TxDriver, TxOptions,
};
pub use expr::{
    BinaryOp, CaseExpr, ColumnPart, CommonTableExpr, CompoundExpr, CompoundOp, ConflictExpr, Ex,
    ExOr, ExVal, Expr, ExprOps, GroupOp, Ident, IntoColumnExpr, IntoColumnList, IntoExpr,
    IntoIdent, IntoInOperand, JoinCond, JoinExpr, JoinKind, Lock, LockStrength, NullSort, Op,
    RangeVal, SetPair, SortDir, Subquery, SubqueryKind, WaitOption, WindowExpr,
};
pub use record::{ColumnMap, FieldDef, IntoRows, IntoSetRecord, NormalizeKind, Record, record_from};
pub use sql_builder::{PlaceholderStyle, SqlBuilder};
pub use value::{regex, IntoValue, Value};

// ==================== Statement constructors ====================

/// `SELECT * FROM <tables>` on the default dialect.
pub fn from(tables: impl IntoColumnList) -> SelectDataset {
    SelectDataset::new().from(tables)
}

/// `SELECT <cols>` with no FROM clause, on the default dialect.
pub fn select(cols: impl IntoColumnList) -> SelectDataset {
    SelectDataset::new().select(cols)
}

/// `INSERT INTO <table>` on the default dialect.
pub fn insert(table: impl IntoColumnExpr) -> InsertDataset {
    InsertDataset::new(table)
}

/// `UPDATE <table>` on the default dialect.
pub fn update(table: impl IntoColumnExpr) -> UpdateDataset {
    UpdateDataset::new(table)
}

/// `DELETE FROM <table>` on the default dialect.
pub fn delete(table: impl IntoColumnExpr) -> DeleteDataset {
    DeleteDataset::new(table)
}

/// `TRUNCATE <tables>` on the default dialect.
pub fn truncate(tables: impl IntoColumnList) -> TruncateDataset {
    TruncateDataset::new(tables)
}

/// A wrapper pre-binding the named registered dialect to every statement
/// constructor.
pub fn dialect(name: &str) -> DialectWrapper {
    DialectWrapper::new(name)
}

// ==================== Expression factories ====================

/// A column identifier. The name is taken verbatim (no dot parsing).
pub fn col(name: impl Into<String>) -> Ident {
    Ident::col(name)
}

/// A dot-parsed identifier: `"c"`, `"t.c"`, or `"s.t.c"`; a trailing `*`
/// selects all columns.
pub fn ident(qualified: &str) -> Ident {
    Ident::parse(qualified)
}

/// A table identifier.
pub fn table(name: impl Into<String>) -> Ident {
    Ident::table(name)
}

/// A schema identifier.
pub fn schema(name: impl Into<String>) -> Ident {
    Ident::schema(name)
}

/// A raw SQL fragment with no arguments.
pub fn lit(template: impl Into<String>) -> Expr {
    Expr::Literal {
        template: template.into(),
        args: Vec::new(),
    }
}

/// A raw SQL fragment whose `?` holes are filled from `args` (inline when
/// interpolated, placeholders when prepared). See also the [`lit!`] macro.
pub fn lit_args(template: impl Into<String>, args: Vec<Expr>) -> Expr {
    Expr::Literal {
        template: template.into(),
        args,
    }
}

/// A value expression (`?` literal bound to one argument).
pub fn val(v: impl IntoValue) -> Expr {
    Expr::Value(v.into_value())
}

/// The `*` column.
pub fn star() -> Expr {
    lit("*")
}

/// The `DEFAULT` keyword.
pub fn default_value() -> Expr {
    Expr::Default
}

/// A named SQL function call. Strings among the arguments are treated as
/// identifiers; use [`val`] or [`lit`] for values and fragments.
pub fn func(name: impl Into<String>, args: impl IntoColumnList) -> Expr {
    Expr::Func {
        name: name.into(),
        args: args.into_column_list(),
    }
}

/// `CAST(<expr> AS <sql_type>)`
pub fn cast(e: impl IntoColumnExpr, sql_type: impl Into<String>) -> Expr {
    Expr::Cast {
        expr: Box::new(e.into_column_expr()),
        sql_type: sql_type.into(),
    }
}

/// An empty `CASE` expression.
pub fn case() -> CaseExpr {
    CaseExpr::default()
}

/// A `BETWEEN` range.
pub fn range(start: impl IntoExpr, end: impl IntoExpr) -> RangeVal {
    RangeVal::new(start, end)
}

/// AND a list of boolean expressions together.
pub fn and(exprs: Vec<Expr>) -> Expr {
    Expr::List(GroupOp::And, exprs)
}

/// OR a list of boolean expressions together.
pub fn or(exprs: Vec<Expr>) -> Expr {
    Expr::List(GroupOp::Or, exprs)
}

/// An anonymous window definition for `OVER (...)` or a `WINDOW` clause.
pub fn window() -> WindowExpr {
    WindowExpr::default()
}

/// A named window definition for a `WINDOW` clause.
pub fn named_window(name: impl IntoIdent) -> WindowExpr {
    WindowExpr {
        name: Some(name.into_ident()),
        ..Default::default()
    }
}

/// A `JOIN ... ON <cond>` condition.
pub fn on(cond: impl IntoExpr) -> JoinCond {
    JoinCond::On(Box::new(cond.into_expr()))
}

/// A `JOIN ... USING (<cols>)` condition.
pub fn using(cols: impl IntoColumnList) -> JoinCond {
    JoinCond::Using(cols.into_column_list())
}

/// `ON CONFLICT DO NOTHING`
pub fn do_nothing() -> ConflictExpr {
    ConflictExpr::DoNothing { target: None }
}

/// `ON CONFLICT (<target>) DO UPDATE SET <set>`; chain
/// [`where_`](ConflictExpr::where_) for a conditional update.
pub fn do_update(target: impl Into<String>, set: impl Into<Record>) -> ConflictExpr {
    let target: String = target.into();
    ConflictExpr::DoUpdate {
        target: if target.is_empty() { None } else { Some(target) },
        update: set.into(),
        where_: None,
    }
}

/// Mark a sub-query as `LATERAL`.
pub fn lateral(ds: impl IntoSubquery) -> Expr {
    Expr::Lateral(Box::new(ds.into_subquery()))
}

/// `ANY (<sub-query>)`
pub fn any(ds: impl IntoSubquery) -> Expr {
    Expr::Func {
        name: "ANY ".to_string(),
        args: vec![Expr::Subquery(Box::new(ds.into_subquery()))],
    }
}

/// `ALL (<sub-query>)`
pub fn all(ds: impl IntoSubquery) -> Expr {
    Expr::Func {
        name: "ALL ".to_string(),
        args: vec![Expr::Subquery(Box::new(ds.into_subquery()))],
    }
}

// ==================== Aggregate & window function helpers ====================

/// `COUNT(<col>)`
pub fn count(c: impl IntoColumnExpr) -> Expr {
    func("COUNT", c)
}

/// `SUM(<col>)`
pub fn sum(c: impl IntoColumnExpr) -> Expr {
    func("SUM", c)
}

/// `AVG(<col>)`
pub fn avg(c: impl IntoColumnExpr) -> Expr {
    func("AVG", c)
}

/// `MIN(<col>)`
pub fn min(c: impl IntoColumnExpr) -> Expr {
    func("MIN", c)
}

/// `MAX(<col>)`
pub fn max(c: impl IntoColumnExpr) -> Expr {
    func("MAX", c)
}

/// `FIRST(<col>)`
pub fn first(c: impl IntoColumnExpr) -> Expr {
    func("FIRST", c)
}

/// `LAST(<col>)`
pub fn last(c: impl IntoColumnExpr) -> Expr {
    func("LAST", c)
}

/// `COALESCE(<args>)`
pub fn coalesce(args: impl IntoColumnList) -> Expr {
    func("COALESCE", args)
}

/// `DISTINCT(<col>)` as a projection function.
pub fn distinct(c: impl IntoColumnExpr) -> Expr {
    func("DISTINCT", c)
}

/// `ROW_NUMBER()`
pub fn row_number() -> Expr {
    func("ROW_NUMBER", ())
}

/// `RANK()`
pub fn rank() -> Expr {
    func("RANK", ())
}

/// `DENSE_RANK()`
pub fn dense_rank() -> Expr {
    func("DENSE_RANK", ())
}

/// `PERCENT_RANK()`
pub fn percent_rank() -> Expr {
    func("PERCENT_RANK", ())
}

/// `CUME_DIST()`
pub fn cume_dist() -> Expr {
    func("CUME_DIST", ())
}

/// `NTILE(<n>)`
pub fn ntile(n: i64) -> Expr {
    Expr::Func {
        name: "NTILE".to_string(),
        args: vec![Expr::Value(Value::Int(n))],
    }
}

/// `FIRST_VALUE(<col>)`
pub fn first_value(c: impl IntoColumnExpr) -> Expr {
    func("FIRST_VALUE", c)
}

/// `LAST_VALUE(<col>)`
pub fn last_value(c: impl IntoColumnExpr) -> Expr {
    func("LAST_VALUE", c)
}

/// `NTH_VALUE(<col>, <n>)`
pub fn nth_value(c: impl IntoColumnExpr, n: i64) -> Expr {
    Expr::Func {
        name: "NTH_VALUE".to_string(),
        args: vec![c.into_column_expr(), Expr::Value(Value::Int(n))],
    }
}

