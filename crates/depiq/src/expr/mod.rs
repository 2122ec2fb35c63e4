//! Expression tree for SQL generation.
//!
//! Every fragment of a statement — identifiers, literals, comparisons,
//! sub-queries, joins, windows, conflict clauses — is an [`Expr`] node.
//! Nodes are immutable values; builder methods return new trees that share
//! unchanged sub-trees by value.

mod ex;
mod ident;
mod ops;

pub use ex::{Ex, ExOr, ExVal, Op};
pub use ident::{ColumnPart, Ident, IntoIdent};
pub use ops::{ExprOps, IntoInOperand, RangeVal, SetPair};

use crate::clauses::{DeleteClauses, InsertClauses, SelectClauses, UpdateClauses};
use crate::error::Error;
use crate::record::Record;
use crate::value::{IntoValue, Value};

/// Grouping operator for a boolean expression list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOp {
    And,
    Or,
}

/// Binary operator of a comparison or bitwise expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Neq,
    Is,
    IsNot,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Like,
    NotLike,
    ILike,
    NotILike,
    RegexpLike,
    RegexpNotLike,
    RegexpILike,
    RegexpNotILike,
    Between,
    NotBetween,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseLeftShift,
    BitwiseRightShift,
    BitwiseInversion,
}

/// Sort direction of an ordered expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// NULL placement of an ordered expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullSort {
    Unspecified,
    First,
    Last,
}

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    LeftOuter,
    RightOuter,
    FullOuter,
    Natural,
    NaturalLeft,
    NaturalRight,
    NaturalFull,
    Cross,
}

impl JoinKind {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
            JoinKind::Natural => "NATURAL JOIN",
            JoinKind::NaturalLeft => "NATURAL LEFT JOIN",
            JoinKind::NaturalRight => "NATURAL RIGHT JOIN",
            JoinKind::NaturalFull => "NATURAL FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }

    /// Natural and cross joins take no condition.
    pub(crate) fn is_conditioned(self) -> bool {
        !matches!(
            self,
            JoinKind::Natural
                | JoinKind::NaturalLeft
                | JoinKind::NaturalRight
                | JoinKind::NaturalFull
                | JoinKind::Cross
        )
    }
}

/// Join condition.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinCond {
    /// No condition (natural and cross joins).
    None,
    /// `ON (<expr>)`
    On(Box<Expr>),
    /// `USING (<cols>)`
    Using(Vec<Expr>),
}

/// A join entry of a select statement.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinExpr {
    pub kind: JoinKind,
    pub target: Box<Expr>,
    pub cond: JoinCond,
}

/// Compound statement operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundOp {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
}

impl CompoundOp {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            CompoundOp::Union => "UNION",
            CompoundOp::UnionAll => "UNION ALL",
            CompoundOp::Intersect => "INTERSECT",
            CompoundOp::IntersectAll => "INTERSECT ALL",
        }
    }
}

/// `UNION`/`INTERSECT` attachment on a select statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundExpr {
    pub op: CompoundOp,
    pub rhs: Subquery,
}

/// Lock strength of a `FOR ...` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStrength {
    Update,
    NoKeyUpdate,
    Share,
    KeyShare,
}

impl LockStrength {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            LockStrength::Update => "UPDATE",
            LockStrength::NoKeyUpdate => "NO KEY UPDATE",
            LockStrength::Share => "SHARE",
            LockStrength::KeyShare => "KEY SHARE",
        }
    }
}

/// Wait behavior of a lock clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOption {
    /// Block until the lock is available (renders nothing).
    Wait,
    /// `NOWAIT`
    NoWait,
    /// `SKIP LOCKED`
    SkipLocked,
}

impl WaitOption {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            WaitOption::Wait => "",
            WaitOption::NoWait => "NOWAIT",
            WaitOption::SkipLocked => "SKIP LOCKED",
        }
    }
}

/// A row-locking clause (`FOR UPDATE [OF ...] [NOWAIT | SKIP LOCKED]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Lock {
    pub strength: LockStrength,
    pub wait: WaitOption,
    pub of: Vec<Expr>,
}

impl Lock {
    pub fn new(strength: LockStrength, wait: WaitOption, of: Vec<Expr>) -> Self {
        Lock { strength, wait, of }
    }
}

/// A window definition (`W("name").partition_by(...).order_by(...)`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowExpr {
    pub name: Option<Ident>,
    pub parent: Option<Ident>,
    pub partition: Vec<Expr>,
    pub order: Vec<Expr>,
}

impl WindowExpr {
    /// Replace the partition columns.
    pub fn partition_by(mut self, cols: impl IntoColumnList) -> Self {
        self.partition = cols.into_column_list();
        self
    }

    /// Replace the order columns.
    pub fn order_by(mut self, cols: impl IntoColumnList) -> Self {
        self.order = cols.into_column_list();
        self
    }

    /// Inherit from a named window.
    pub fn inherits(mut self, parent: impl IntoIdent) -> Self {
        self.parent = Some(parent.into_ident());
        self
    }
}

/// A `CASE` expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaseExpr {
    pub value: Option<Box<Expr>>,
    pub whens: Vec<(Expr, Expr)>,
    pub else_: Option<Box<Expr>>,
}

impl CaseExpr {
    /// Compare against a value (`CASE <value> WHEN ...`).
    pub fn value(mut self, v: impl IntoExpr) -> Self {
        self.value = Some(Box::new(v.into_expr()));
        self
    }

    /// Add a `WHEN <cond> THEN <result>` arm.
    pub fn when(mut self, cond: impl IntoExpr, result: impl IntoExpr) -> Self {
        self.whens.push((cond.into_expr(), result.into_expr()));
        self
    }

    /// Set the `ELSE` result.
    pub fn else_(mut self, result: impl IntoExpr) -> Self {
        self.else_ = Some(Box::new(result.into_expr()));
        self
    }
}

impl IntoExpr for CaseExpr {
    fn into_expr(self) -> Expr {
        Expr::Case(Box::new(self))
    }
}

impl IntoExpr for WindowExpr {
    fn into_expr(self) -> Expr {
        Expr::Window(Box::new(self))
    }
}

/// Conflict clause of an insert statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictExpr {
    /// `ON CONFLICT [...] DO NOTHING`
    DoNothing { target: Option<String> },
    /// `ON CONFLICT (<target>) DO UPDATE SET ... [WHERE ...]`
    DoUpdate {
        target: Option<String>,
        update: Record,
        where_: Option<Box<Expr>>,
    },
}

impl ConflictExpr {
    /// Attach a `WHERE` clause to a `DO UPDATE` conflict action.
    ///
    /// No effect on `DO NOTHING`.
    pub fn where_(self, cond: impl IntoExpr) -> Self {
        match self {
            ConflictExpr::DoUpdate {
                target,
                update,
                where_: _,
            } => ConflictExpr::DoUpdate {
                target,
                update,
                where_: Some(Box::new(cond.into_expr())),
            },
            other => other,
        }
    }
}

/// A common table expression (`WITH [RECURSIVE] <name> AS (<query>)`).
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpr {
    pub recursive: bool,
    /// Written verbatim, so column lists such as `nums(x)` pass through.
    pub name: String,
    pub query: Subquery,
}

/// The statement kind embedded in a sub-query expression.
#[derive(Debug, Clone, PartialEq)]
pub enum SubqueryKind {
    Select(Box<SelectClauses>),
    Insert(Box<InsertClauses>),
    Update(Box<UpdateClauses>),
    Delete(Box<DeleteClauses>),
}

/// An embedded statement, usable wherever a value, table, or expression is
/// expected.
///
/// The sub-query remembers the dialect it was built against so that dialect
/// inheritance (and incompatibility detection) can run when it is composed
/// into another dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    pub kind: SubqueryKind,
    pub dialect: String,
    pub error: Option<Error>,
}

impl Subquery {
    /// The alias carried by the embedded statement, if any.
    pub(crate) fn alias(&self) -> Option<Ident> {
        match &self.kind {
            SubqueryKind::Select(c) => c.alias().cloned(),
            _ => None,
        }
    }
}

/// An expression tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A (possibly qualified) identifier.
    Ident(Ident),
    /// A literal value rendered inline or as a parameter placeholder.
    Value(Value),
    /// The `DEFAULT` keyword.
    Default,
    /// A raw SQL fragment with `?` holes filled from `args`.
    Literal { template: String, args: Vec<Expr> },
    /// AND/OR over boolean expressions.
    List(GroupOp, Vec<Expr>),
    /// A plain list of values or expressions (the right side of `IN`).
    ExprList(Vec<Expr>),
    /// A binary comparison or bitwise operation.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A range used by `BETWEEN`.
    Range { start: Box<Expr>, end: Box<Expr> },
    /// `CAST(<expr> AS <type>)`
    Cast { expr: Box<Expr>, sql_type: String },
    /// A function call.
    Func { name: String, args: Vec<Expr> },
    /// `<expr> AS <alias>`
    Aliased { expr: Box<Expr>, alias: Ident },
    /// `<expr> ASC|DESC [NULLS FIRST|LAST]`
    Ordered {
        expr: Box<Expr>,
        dir: SortDir,
        nulls: NullSort,
    },
    /// A `CASE` expression.
    Case(Box<CaseExpr>),
    /// A window definition (in a `WINDOW` clause or inline `OVER`).
    Window(Box<WindowExpr>),
    /// `<func> OVER <name>` or `<func> OVER (<spec>)`
    WindowFn {
        func: Box<Expr>,
        name: Option<Ident>,
        spec: Option<Box<WindowExpr>>,
    },
    /// An embedded sub-statement.
    Subquery(Box<Subquery>),
    /// A lateral sub-query.
    Lateral(Box<Subquery>),
}

/// Conversion of a Rust value or expression fragment into an [`Expr`].
///
/// Plain values become literal parameters; `Vec`s of values become value
/// lists, which comparison constructors lift to `IN (...)`.
pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl<T: IntoValue> IntoExpr for T {
    fn into_expr(self) -> Expr {
        Expr::Value(self.into_value())
    }
}

impl<T: IntoValue> IntoExpr for Vec<T> {
    fn into_expr(self) -> Expr {
        Expr::ExprList(self.into_iter().map(|v| Expr::Value(v.into_value())).collect())
    }
}

/// Conversion used by column-position arguments (`select`, `from`,
/// `group_by`, `returning`, join targets): strings parse as dotted
/// identifiers instead of becoming string values.
pub trait IntoColumnExpr {
    fn into_column_expr(self) -> Expr;
}

impl IntoColumnExpr for Expr {
    fn into_column_expr(self) -> Expr {
        self
    }
}

impl IntoColumnExpr for Ident {
    fn into_column_expr(self) -> Expr {
        Expr::Ident(self)
    }
}

impl IntoColumnExpr for &str {
    fn into_column_expr(self) -> Expr {
        Expr::Ident(Ident::parse(self))
    }
}

impl IntoColumnExpr for String {
    fn into_column_expr(self) -> Expr {
        Expr::Ident(Ident::parse(&self))
    }
}

impl IntoColumnExpr for CaseExpr {
    fn into_column_expr(self) -> Expr {
        self.into_expr()
    }
}

/// Conversion of one-or-many column arguments into an expression list.
pub trait IntoColumnList {
    fn into_column_list(self) -> Vec<Expr>;
}

impl<T: IntoColumnExpr> IntoColumnList for T {
    fn into_column_list(self) -> Vec<Expr> {
        vec![self.into_column_expr()]
    }
}

impl IntoColumnList for () {
    fn into_column_list(self) -> Vec<Expr> {
        Vec::new()
    }
}

impl<T: IntoColumnExpr> IntoColumnList for Vec<T> {
    fn into_column_list(self) -> Vec<Expr> {
        self.into_iter().map(IntoColumnExpr::into_column_expr).collect()
    }
}

impl<T: IntoColumnExpr, const N: usize> IntoColumnList for [T; N] {
    fn into_column_list(self) -> Vec<Expr> {
        self.into_iter().map(IntoColumnExpr::into_column_expr).collect()
    }
}

macro_rules! impl_into_column_list_tuple {
    ($($name:ident),+) => {
        impl<$($name: IntoColumnExpr),+> IntoColumnList for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_column_list(self) -> Vec<Expr> {
                let ($($name,)+) = self;
                vec![$($name.into_column_expr()),+]
            }
        }
    };
}

impl_into_column_list_tuple!(A, B);
impl_into_column_list_tuple!(A, B, C);
impl_into_column_list_tuple!(A, B, C, D);
impl_into_column_list_tuple!(A, B, C, D, E);
impl_into_column_list_tuple!(A, B, C, D, E, F);
impl_into_column_list_tuple!(A, B, C, D, E, F, G);
impl_into_column_list_tuple!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{col, lit, star};

    #[test]
    fn column_list_inputs() {
        assert_eq!(
            ("a", "b").into_column_list(),
            vec![
                Expr::Ident(Ident::col("a")),
                Expr::Ident(Ident::col("b"))
            ]
        );
        assert_eq!("a".into_column_list().len(), 1);
        assert_eq!(().into_column_list().len(), 0);
        assert_eq!(vec!["a", "b", "c"].into_column_list().len(), 3);
        assert_eq!(["a", "b"].into_column_list().len(), 2);
    }

    #[test]
    fn mixed_column_list() {
        let cols = ("a", col("b"), lit("NOW()"), star()).into_column_list();
        assert_eq!(cols.len(), 4);
    }

    #[test]
    fn values_lift_into_expr_list() {
        let e = vec![1, 2, 3].into_expr();
        match e {
            Expr::ExprList(items) => assert_eq!(items.len(), 3),
            other => panic!("expected ExprList, got {other:?}"),
        }
    }
}
