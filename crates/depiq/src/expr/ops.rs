//! Comparison, presentation, and bitwise combinators.
//!
//! [`ExprOps`] is implemented for every expression-like type, so
//! `col("a").eq(10)`, `lit("a + b").gt(10)`, and `func("MAX", ...).as_("m")`
//! all read the same way.
//!
//! Comparisons lift plain values into the matching SQL form: `eq(None)`
//! becomes `IS NULL`, `eq(true)` becomes `IS TRUE`, `eq(vec![..])` becomes
//! `IN (...)`, and a [`regex`](crate::regex) pattern selects the dialect's
//! regex operator.

use super::{BinaryOp, Expr, Ident, IntoExpr, NullSort, SortDir, Subquery};
use crate::record::Record;
use crate::value::Value;

/// The right-hand side of an `IN`/`NOT IN` comparison: a list of values or a
/// sub-query.
pub trait IntoInOperand {
    fn into_in_operand(self) -> Expr;
}

impl<T: crate::value::IntoValue> IntoInOperand for Vec<T> {
    fn into_in_operand(self) -> Expr {
        Expr::ExprList(
            self.into_iter()
                .map(|v| Expr::Value(v.into_value()))
                .collect(),
        )
    }
}

impl<T: crate::value::IntoValue + Clone> IntoInOperand for &[T] {
    fn into_in_operand(self) -> Expr {
        Expr::ExprList(
            self.iter()
                .map(|v| Expr::Value(v.clone().into_value()))
                .collect(),
        )
    }
}

impl IntoInOperand for Expr {
    fn into_in_operand(self) -> Expr {
        self
    }
}

/// A range for `BETWEEN` comparisons, built with [`range`](crate::range).
#[derive(Debug, Clone, PartialEq)]
pub struct RangeVal {
    pub start: Expr,
    pub end: Expr,
}

impl RangeVal {
    pub fn new(start: impl IntoExpr, end: impl IntoExpr) -> Self {
        RangeVal {
            start: start.into_expr(),
            end: end.into_expr(),
        }
    }

    fn into_range_expr(self) -> Expr {
        Expr::Range {
            start: Box::new(self.start),
            end: Box::new(self.end),
        }
    }
}

/// One `column = value` pair produced by [`Ident::set`], accepted anywhere
/// an update record is.
#[derive(Debug, Clone, PartialEq)]
pub struct SetPair {
    pub col: String,
    pub value: Expr,
}

/// Builds a comparison, normalizing the value per the lifting rules.
pub(crate) fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let op = lift_op(op, &rhs);
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn lift_op(op: BinaryOp, rhs: &Expr) -> BinaryOp {
    match (op, rhs) {
        (BinaryOp::Eq, Expr::Value(Value::Null | Value::Bool(_))) => BinaryOp::Is,
        (BinaryOp::Eq, Expr::ExprList(_)) => BinaryOp::In,
        (BinaryOp::Eq, Expr::Value(Value::Regex(_))) => BinaryOp::RegexpLike,
        (BinaryOp::Neq, Expr::Value(Value::Null | Value::Bool(_))) => BinaryOp::IsNot,
        (BinaryOp::Neq, Expr::ExprList(_)) => BinaryOp::NotIn,
        (BinaryOp::Neq, Expr::Value(Value::Regex(_))) => BinaryOp::RegexpNotLike,
        (BinaryOp::Like, Expr::Value(Value::Regex(_))) => BinaryOp::RegexpLike,
        (BinaryOp::NotLike, Expr::Value(Value::Regex(_))) => BinaryOp::RegexpNotLike,
        (BinaryOp::ILike, Expr::Value(Value::Regex(_))) => BinaryOp::RegexpILike,
        (BinaryOp::NotILike, Expr::Value(Value::Regex(_))) => BinaryOp::RegexpNotILike,
        (op, _) => op,
    }
}

/// Comparison and presentation operators available on every expression.
pub trait ExprOps: IntoExpr + Sized {
    /// `self = rhs` (lifting nulls, booleans, lists, and regexes)
    fn eq(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::Eq, self.into_expr(), rhs.into_expr())
    }

    /// `self != rhs` (lifting nulls, booleans, lists, and regexes)
    fn neq(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::Neq, self.into_expr(), rhs.into_expr())
    }

    /// `self IS rhs`
    fn is(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::Is, self.into_expr(), rhs.into_expr())
    }

    /// `self IS NOT rhs`
    fn is_not(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::IsNot, self.into_expr(), rhs.into_expr())
    }

    /// `self IS NULL`
    fn is_null(self) -> Expr {
        self.is(Value::Null)
    }

    /// `self IS NOT NULL`
    fn is_not_null(self) -> Expr {
        self.is_not(Value::Null)
    }

    /// `self IS TRUE`
    fn is_true(self) -> Expr {
        self.is(true)
    }

    /// `self IS FALSE`
    fn is_false(self) -> Expr {
        self.is(false)
    }

    /// `self IS NOT TRUE`
    fn is_not_true(self) -> Expr {
        self.is_not(true)
    }

    /// `self IS NOT FALSE`
    fn is_not_false(self) -> Expr {
        self.is_not(false)
    }

    /// `self > rhs`
    fn gt(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::Gt, self.into_expr(), rhs.into_expr())
    }

    /// `self >= rhs`
    fn gte(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::Gte, self.into_expr(), rhs.into_expr())
    }

    /// `self < rhs`
    fn lt(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::Lt, self.into_expr(), rhs.into_expr())
    }

    /// `self <= rhs`
    fn lte(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::Lte, self.into_expr(), rhs.into_expr())
    }

    /// `self IN (values...)` or `self IN (sub-query)`
    fn in_list(self, rhs: impl IntoInOperand) -> Expr {
        binary(BinaryOp::In, self.into_expr(), rhs.into_in_operand())
    }

    /// `self NOT IN (values...)` or `self NOT IN (sub-query)`
    fn not_in(self, rhs: impl IntoInOperand) -> Expr {
        binary(BinaryOp::NotIn, self.into_expr(), rhs.into_in_operand())
    }

    /// `self BETWEEN r.start AND r.end`
    fn between(self, r: RangeVal) -> Expr {
        binary(BinaryOp::Between, self.into_expr(), r.into_range_expr())
    }

    /// `self NOT BETWEEN r.start AND r.end`
    fn not_between(self, r: RangeVal) -> Expr {
        binary(BinaryOp::NotBetween, self.into_expr(), r.into_range_expr())
    }

    /// `self LIKE pattern`; a regex pattern selects the dialect regex operator
    fn like(self, pattern: impl IntoExpr) -> Expr {
        binary(BinaryOp::Like, self.into_expr(), pattern.into_expr())
    }

    /// `self NOT LIKE pattern`
    fn not_like(self, pattern: impl IntoExpr) -> Expr {
        binary(BinaryOp::NotLike, self.into_expr(), pattern.into_expr())
    }

    /// `self ILIKE pattern` (case-insensitive)
    fn ilike(self, pattern: impl IntoExpr) -> Expr {
        binary(BinaryOp::ILike, self.into_expr(), pattern.into_expr())
    }

    /// `self NOT ILIKE pattern`
    fn not_ilike(self, pattern: impl IntoExpr) -> Expr {
        binary(BinaryOp::NotILike, self.into_expr(), pattern.into_expr())
    }

    /// `self & rhs`
    fn bitwise_and(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::BitwiseAnd, self.into_expr(), rhs.into_expr())
    }

    /// `self | rhs`
    fn bitwise_or(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::BitwiseOr, self.into_expr(), rhs.into_expr())
    }

    /// `self # rhs` (`^` on dialects that spell it that way)
    fn bitwise_xor(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::BitwiseXor, self.into_expr(), rhs.into_expr())
    }

    /// `self << rhs`
    fn bitwise_left_shift(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::BitwiseLeftShift, self.into_expr(), rhs.into_expr())
    }

    /// `self >> rhs`
    fn bitwise_right_shift(self, rhs: impl IntoExpr) -> Expr {
        binary(BinaryOp::BitwiseRightShift, self.into_expr(), rhs.into_expr())
    }

    /// `~ self`
    fn bitwise_inversion(self) -> Expr {
        binary(
            BinaryOp::BitwiseInversion,
            self.into_expr(),
            Expr::Value(Value::Null),
        )
    }

    /// `self AS alias`
    fn as_(self, alias: impl Into<String>) -> Expr {
        Expr::Aliased {
            expr: Box::new(self.into_expr()),
            alias: Ident::col(alias),
        }
    }

    /// `self ASC`
    fn asc(self) -> Expr {
        Expr::Ordered {
            expr: Box::new(self.into_expr()),
            dir: SortDir::Asc,
            nulls: NullSort::Unspecified,
        }
    }

    /// `self DESC`
    fn desc(self) -> Expr {
        Expr::Ordered {
            expr: Box::new(self.into_expr()),
            dir: SortDir::Desc,
            nulls: NullSort::Unspecified,
        }
    }

    /// `NULLS FIRST` on an ordered expression (implies `ASC` otherwise).
    fn nulls_first(self) -> Expr {
        with_nulls(self.into_expr(), NullSort::First)
    }

    /// `NULLS LAST` on an ordered expression (implies `ASC` otherwise).
    fn nulls_last(self) -> Expr {
        with_nulls(self.into_expr(), NullSort::Last)
    }

    /// `CAST(self AS sql_type)`
    fn cast(self, sql_type: impl Into<String>) -> Expr {
        Expr::Cast {
            expr: Box::new(self.into_expr()),
            sql_type: sql_type.into(),
        }
    }

    /// `self OVER <named window>` — for window function calls.
    fn over_named(self, name: impl super::IntoIdent) -> Expr {
        Expr::WindowFn {
            func: Box::new(self.into_expr()),
            name: Some(name.into_ident()),
            spec: None,
        }
    }

    /// `self OVER (<window>)` — for window function calls.
    fn over(self, window: super::WindowExpr) -> Expr {
        Expr::WindowFn {
            func: Box::new(self.into_expr()),
            name: None,
            spec: Some(Box::new(window)),
        }
    }
}

fn with_nulls(e: Expr, nulls: NullSort) -> Expr {
    match e {
        Expr::Ordered { expr, dir, .. } => Expr::Ordered { expr, dir, nulls },
        other => Expr::Ordered {
            expr: Box::new(other),
            dir: SortDir::Asc,
            nulls,
        },
    }
}

impl ExprOps for Expr {}
impl ExprOps for Ident {}

impl Ident {
    /// `self = rhs` as a SET pair, keyed by this identifier's column name.
    ///
    /// Used in `ON CONFLICT ... DO UPDATE` and `UPDATE ... SET`:
    /// `col("address").set(ident("excluded.address"))`.
    pub fn set(&self, rhs: impl IntoExpr) -> SetPair {
        SetPair {
            col: self.set_key().unwrap_or_default(),
            value: rhs.into_expr(),
        }
    }
}

impl From<SetPair> for Record {
    fn from(p: SetPair) -> Record {
        Record::new().set(p.col, p.value)
    }
}

impl From<Vec<SetPair>> for Record {
    fn from(pairs: Vec<SetPair>) -> Record {
        let mut r = Record::new();
        for p in pairs {
            r = r.set(p.col, p.value);
        }
        r
    }
}

impl IntoExpr for Subquery {
    fn into_expr(self) -> Expr {
        Expr::Subquery(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::regex;
    use crate::{col, range};

    #[test]
    fn eq_lifts_null_to_is() {
        let e = col("a").eq(Option::<i32>::None);
        match e {
            Expr::Binary { op, .. } => assert_eq!(op, BinaryOp::Is),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn eq_lifts_bool_to_is() {
        match col("a").eq(true) {
            Expr::Binary { op, .. } => assert_eq!(op, BinaryOp::Is),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn eq_lifts_vec_to_in() {
        match col("a").eq(vec![1, 2]) {
            Expr::Binary { op, .. } => assert_eq!(op, BinaryOp::In),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn like_with_regex_selects_regex_op() {
        match col("a").like(regex("[ab]")) {
            Expr::Binary { op, .. } => assert_eq!(op, BinaryOp::RegexpLike),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn neq_lifts() {
        match col("a").neq(Option::<i32>::None) {
            Expr::Binary { op, .. } => assert_eq!(op, BinaryOp::IsNot),
            other => panic!("unexpected {other:?}"),
        }
        match col("a").neq(vec!["x"]) {
            Expr::Binary { op, .. } => assert_eq!(op, BinaryOp::NotIn),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn between_builds_range() {
        match col("a").between(range(1, 10)) {
            Expr::Binary { op, rhs, .. } => {
                assert_eq!(op, BinaryOp::Between);
                assert!(matches!(*rhs, Expr::Range { .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn nulls_first_keeps_direction() {
        match col("a").desc().nulls_first() {
            Expr::Ordered { dir, nulls, .. } => {
                assert_eq!(dir, SortDir::Desc);
                assert_eq!(nulls, NullSort::First);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
