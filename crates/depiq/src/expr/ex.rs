//! Column-to-value shorthand maps.
//!
//! [`Ex`] ANDs its entries together, [`ExOr`] ORs them. Keys parse like
//! [`crate::ident`]; values are plain values, lists, null, or one-or-more
//! [`Op`] operators (multiple operators on the same column OR together).
//! Entries are kept in a `BTreeMap` so generated SQL is deterministic.

use std::collections::BTreeMap;

use super::ops::{binary, RangeVal};
use super::{BinaryOp, Expr, GroupOp, Ident, IntoExpr};
use crate::value::{IntoValue, Value};

/// An operator entry of an [`Ex`] map: `Op::gt(10)` reads as `column > 10`.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Eq(Expr),
    Neq(Expr),
    Is(Expr),
    IsNot(Expr),
    Gt(Expr),
    Gte(Expr),
    Lt(Expr),
    Lte(Expr),
    In(Expr),
    NotIn(Expr),
    Like(Expr),
    NotLike(Expr),
    ILike(Expr),
    NotILike(Expr),
    Between(RangeVal),
    NotBetween(RangeVal),
}

impl Op {
    pub fn eq(v: impl IntoExpr) -> Self {
        Op::Eq(v.into_expr())
    }

    pub fn neq(v: impl IntoExpr) -> Self {
        Op::Neq(v.into_expr())
    }

    pub fn is(v: impl IntoExpr) -> Self {
        Op::Is(v.into_expr())
    }

    pub fn is_not(v: impl IntoExpr) -> Self {
        Op::IsNot(v.into_expr())
    }

    pub fn gt(v: impl IntoExpr) -> Self {
        Op::Gt(v.into_expr())
    }

    pub fn gte(v: impl IntoExpr) -> Self {
        Op::Gte(v.into_expr())
    }

    pub fn lt(v: impl IntoExpr) -> Self {
        Op::Lt(v.into_expr())
    }

    pub fn lte(v: impl IntoExpr) -> Self {
        Op::Lte(v.into_expr())
    }

    pub fn in_list(v: impl super::ops::IntoInOperand) -> Self {
        Op::In(v.into_in_operand())
    }

    pub fn not_in(v: impl super::ops::IntoInOperand) -> Self {
        Op::NotIn(v.into_in_operand())
    }

    pub fn like(v: impl IntoExpr) -> Self {
        Op::Like(v.into_expr())
    }

    pub fn not_like(v: impl IntoExpr) -> Self {
        Op::NotLike(v.into_expr())
    }

    pub fn ilike(v: impl IntoExpr) -> Self {
        Op::ILike(v.into_expr())
    }

    pub fn not_ilike(v: impl IntoExpr) -> Self {
        Op::NotILike(v.into_expr())
    }

    pub fn between(r: RangeVal) -> Self {
        Op::Between(r)
    }

    pub fn not_between(r: RangeVal) -> Self {
        Op::NotBetween(r)
    }

    fn to_expr(&self, col: &Ident) -> Expr {
        let lhs = Expr::Ident(col.clone());
        match self.clone() {
            Op::Eq(v) => binary(BinaryOp::Eq, lhs, v),
            Op::Neq(v) => binary(BinaryOp::Neq, lhs, v),
            Op::Is(v) => binary(BinaryOp::Is, lhs, v),
            Op::IsNot(v) => binary(BinaryOp::IsNot, lhs, v),
            Op::Gt(v) => binary(BinaryOp::Gt, lhs, v),
            Op::Gte(v) => binary(BinaryOp::Gte, lhs, v),
            Op::Lt(v) => binary(BinaryOp::Lt, lhs, v),
            Op::Lte(v) => binary(BinaryOp::Lte, lhs, v),
            Op::In(v) => binary(BinaryOp::In, lhs, v),
            Op::NotIn(v) => binary(BinaryOp::NotIn, lhs, v),
            Op::Like(v) => binary(BinaryOp::Like, lhs, v),
            Op::NotLike(v) => binary(BinaryOp::NotLike, lhs, v),
            Op::ILike(v) => binary(BinaryOp::ILike, lhs, v),
            Op::NotILike(v) => binary(BinaryOp::NotILike, lhs, v),
            Op::Between(r) => binary(
                BinaryOp::Between,
                lhs,
                Expr::Range {
                    start: Box::new(r.start),
                    end: Box::new(r.end),
                },
            ),
            Op::NotBetween(r) => binary(
                BinaryOp::NotBetween,
                lhs,
                Expr::Range {
                    start: Box::new(r.start),
                    end: Box::new(r.end),
                },
            ),
        }
    }
}

/// A map entry value: either a plain comparison value or operator(s).
#[derive(Debug, Clone, PartialEq)]
pub enum ExVal {
    /// Compared with `=` (lifting nulls, booleans, lists, regexes).
    Value(Expr),
    /// One or more operators; multiple operators OR together.
    Ops(Vec<Op>),
}

impl From<Op> for ExVal {
    fn from(op: Op) -> Self {
        ExVal::Ops(vec![op])
    }
}

impl From<Vec<Op>> for ExVal {
    fn from(ops: Vec<Op>) -> Self {
        ExVal::Ops(ops)
    }
}

impl From<Expr> for ExVal {
    fn from(e: Expr) -> Self {
        ExVal::Value(e)
    }
}

impl From<Value> for ExVal {
    fn from(v: Value) -> Self {
        ExVal::Value(Expr::Value(v))
    }
}

impl<T: IntoValue> From<Vec<T>> for ExVal {
    fn from(vs: Vec<T>) -> Self {
        ExVal::Value(Expr::ExprList(
            vs.into_iter().map(|v| Expr::Value(v.into_value())).collect(),
        ))
    }
}

macro_rules! impl_exval_from_value {
    ($($t:ty),*) => {
        $(impl From<$t> for ExVal {
            fn from(v: $t) -> Self {
                ExVal::Value(Expr::Value(v.into_value()))
            }
        })*
    };
}

impl_exval_from_value!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, &str, String
);

impl<T: IntoValue> From<Option<T>> for ExVal {
    fn from(v: Option<T>) -> Self {
        ExVal::Value(Expr::Value(v.into_value()))
    }
}

fn entries_to_expr(entries: &BTreeMap<String, ExVal>, group: GroupOp) -> Expr {
    let mut exprs = Vec::with_capacity(entries.len());
    for (key, val) in entries {
        let col = Ident::parse(key);
        match val {
            ExVal::Value(v) => exprs.push(binary(BinaryOp::Eq, Expr::Ident(col), v.clone())),
            ExVal::Ops(ops) => match ops.as_slice() {
                [single] => exprs.push(single.to_expr(&col)),
                many => exprs.push(Expr::List(
                    GroupOp::Or,
                    many.iter().map(|op| op.to_expr(&col)).collect(),
                )),
            },
        }
    }
    if exprs.len() == 1 {
        exprs.into_iter().next().expect("len checked")
    } else {
        Expr::List(group, exprs)
    }
}

/// A column-to-value map whose entries AND together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ex(BTreeMap<String, ExVal>);

impl Ex {
    pub fn new() -> Self {
        Ex(BTreeMap::new())
    }

    /// Add an entry. Keys parse like [`crate::ident`].
    pub fn set(mut self, col: impl Into<String>, val: impl Into<ExVal>) -> Self {
        self.0.insert(col.into(), val.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoExpr for Ex {
    fn into_expr(self) -> Expr {
        entries_to_expr(&self.0, GroupOp::And)
    }
}

/// A column-to-value map whose entries OR together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExOr(BTreeMap<String, ExVal>);

impl ExOr {
    pub fn new() -> Self {
        ExOr(BTreeMap::new())
    }

    /// Add an entry. Keys parse like [`crate::ident`].
    pub fn set(mut self, col: impl Into<String>, val: impl Into<ExVal>) -> Self {
        self.0.insert(col.into(), val.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoExpr for ExOr {
    fn into_expr(self) -> Expr {
        entries_to_expr(&self.0, GroupOp::Or)
    }
}
