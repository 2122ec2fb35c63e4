//! Fluent dataset builders, one per statement kind.
//!
//! A dataset owns a dialect handle, its clause container, a tri-state
//! prepared flag, a sticky first-error latch, and (when created through a
//! [`Database`](crate::Database)) a bound driver handle. Every builder
//! method returns a new dataset; the receiver is never mutated.

mod delete;
mod insert;
mod select;
mod truncate;
mod update;


pub use delete::DeleteDataset;
pub use insert::InsertDataset;
pub use select::SelectDataset;
pub use truncate::TruncateDataset;
pub use update::UpdateDataset;

use std::sync::Arc;

use crate::dialect::SqlDialect;
use crate::error::Error;
use crate::expr::{Expr, Ident, Subquery};

/// Conversion of a dataset (or prebuilt sub-query) into a [`Subquery`],
/// used by `with(...)`, `from_query(...)`, and compound operators.
pub trait IntoSubquery {
    fn into_subquery(self) -> Subquery;
}

impl IntoSubquery for Subquery {
    fn into_subquery(self) -> Subquery {
        self
    }
}

/// Applies the dialect-inheritance rule to a sub-query being composed into a
/// dataset with dialect `parent`: a default-dialect sub-query adopts the
/// parent dialect; differing non-default dialects are incompatible.
pub(crate) fn adopt_subquery(parent: &Arc<SqlDialect>, sq: &mut Subquery) -> Option<Error> {
    if let Some(err) = &sq.error {
        return Some(err.clone());
    }
    if sq.dialect == "default" {
        if !parent.is_default() {
            sq.dialect = parent.name().to_string();
        }
        None
    } else if !parent.is_default() && sq.dialect != parent.name() {
        Some(Error::IncompatibleDialects {
            expected: parent.name().to_string(),
            got: sq.dialect.clone(),
        })
    } else {
        None
    }
}

/// Walks the sub-queries reachable at the top of an expression and applies
/// [`adopt_subquery`].
pub(crate) fn adopt_expr(parent: &Arc<SqlDialect>, e: &mut Expr) -> Option<Error> {
    match e {
        Expr::Subquery(sq) | Expr::Lateral(sq) => adopt_subquery(parent, sq),
        Expr::Aliased { expr, .. } => adopt_expr(parent, expr),
        _ => None,
    }
}

/// FROM-list post-processing: adopt dialects and give unaliased sub-queries
/// a positional `t{n}` alias.
pub(crate) fn from_list(
    parent: &Arc<SqlDialect>,
    items: Vec<Expr>,
) -> (Vec<Expr>, Option<Error>) {
    let mut first_err: Option<Error> = None;
    let out = items
        .into_iter()
        .enumerate()
        .map(|(i, mut e)| {
            if let Some(err) = adopt_expr(parent, &mut e) {
                first_err.get_or_insert(err);
            }
            match e {
                Expr::Subquery(sq) => {
                    let alias = sq
                        .alias()
                        .unwrap_or_else(|| Ident::col(format!("t{}", i + 1)));
                    Expr::Aliased {
                        expr: Box::new(Expr::Subquery(sq)),
                        alias,
                    }
                }
                other => other,
            }
        })
        .collect();
    (out, first_err)
}
