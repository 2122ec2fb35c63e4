//! DELETE rendering.

use crate::clauses::DeleteClauses;
use crate::dialect::render::expression::ExprRenderer;
use crate::dialect::render::select::limit_sql;
use crate::dialect::SqlDialect;
use crate::error::Error;
use crate::sql_builder::SqlBuilder;

pub(crate) fn delete_sql(d: &SqlDialect, b: &mut SqlBuilder, c: &DeleteClauses) {
    let r = ExprRenderer::new(d);
    let opts = d.options();

    r.common_tables(b, c.common_tables());

    b.write_str("DELETE FROM ");
    match c.from() {
        Some(from) => r.expression(b, from),
        None => {
            b.set_error(Error::validation("no source table defined for delete"));
            return;
        }
    }

    if !c.where_().is_empty() {
        b.write_str(" WHERE ");
        r.clause_conditions(b, c.where_());
    }

    if !c.order().is_empty() {
        if !opts.supports_order_by_on_delete {
            b.set_error(Error::ClauseNotSupported {
                clause: "ORDER BY",
                statement: "DELETE",
                dialect: d.name().to_string(),
            });
            return;
        }
        b.write_str(" ORDER BY ");
        r.column_list(b, c.order());
    }

    if c.limit().is_some() {
        if !opts.supports_limit_on_delete {
            b.set_error(Error::ClauseNotSupported {
                clause: "LIMIT",
                statement: "DELETE",
                dialect: d.name().to_string(),
            });
            return;
        }
        limit_sql(&r, b, c.limit());
    }

    if let Some(returning) = c.returning() {
        if !opts.supports_returning {
            b.set_error(Error::ReturningNotSupported(d.name().to_string()));
            return;
        }
        b.write_str(" RETURNING ");
        r.column_list(b, returning);
    }
}
