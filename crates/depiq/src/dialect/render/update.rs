//! UPDATE rendering.

use crate::clauses::UpdateClauses;
use crate::dialect::render::expression::ExprRenderer;
use crate::dialect::render::insert::update_record_sql;
use crate::dialect::render::select::limit_sql;
use crate::dialect::SqlDialect;
use crate::error::Error;
use crate::sql_builder::SqlBuilder;

pub(crate) fn update_sql(d: &SqlDialect, b: &mut SqlBuilder, c: &UpdateClauses) {
    let r = ExprRenderer::new(d);
    let opts = d.options();

    r.common_tables(b, c.common_tables());

    b.write_str("UPDATE ");
    match c.table() {
        Some(table) => r.expression(b, table),
        None => {
            b.set_error(Error::validation("no source table defined for update"));
            return;
        }
    }
    if let Some(alias) = c.alias() {
        b.write_str(" AS ");
        r.ident(b, alias);
    }

    if !c.from().is_empty() && !opts.supports_multiple_update_tables {
        b.set_error(Error::MultipleUpdateTablesNotSupported(d.name().to_string()));
        return;
    }

    // mysql lists every table inline; postgres appends a FROM clause below.
    if !c.from().is_empty() && !opts.use_from_clause_for_multiple_update_tables {
        b.write_char(',');
        r.column_list(b, c.from());
    }

    b.write_str(" SET ");
    match c.set_values() {
        Some(rec) => update_record_sql(&r, b, rec),
        None => {
            b.set_error(Error::validation("no update values provided"));
            return;
        }
    }

    if !c.from().is_empty() && opts.use_from_clause_for_multiple_update_tables {
        b.write_str(" FROM ");
        r.column_list(b, c.from());
    }

    if !c.where_().is_empty() {
        b.write_str(" WHERE ");
        r.clause_conditions(b, c.where_());
    }

    if !c.order().is_empty() {
        if !opts.supports_order_by_on_update {
            b.set_error(Error::ClauseNotSupported {
                clause: "ORDER BY",
                statement: "UPDATE",
                dialect: d.name().to_string(),
            });
            return;
        }
        b.write_str(" ORDER BY ");
        r.column_list(b, c.order());
    }

    if c.limit().is_some() {
        if !opts.supports_limit_on_update {
            b.set_error(Error::ClauseNotSupported {
                clause: "LIMIT",
                statement: "UPDATE",
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
