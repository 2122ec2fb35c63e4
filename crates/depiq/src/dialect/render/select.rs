//! SELECT rendering.

use crate::clauses::{LimitVal, SelectClauses};
use crate::dialect::render::expression::ExprRenderer;
use crate::dialect::SqlDialect;
use crate::error::Error;
use crate::sql_builder::SqlBuilder;
use crate::value::Value;

pub(crate) fn select_sql(d: &SqlDialect, b: &mut SqlBuilder, c: &SelectClauses) {
    let r = ExprRenderer::new(d);

    r.common_tables(b, c.common_tables());

    b.write_str("SELECT ");
    if let Some(distinct) = c.distinct() {
        b.write_str("DISTINCT ");
        if !distinct.is_empty() {
            b.write_str("ON (");
            r.column_list(b, distinct);
            b.write_str(") ");
        }
    }
    if c.select().is_empty() {
        b.write_char('*');
    } else {
        r.column_list(b, c.select());
    }

    if !c.from().is_empty() {
        b.write_str(" FROM ");
        r.column_list(b, c.from());
    }

    for join in c.joins() {
        r.join(b, join);
    }

    if !c.where_().is_empty() {
        b.write_str(" WHERE ");
        r.clause_conditions(b, c.where_());
    }

    if !c.group_by().is_empty() {
        b.write_str(" GROUP BY ");
        r.column_list(b, c.group_by());
    }

    if !c.having().is_empty() {
        b.write_str(" HAVING ");
        r.clause_conditions(b, c.having());
    }

    if !c.windows().is_empty() {
        if !d.options().supports_window_function {
            b.set_error(Error::WindowFunctionNotSupported);
            return;
        }
        b.write_str(" WINDOW ");
        for (i, w) in c.windows().iter().enumerate() {
            if i > 0 {
                b.write_str(", ");
            }
            match &w.name {
                Some(name) => r.ident(b, name),
                None => {
                    b.set_error(Error::validation(
                        "window expressions in a WINDOW clause must have a name",
                    ));
                    return;
                }
            }
            b.write_str(" AS ");
            r.window_spec(b, w);
        }
    }

    for compound in c.compounds() {
        b.write_char(' ');
        b.write_str(compound.op.keyword());
        b.write_char(' ');
        if d.options().wrap_compounds_in_parens {
            b.write_char('(');
            r.subquery(b, &compound.rhs);
            b.write_char(')');
        } else {
            r.subquery(b, &compound.rhs);
        }
    }

    if !c.order().is_empty() {
        b.write_str(" ORDER BY ");
        r.column_list(b, c.order());
    }

    limit_sql(&r, b, c.limit());

    if c.offset() > 0 {
        b.write_str(" OFFSET ");
        r.value(b, &Value::Int(c.offset() as i64));
    }

    if let Some(lock) = c.lock() {
        if d.options().supports_lock {
            b.write_str(" FOR ");
            b.write_str(lock.strength.keyword());
            b.write_char(' ');
            if !lock.of.is_empty() {
                b.write_str("OF ");
                r.column_list(b, &lock.of);
                b.write_char(' ');
            }
            b.write_str(lock.wait.keyword());
        }
    }
}

/// Shared by select/update/delete renderers.
pub(crate) fn limit_sql(r: &ExprRenderer<'_>, b: &mut SqlBuilder, limit: Option<&LimitVal>) {
    match limit {
        None => {}
        Some(LimitVal::All) => b.write_str(" LIMIT ALL"),
        Some(LimitVal::Number(n)) => {
            b.write_str(" LIMIT ");
            r.value(b, &Value::Int(*n as i64));
        }
    }
}
