//! INSERT rendering.

use crate::clauses::InsertClauses;
use crate::dialect::render::expression::ExprRenderer;
use crate::dialect::SqlDialect;
use crate::error::Error;
use crate::expr::{ConflictExpr, Expr, Ident};
use crate::record::{normalize_rows, Record};
use crate::sql_builder::SqlBuilder;

pub(crate) fn insert_sql(d: &SqlDialect, b: &mut SqlBuilder, c: &InsertClauses) {
    let r = ExprRenderer::new(d);

    r.common_tables(b, c.common_tables());

    // Ignore-style dialects express DO NOTHING in the INSERT keyword itself.
    let ignore_style = matches!(c.conflict(), Some(ConflictExpr::DoNothing { .. }))
        && d.options().insert_ignore_fragment.is_some();
    if ignore_style {
        b.write_str(
            d.options()
                .insert_ignore_fragment
                .as_deref()
                .unwrap_or("INSERT INTO"),
        );
    } else {
        b.write_str("INSERT INTO");
    }

    match c.into_table() {
        Some(into) => {
            b.write_char(' ');
            r.expression(b, into);
        }
        None => {
            b.set_error(Error::validation("no INTO table defined for insert"));
            return;
        }
    }
    if let Some(alias) = c.alias() {
        b.write_str(" AS ");
        r.ident(b, alias);
    }

    if !c.rows().is_empty() && !c.vals().is_empty() {
        b.set_error(Error::validation(
            "vals and rows cannot both be set on an insert dataset",
        ));
        return;
    }

    if let Some(from) = c.from() {
        if let Some(cols) = c.cols() {
            b.write_str(" (");
            r.column_list(b, cols);
            b.write_char(')');
        }
        b.write_char(' ');
        r.subquery(b, from);
    } else if !c.rows().is_empty() {
        let (cols, vals) = normalize_rows(c.rows());
        if cols.is_empty() {
            b.write_str(" DEFAULT VALUES");
        } else {
            let col_exprs: Vec<Expr> = cols
                .iter()
                .map(|name| Expr::Ident(Ident::parse(name)))
                .collect();
            b.write_str(" (");
            r.column_list(b, &col_exprs);
            b.write_str(") VALUES ");
            values_sql(&r, b, &vals);
        }
    } else if !c.vals().is_empty() {
        let cols = c.cols().unwrap_or_default();
        for row in c.vals() {
            if row.len() != cols.len() {
                b.set_error(Error::validation(format!(
                    "rows with different value length expected {} got {}",
                    cols.len(),
                    row.len()
                )));
                return;
            }
        }
        b.write_str(" (");
        r.column_list(b, cols);
        b.write_str(") VALUES ");
        values_sql(&r, b, c.vals());
    } else {
        b.write_str(" DEFAULT VALUES");
    }

    if !ignore_style {
        if let Some(conflict) = c.conflict() {
            conflict_sql(d, &r, b, conflict);
        }
    }

    if let Some(returning) = c.returning() {
        if !d.options().supports_returning {
            b.set_error(Error::ReturningNotSupported(d.name().to_string()));
            return;
        }
        b.write_str(" RETURNING ");
        r.column_list(b, returning);
    }
}

fn values_sql(r: &ExprRenderer<'_>, b: &mut SqlBuilder, rows: &[Vec<Expr>]) {
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            b.write_str(", ");
        }
        b.write_char('(');
        for (j, v) in row.iter().enumerate() {
            if j > 0 {
                b.write_str(", ");
            }
            r.expression(b, v);
        }
        b.write_char(')');
    }
}

fn conflict_sql(d: &SqlDialect, r: &ExprRenderer<'_>, b: &mut SqlBuilder, conflict: &ConflictExpr) {
    let opts = d.options();
    b.write_str(&opts.conflict_fragment);
    match conflict {
        ConflictExpr::DoNothing { target } => {
            if opts.supports_conflict_target {
                if let Some(t) = target {
                    b.write_str(" (");
                    b.write_str(t);
                    b.write_char(')');
                }
            }
            b.write_str(&opts.conflict_do_nothing_fragment);
        }
        ConflictExpr::DoUpdate {
            target,
            update,
            where_,
        } => {
            let target = target.as_deref().filter(|t| !t.is_empty());
            if opts.supports_conflict_target {
                match target {
                    Some(t) => {
                        b.write_str(" (");
                        b.write_str(t);
                        b.write_char(')');
                    }
                    None if opts.upsert_target_required => {
                        b.set_error(Error::validation(
                            "a conflict target must be provided when using the DO UPDATE clause",
                        ));
                        return;
                    }
                    None => {}
                }
            }
            b.write_str(&opts.conflict_do_update_fragment);
            update_record_sql(r, b, update);
            if let Some(cond) = where_ {
                if !opts.supports_conflict_update_where {
                    b.set_error(Error::UpsertWhereNotSupported(d.name().to_string()));
                    return;
                }
                b.write_str(" WHERE ");
                r.expression(b, cond);
            }
        }
    }
}

/// `"col"=<expr>` pairs joined by bare commas, shared with UPDATE.
pub(crate) fn update_record_sql(r: &ExprRenderer<'_>, b: &mut SqlBuilder, rec: &Record) {
    for (i, (col, val)) in rec.iter().enumerate() {
        if i > 0 {
            b.write_char(',');
        }
        r.ident(b, &Ident::parse(col));
        b.write_char('=');
        r.expression(b, val);
    }
}
