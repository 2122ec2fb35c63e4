//! TRUNCATE rendering.

use crate::clauses::TruncateClauses;
use crate::dialect::render::expression::ExprRenderer;
use crate::dialect::SqlDialect;
use crate::error::Error;
use crate::sql_builder::SqlBuilder;

pub(crate) fn truncate_sql(d: &SqlDialect, b: &mut SqlBuilder, c: &TruncateClauses) {
    let r = ExprRenderer::new(d);

    if c.tables().is_empty() {
        b.set_error(Error::validation("no source table defined for truncate"));
        return;
    }
    b.write_str("TRUNCATE ");
    r.column_list(b, c.tables());

    let opts = c.options();
    if !opts.identity.is_empty() {
        b.write_char(' ');
        b.write_str(&opts.identity.to_uppercase());
        b.write_str(" IDENTITY");
    }
    if opts.cascade {
        b.write_str(" CASCADE");
    }
    if opts.restrict {
        b.write_str(" RESTRICT");
    }
}
