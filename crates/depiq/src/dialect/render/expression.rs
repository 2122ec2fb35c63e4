//! Expression rendering.
//!
//! Walks an [`Expr`] tree, emitting quoted identifiers, interpolated
//! literals, and parameter placeholders while preserving left-to-right
//! argument order.

use crate::config;
use crate::dialect::options::QuoteEscape;
use crate::dialect::SqlDialect;
use crate::error::Error;
use crate::expr::{
    BinaryOp, CaseExpr, ColumnPart, Expr, GroupOp, Ident, JoinCond, NullSort, SortDir, Subquery,
    SubqueryKind, WindowExpr,
};
use crate::sql_builder::SqlBuilder;
use crate::value::Value;

pub(crate) struct ExprRenderer<'a> {
    d: &'a SqlDialect,
}

impl<'a> ExprRenderer<'a> {
    pub(crate) fn new(d: &'a SqlDialect) -> Self {
        ExprRenderer { d }
    }

    pub(crate) fn expression(&self, b: &mut SqlBuilder, e: &Expr) {
        if b.has_error() {
            return;
        }
        match e {
            Expr::Ident(i) => self.ident(b, i),
            Expr::Value(v) => self.value(b, v),
            Expr::Default => b.write_str("DEFAULT"),
            Expr::Literal { template, args } => self.literal(b, template, args),
            Expr::List(op, exprs) => self.expression_list(b, *op, exprs),
            Expr::ExprList(items) => self.value_list(b, items),
            Expr::Binary { op, lhs, rhs } => self.binary(b, *op, lhs, rhs),
            Expr::Range { start, end } => {
                // only valid inside BETWEEN; render the bare bounds
                self.expression(b, start);
                b.write_str(" AND ");
                self.expression(b, end);
            }
            Expr::Cast { expr, sql_type } => {
                b.write_str("CAST(");
                self.expression(b, expr);
                b.write_str(" AS ");
                b.write_str(sql_type);
                b.write_char(')');
            }
            Expr::Func { name, args } => self.func(b, name, args),
            Expr::Aliased { expr, alias } => {
                self.expression(b, expr);
                b.write_str(" AS ");
                self.ident(b, alias);
            }
            Expr::Ordered { expr, dir, nulls } => {
                self.expression(b, expr);
                b.write_str(match dir {
                    SortDir::Asc => " ASC",
                    SortDir::Desc => " DESC",
                });
                match nulls {
                    NullSort::Unspecified => {}
                    NullSort::First => b.write_str(" NULLS FIRST"),
                    NullSort::Last => b.write_str(" NULLS LAST"),
                }
            }
            Expr::Case(c) => self.case(b, c),
            Expr::Window(w) => self.window_spec(b, w),
            Expr::WindowFn { func, name, spec } => {
                self.expression(b, func);
                b.write_str(" OVER ");
                match (name, spec) {
                    (Some(n), _) => self.ident(b, n),
                    (None, Some(w)) => self.window_spec(b, w),
                    (None, None) => b.write_str("()"),
                }
            }
            Expr::Subquery(sq) => {
                b.write_char('(');
                self.subquery(b, sq);
                b.write_char(')');
            }
            Expr::Lateral(sq) => {
                b.write_str("LATERAL (");
                self.subquery(b, sq);
                b.write_char(')');
            }
        }
    }

    /// Renders an embedded statement with its own dialect into the shared sink.
    pub(crate) fn subquery(&self, b: &mut SqlBuilder, sq: &Subquery) {
        if let Some(err) = &sq.error {
            b.set_error(err.clone());
            return;
        }
        let dialect = config::get_dialect(&sq.dialect);
        match &sq.kind {
            SubqueryKind::Select(c) => dialect.to_select_sql(b, c),
            SubqueryKind::Insert(c) => dialect.to_insert_sql(b, c),
            SubqueryKind::Update(c) => dialect.to_update_sql(b, c),
            SubqueryKind::Delete(c) => dialect.to_delete_sql(b, c),
        }
    }

    pub(crate) fn ident(&self, b: &mut SqlBuilder, i: &Ident) {
        if i.is_empty() {
            b.set_error(Error::EmptyIdentifier);
            return;
        }
        let mut first = true;
        if let Some(schema) = i.schema_part() {
            self.quoted(b, schema);
            first = false;
        }
        if let Some(table) = i.table_part() {
            if !first {
                b.write_char('.');
            }
            self.quoted(b, table);
            first = false;
        }
        if let Some(col) = i.column_part() {
            if !first {
                b.write_char('.');
            }
            match col {
                ColumnPart::Star => b.write_char('*'),
                ColumnPart::Name(n) => self.quoted(b, n),
            }
        }
    }

    fn quoted(&self, b: &mut SqlBuilder, name: &str) {
        let q = self.d.options().quote;
        b.write_char(q);
        for c in name.chars() {
            if c == q {
                b.write_char(q);
            }
            b.write_char(c);
        }
        b.write_char(q);
    }

    /// Renders a value: a placeholder in prepared mode, the literal form
    /// otherwise.
    pub(crate) fn value(&self, b: &mut SqlBuilder, v: &Value) {
        if b.prepared() {
            let arg = match v {
                Value::Regex(p) => Value::Str(p.clone()),
                other => other.clone(),
            };
            b.write_arg(arg);
            return;
        }
        match v {
            Value::Null => b.write_str("NULL"),
            Value::Bool(val) => self.literal_bool(b, *val),
            Value::Int(i) => b.write_str(&i.to_string()),
            Value::UInt(u) => b.write_str(&u.to_string()),
            Value::Float(f) => b.write_str(&f.to_string()),
            Value::Str(s) => self.quoted_string(b, s),
            Value::Bytes(bytes) => {
                let s = String::from_utf8_lossy(bytes).into_owned();
                self.quoted_string(b, &s);
            }
            Value::Timestamp(t) => {
                let s = t.format(&self.d.options().time_format).to_string();
                self.quoted_string(b, &s);
            }
            Value::Json(j) => match serde_json::to_string(j) {
                Ok(s) => self.quoted_string(b, &s),
                Err(_) => b.set_error(Error::Encode(format!("{j:?}"))),
            },
            Value::Regex(p) => self.quoted_string(b, p),
        }
    }

    fn literal_bool(&self, b: &mut SqlBuilder, val: bool) {
        if self.d.options().use_literal_is_bools {
            b.write_str(if val { "1" } else { "0" });
        } else {
            b.write_str(if val { "TRUE" } else { "FALSE" });
        }
    }

    fn quoted_string(&self, b: &mut SqlBuilder, s: &str) {
        b.write_char('\'');
        match self.d.options().quote_escape {
            QuoteEscape::Doubled => {
                for c in s.chars() {
                    if c == '\'' {
                        b.write_char('\'');
                    }
                    b.write_char(c);
                }
            }
            QuoteEscape::Backslash => {
                for c in s.chars() {
                    match c {
                        '\'' => b.write_str("\\'"),
                        '"' => b.write_str("\\\""),
                        '\\' => b.write_str("\\\\"),
                        other => b.write_char(other),
                    }
                }
            }
        }
        b.write_char('\'');
    }

    fn literal(&self, b: &mut SqlBuilder, template: &str, args: &[Expr]) {
        let mut args = args.iter();
        for c in template.chars() {
            if c == '?' {
                match args.next() {
                    Some(arg) => self.expression(b, arg),
                    None => b.write_char('?'),
                }
            } else {
                b.write_char(c);
            }
        }
    }

    /// AND/OR list. A single element renders bare; more are joined by the
    /// group keyword and wrapped in parentheses.
    fn expression_list(&self, b: &mut SqlBuilder, op: GroupOp, exprs: &[Expr]) {
        match exprs {
            [] => {}
            [single] => self.expression(b, single),
            many => {
                let sep = match op {
                    GroupOp::And => " AND ",
                    GroupOp::Or => " OR ",
                };
                b.write_char('(');
                for (i, e) in many.iter().enumerate() {
                    if i > 0 {
                        b.write_str(sep);
                    }
                    self.expression(b, e);
                }
                b.write_char(')');
            }
        }
    }

    /// `(v1, v2, ...)`
    fn value_list(&self, b: &mut SqlBuilder, items: &[Expr]) {
        b.write_char('(');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                b.write_str(", ");
            }
            self.expression(b, item);
        }
        b.write_char(')');
    }

    fn binary(&self, b: &mut SqlBuilder, op: BinaryOp, lhs: &Expr, rhs: &Expr) {
        if op == BinaryOp::BitwiseInversion {
            match &self.d.options().bitwise_inversion_op {
                Some(token) => {
                    b.write_char('(');
                    b.write_str(token);
                    b.write_char(' ');
                    self.expression(b, lhs);
                    b.write_char(')');
                }
                None => b.set_error(Error::BitwiseOpNotSupported("Inversion")),
            }
            return;
        }

        // IS against booleans renders keywords in both modes, and fails on
        // dialects without a boolean data type.
        if matches!(op, BinaryOp::Is | BinaryOp::IsNot) {
            if let Expr::Value(v @ (Value::Bool(_) | Value::Null)) = rhs {
                if matches!(v, Value::Bool(_)) && !self.d.options().boolean_data_type_supported {
                    b.set_error(Error::BooleanDataTypeNotSupported(self.d.name().to_string()));
                    return;
                }
                b.write_char('(');
                self.expression(b, lhs);
                b.write_str(if op == BinaryOp::Is { " IS " } else { " IS NOT " });
                match v {
                    Value::Null => b.write_str("NULL"),
                    Value::Bool(val) => self.literal_bool(b, *val),
                    _ => unreachable!("matched above"),
                }
                b.write_char(')');
                return;
            }
        }

        let token: &str = match op {
            BinaryOp::Eq => "=",
            BinaryOp::Neq => "!=",
            BinaryOp::Is => "IS",
            BinaryOp::IsNot => "IS NOT",
            BinaryOp::Gt => ">",
            BinaryOp::Gte => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Lte => "<=",
            BinaryOp::In => "IN",
            BinaryOp::NotIn => "NOT IN",
            BinaryOp::Like => "LIKE",
            BinaryOp::NotLike => "NOT LIKE",
            BinaryOp::ILike => self.d.options().ilike_op.as_str(),
            BinaryOp::NotILike => self.d.options().not_ilike_op.as_str(),
            BinaryOp::RegexpLike => self.d.options().regexp_like_op.as_str(),
            BinaryOp::RegexpNotLike => self.d.options().regexp_not_like_op.as_str(),
            BinaryOp::RegexpILike => self.d.options().regexp_ilike_op.as_str(),
            BinaryOp::RegexpNotILike => self.d.options().regexp_not_ilike_op.as_str(),
            BinaryOp::Between => "BETWEEN",
            BinaryOp::NotBetween => "NOT BETWEEN",
            BinaryOp::BitwiseAnd => "&",
            BinaryOp::BitwiseOr => "|",
            BinaryOp::BitwiseLeftShift => "<<",
            BinaryOp::BitwiseRightShift => ">>",
            BinaryOp::BitwiseXor => match &self.d.options().bitwise_xor_op {
                Some(token) => token.as_str(),
                None => {
                    b.set_error(Error::BitwiseOpNotSupported("XOR"));
                    return;
                }
            },
            BinaryOp::BitwiseInversion => unreachable!("handled above"),
        };

        b.write_char('(');
        self.expression(b, lhs);
        b.write_char(' ');
        b.write_str(token);
        b.write_char(' ');
        self.expression(b, rhs);
        b.write_char(')');
    }

    fn func(&self, b: &mut SqlBuilder, name: &str, args: &[Expr]) {
        b.write_str(name);
        b.write_char('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                b.write_str(", ");
            }
            self.expression(b, arg);
        }
        b.write_char(')');
    }

    fn case(&self, b: &mut SqlBuilder, c: &CaseExpr) {
        b.write_str("CASE ");
        if let Some(v) = &c.value {
            self.expression(b, v);
        }
        for (cond, result) in &c.whens {
            b.write_str(" WHEN ");
            self.expression(b, cond);
            b.write_str(" THEN ");
            self.expression(b, result);
        }
        if let Some(e) = &c.else_ {
            b.write_str(" ELSE ");
            self.expression(b, e);
        }
        b.write_str(" END");
    }

    /// `(parent PARTITION BY ... ORDER BY ...)` — the parenthesized window
    /// specification used inline after `OVER` and in `WINDOW` clauses.
    pub(crate) fn window_spec(&self, b: &mut SqlBuilder, w: &WindowExpr) {
        b.write_char('(');
        let mut needs_space = false;
        if let Some(parent) = &w.parent {
            self.ident(b, parent);
            needs_space = true;
        }
        if !w.partition.is_empty() {
            if needs_space {
                b.write_char(' ');
            }
            b.write_str("PARTITION BY ");
            self.column_list(b, &w.partition);
            needs_space = true;
        }
        if !w.order.is_empty() {
            if needs_space {
                b.write_char(' ');
            }
            b.write_str("ORDER BY ");
            self.column_list(b, &w.order);
        }
        b.write_char(')');
    }

    /// Comma-joined expressions without surrounding parentheses.
    pub(crate) fn column_list(&self, b: &mut SqlBuilder, cols: &[Expr]) {
        for (i, col) in cols.iter().enumerate() {
            if i > 0 {
                b.write_str(", ");
            }
            self.expression(b, col);
        }
    }

    /// A boolean clause body (`WHERE`/`HAVING`): entries AND together.
    pub(crate) fn clause_conditions(&self, b: &mut SqlBuilder, conds: &[Expr]) {
        self.expression_list(b, GroupOp::And, conds);
    }

    /// Joins, shared by select and the statement renderers that allow them.
    pub(crate) fn join(&self, b: &mut SqlBuilder, join: &crate::expr::JoinExpr) {
        b.write_char(' ');
        b.write_str(join.kind.keyword());
        b.write_char(' ');
        self.expression(b, &join.target);
        match &join.cond {
            JoinCond::None => {}
            JoinCond::On(cond) => {
                b.write_str(" ON ");
                self.expression(b, cond);
            }
            JoinCond::Using(cols) => {
                b.write_str(" USING (");
                self.column_list(b, cols);
                b.write_char(')');
            }
        }
    }

    /// `WITH [RECURSIVE] name AS (...), ... ` — the leading CTE list.
    pub(crate) fn common_tables(
        &self,
        b: &mut SqlBuilder,
        ctes: &[crate::expr::CommonTableExpr],
    ) {
        if ctes.is_empty() {
            return;
        }
        b.write_str("WITH ");
        if ctes.iter().any(|cte| cte.recursive) {
            b.write_str("RECURSIVE ");
        }
        for (i, cte) in ctes.iter().enumerate() {
            if i > 0 {
                b.write_str(", ");
            }
            b.write_str(&cte.name);
            b.write_str(" AS (");
            self.subquery(b, &cte.query);
            b.write_char(')');
        }
        b.write_char(' ');
    }
}
