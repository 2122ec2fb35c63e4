//! Dialect configuration.
//!
//! A [`DialectOptions`] value controls every grammar difference the
//! renderers know about: quoting, placeholders, clause support flags,
//! operator tokens, and upsert shape. The bundled dialects are thin
//! constructors over the default; registering custom options under a new
//! name is the extension point.

/// How string literals escape embedded quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteEscape {
    /// `'` doubles to `''` (standard SQL).
    Doubled,
    /// Backslash escaping of `'`, `"`, and `\` (mysql).
    Backslash,
}

/// Grammar configuration of a dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct DialectOptions {
    /// Character used to quote identifiers.
    pub quote: char,
    /// Placeholder fragment in prepared mode (`?`, `$`, `@p`).
    pub placeholder_fragment: String,
    /// Append the 1-based parameter index to each placeholder.
    pub include_placeholder_num: bool,
    /// String-literal escaping style.
    pub quote_escape: QuoteEscape,

    /// `RETURNING` support; when false its presence is an error.
    pub supports_returning: bool,
    /// `LIMIT` on DELETE statements.
    pub supports_limit_on_delete: bool,
    /// `LIMIT` on UPDATE statements.
    pub supports_limit_on_update: bool,
    /// `ORDER BY` on DELETE statements.
    pub supports_order_by_on_delete: bool,
    /// `ORDER BY` on UPDATE statements.
    pub supports_order_by_on_update: bool,
    /// Multi-table UPDATE.
    pub supports_multiple_update_tables: bool,
    /// Render extra update tables in a `FROM` clause (postgres style) rather
    /// than inline after `UPDATE` (mysql style).
    pub use_from_clause_for_multiple_update_tables: bool,
    /// `WINDOW` clause / window functions.
    pub supports_window_function: bool,
    /// Row locking (`FOR UPDATE ...`); when false the lock clause is omitted.
    pub supports_lock: bool,
    /// Wrap compound (UNION/INTERSECT) sub-statements in parentheses.
    pub wrap_compounds_in_parens: bool,

    /// Whether the dialect has a boolean data type; when false, boolean
    /// comparisons are an error.
    pub boolean_data_type_supported: bool,
    /// Render `IS 1`/`IS 0` instead of `IS TRUE`/`IS FALSE` (sqlite3).
    pub use_literal_is_bools: bool,

    /// Regex match operator (`~`, `REGEXP`).
    pub regexp_like_op: String,
    /// Negated regex match operator.
    pub regexp_not_like_op: String,
    /// Case-insensitive regex match operator.
    pub regexp_ilike_op: String,
    /// Negated case-insensitive regex match operator.
    pub regexp_not_ilike_op: String,
    /// `ILIKE` token; dialects without a distinct operator reuse `LIKE`.
    pub ilike_op: String,
    /// `NOT ILIKE` token.
    pub not_ilike_op: String,

    /// Bitwise XOR token, or `None` when unsupported.
    pub bitwise_xor_op: Option<String>,
    /// Bitwise inversion token, or `None` when unsupported.
    pub bitwise_inversion_op: Option<String>,

    /// chrono format string for inline timestamp rendering.
    pub time_format: String,

    /// `INSERT` keyword replacement when a DO NOTHING conflict clause is
    /// expressed as an ignore-style insert (`INSERT IGNORE INTO`,
    /// `INSERT OR IGNORE INTO`), or `None` for a trailing conflict clause.
    pub insert_ignore_fragment: Option<String>,
    /// Leading fragment of a trailing conflict clause.
    pub conflict_fragment: String,
    /// `DO NOTHING` fragment.
    pub conflict_do_nothing_fragment: String,
    /// `DO UPDATE SET `-style fragment.
    pub conflict_do_update_fragment: String,
    /// Whether the conflict target renders.
    pub supports_conflict_target: bool,
    /// `WHERE` on `DO UPDATE`.
    pub supports_conflict_update_where: bool,
    /// Whether `DO UPDATE` requires a conflict target.
    pub upsert_target_required: bool,
}

impl Default for DialectOptions {
    fn default() -> Self {
        DialectOptions {
            quote: '"',
            placeholder_fragment: "?".to_string(),
            include_placeholder_num: false,
            quote_escape: QuoteEscape::Doubled,
            supports_returning: true,
            supports_limit_on_delete: false,
            supports_limit_on_update: false,
            supports_order_by_on_delete: false,
            supports_order_by_on_update: false,
            supports_multiple_update_tables: true,
            use_from_clause_for_multiple_update_tables: true,
            supports_window_function: true,
            supports_lock: true,
            wrap_compounds_in_parens: true,
            boolean_data_type_supported: true,
            use_literal_is_bools: false,
            regexp_like_op: "~".to_string(),
            regexp_not_like_op: "!~".to_string(),
            regexp_ilike_op: "~*".to_string(),
            regexp_not_ilike_op: "!~*".to_string(),
            ilike_op: "ILIKE".to_string(),
            not_ilike_op: "NOT ILIKE".to_string(),
            bitwise_xor_op: Some("#".to_string()),
            bitwise_inversion_op: Some("~".to_string()),
            time_format: "%Y-%m-%dT%H:%M:%S%.9f%:z".to_string(),
            insert_ignore_fragment: None,
            conflict_fragment: " ON CONFLICT".to_string(),
            conflict_do_nothing_fragment: " DO NOTHING".to_string(),
            conflict_do_update_fragment: " DO UPDATE SET ".to_string(),
            supports_conflict_target: true,
            supports_conflict_update_where: true,
            upsert_target_required: true,
        }
    }
}

impl DialectOptions {
    /// Postgres: numbered `$n` placeholders; everything else default.
    pub fn postgres() -> Self {
        DialectOptions {
            placeholder_fragment: "$".to_string(),
            include_placeholder_num: true,
            ..Default::default()
        }
    }

    /// MySQL: backtick quoting, backslash escapes, `REGEXP`, order/limit on
    /// DELETE/UPDATE, inline multi-table UPDATE, ignore-style upserts, no
    /// RETURNING.
    pub fn mysql() -> Self {
        DialectOptions {
            quote: '`',
            quote_escape: QuoteEscape::Backslash,
            supports_returning: false,
            supports_limit_on_delete: true,
            supports_limit_on_update: true,
            supports_order_by_on_delete: true,
            supports_order_by_on_update: true,
            use_from_clause_for_multiple_update_tables: false,
            supports_window_function: false,
            regexp_like_op: "REGEXP".to_string(),
            regexp_not_like_op: "NOT REGEXP".to_string(),
            regexp_ilike_op: "REGEXP".to_string(),
            regexp_not_ilike_op: "NOT REGEXP".to_string(),
            bitwise_xor_op: Some("^".to_string()),
            time_format: "%Y-%m-%d %H:%M:%S".to_string(),
            insert_ignore_fragment: Some("INSERT IGNORE INTO".to_string()),
            conflict_fragment: " ON DUPLICATE KEY".to_string(),
            conflict_do_nothing_fragment: String::new(),
            conflict_do_update_fragment: " UPDATE ".to_string(),
            supports_conflict_target: false,
            supports_conflict_update_where: false,
            upsert_target_required: false,
            ..Default::default()
        }
    }

    /// SQLite: backtick quoting, literal `IS 1/0` booleans, `REGEXP`, no
    /// distinct ILIKE, bare compounds, no locks, no RETURNING, no XOR.
    pub fn sqlite3() -> Self {
        DialectOptions {
            quote: '`',
            supports_returning: false,
            supports_limit_on_delete: true,
            supports_limit_on_update: true,
            supports_order_by_on_delete: true,
            supports_order_by_on_update: true,
            supports_multiple_update_tables: false,
            supports_window_function: false,
            supports_lock: false,
            wrap_compounds_in_parens: false,
            use_literal_is_bools: true,
            regexp_like_op: "REGEXP".to_string(),
            regexp_not_like_op: "NOT REGEXP".to_string(),
            regexp_ilike_op: "REGEXP".to_string(),
            regexp_not_ilike_op: "NOT REGEXP".to_string(),
            ilike_op: "LIKE".to_string(),
            not_ilike_op: "NOT LIKE".to_string(),
            bitwise_xor_op: None,
            bitwise_inversion_op: None,
            time_format: "%Y-%m-%dT%H:%M:%S%.3f".to_string(),
            insert_ignore_fragment: Some("INSERT OR IGNORE INTO".to_string()),
            supports_conflict_update_where: false,
            ..Default::default()
        }
    }

    /// SQL Server: `@pN` placeholders, no boolean data type, no RETURNING,
    /// no upsert clause.
    pub fn sqlserver() -> Self {
        DialectOptions {
            placeholder_fragment: "@p".to_string(),
            include_placeholder_num: true,
            supports_returning: false,
            boolean_data_type_supported: false,
            supports_window_function: false,
            time_format: "%Y-%m-%d %H:%M:%S".to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quotes_with_double_quote() {
        let o = DialectOptions::default();
        assert_eq!(o.quote, '"');
        assert_eq!(o.placeholder_fragment, "?");
        assert!(!o.include_placeholder_num);
    }

    #[test]
    fn postgres_numbers_placeholders() {
        let o = DialectOptions::postgres();
        assert_eq!(o.placeholder_fragment, "$");
        assert!(o.include_placeholder_num);
    }

    #[test]
    fn mysql_flags() {
        let o = DialectOptions::mysql();
        assert_eq!(o.quote, '`');
        assert!(!o.supports_returning);
        assert!(o.supports_limit_on_delete);
        assert!(o.supports_order_by_on_delete);
        assert!(!o.supports_conflict_update_where);
    }

    #[test]
    fn sqlite_literal_bools() {
        let o = DialectOptions::sqlite3();
        assert!(o.use_literal_is_bools);
        assert!(o.bitwise_xor_op.is_none());
        assert!(!o.wrap_compounds_in_parens);
    }
}
