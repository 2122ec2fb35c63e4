//! Row and set-clause normalization.
//!
//! Heterogeneous inputs to `rows(...)` (INSERT) and `set(...)` (UPDATE) —
//! record maps, mapped structs, or slices of either — normalize to ordered
//! [`Record`]s. Struct participation goes through [`ColumnMap`], the
//! compile-time rendition of the `db:`/`depiq:` field-tag contract; the
//! mechanics of producing an implementation (hand-written or derived) are
//! outside this crate.

use std::collections::{BTreeMap, BTreeSet};

use crate::config;
use crate::error::{Error, Result};
use crate::expr::{Expr, IntoExpr};
use crate::value::Value;

/// An ordered column→expression map, usable as an INSERT row or an UPDATE
/// set-clause. Iteration order is lexicographic by column, which keeps
/// generated SQL deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(BTreeMap<String, Expr>);

impl Record {
    pub fn new() -> Self {
        Record(BTreeMap::new())
    }

    /// Add a column value. Values may be plain Rust values, expressions,
    /// literals, or [`Expr::Default`].
    pub fn set(mut self, col: impl Into<String>, val: impl IntoExpr) -> Self {
        self.0.insert(col.into(), val.into_expr());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, col: &str) -> Option<&Expr> {
        self.0.get(col)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Which statement kind a normalization runs for; decides whether
/// `skip_insert` or `skip_update` applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeKind {
    Insert,
    Update,
}

/// A field descriptor of a [`ColumnMap`] implementation.
///
/// `column: None` means the field is untagged: the process-wide rename
/// function produces its column name (and `set_ignore_untagged_fields(true)`
/// suppresses it entirely). `column: Some("-")` skips the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub column: Option<&'static str>,
    pub skip_insert: bool,
    pub skip_update: bool,
    pub default_if_empty: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str) -> Self {
        FieldDef {
            name,
            column: None,
            skip_insert: false,
            skip_update: false,
            default_if_empty: false,
        }
    }

    pub const fn column(mut self, column: &'static str) -> Self {
        self.column = Some(column);
        self
    }

    pub const fn skip_insert(mut self) -> Self {
        self.skip_insert = true;
        self
    }

    pub const fn skip_update(mut self) -> Self {
        self.skip_update = true;
        self
    }

    pub const fn default_if_empty(mut self) -> Self {
        self.default_if_empty = true;
        self
    }
}

/// Maps a struct to columns for INSERT/UPDATE.
///
/// Embedded structs flatten by including their fields in `fields()`; a
/// skipped embedded struct (or one behind a `None` pointer) simply
/// contributes nothing.
pub trait ColumnMap {
    /// Field descriptors in declaration order.
    fn fields() -> &'static [FieldDef];

    /// The current value of the named field.
    fn field_value(&self, field: &'static str) -> Value;
}

/// Normalize one mapped struct into a [`Record`].
pub fn record_from<T: ColumnMap>(v: &T, kind: NormalizeKind) -> Result<Record> {
    let mut rec = Record::new();
    for f in T::fields() {
        if matches!(f.column, Some("-")) {
            continue;
        }
        match kind {
            NormalizeKind::Insert if f.skip_insert => continue,
            NormalizeKind::Update if f.skip_update => continue,
            _ => {}
        }
        let col = match f.column {
            Some(c) => c.to_string(),
            None => {
                if config::ignore_untagged_fields() {
                    continue;
                }
                let renamed = config::rename_column(f.name);
                if renamed.is_empty() {
                    return Err(Error::EmptyIdentifier);
                }
                renamed
            }
        };
        let val = v.field_value(f.name);
        let expr = if f.default_if_empty && val.is_zero() {
            Expr::Default
        } else {
            Expr::Value(val)
        };
        rec = rec.set(col, expr);
    }
    Ok(rec)
}

/// Compute the column union of a row set and fill missing cells with
/// `DEFAULT`, in lexicographic column order.
pub(crate) fn normalize_rows(rows: &[Record]) -> (Vec<String>, Vec<Vec<Expr>>) {
    let mut cols: BTreeSet<&str> = BTreeSet::new();
    for row in rows {
        cols.extend(row.columns());
    }
    let cols: Vec<String> = cols.into_iter().map(str::to_string).collect();
    let values = rows
        .iter()
        .map(|row| {
            cols.iter()
                .map(|c| row.get(c).cloned().unwrap_or(Expr::Default))
                .collect()
        })
        .collect();
    (cols, values)
}

/// One-or-many rows for an INSERT.
pub trait IntoRows {
    fn into_rows(self) -> Result<Vec<Record>>;
}

impl IntoRows for Record {
    fn into_rows(self) -> Result<Vec<Record>> {
        Ok(vec![self])
    }
}

impl IntoRows for Vec<Record> {
    fn into_rows(self) -> Result<Vec<Record>> {
        Ok(self)
    }
}

impl<T: ColumnMap> IntoRows for T {
    fn into_rows(self) -> Result<Vec<Record>> {
        Ok(vec![record_from(&self, NormalizeKind::Insert)?])
    }
}

impl<T: ColumnMap> IntoRows for Vec<T> {
    fn into_rows(self) -> Result<Vec<Record>> {
        self.iter()
            .map(|v| record_from(v, NormalizeKind::Insert))
            .collect()
    }
}

impl<T: ColumnMap> IntoRows for &[T] {
    fn into_rows(self) -> Result<Vec<Record>> {
        self.iter()
            .map(|v| record_from(v, NormalizeKind::Insert))
            .collect()
    }
}

/// A set-clause source for UPDATE (and `DO UPDATE`).
pub trait IntoSetRecord {
    fn into_set_record(self) -> Result<Record>;
}

impl IntoSetRecord for Record {
    fn into_set_record(self) -> Result<Record> {
        Ok(self)
    }
}

impl<T: ColumnMap> IntoSetRecord for T {
    fn into_set_record(self) -> Result<Record> {
        record_from(&self, NormalizeKind::Update)
    }
}

impl IntoSetRecord for crate::expr::SetPair {
    fn into_set_record(self) -> Result<Record> {
        Ok(self.into())
    }
}

impl IntoSetRecord for Vec<crate::expr::SetPair> {
    fn into_set_record(self) -> Result<Record> {
        Ok(self.into())
    }
}
