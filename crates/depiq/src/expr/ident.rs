//! SQL identifier handling.
//!
//! An [`Ident`] is a qualified SQL identifier with optional schema, table,
//! and column components. Dotted strings parse the way [`crate::ident`]
//! documents: `"a"` is a column, `"a.b"` is `table.column`,
//! `"a.b.c"` is `schema.table.column`, and a trailing `*` selects all
//! columns of the qualifying table.

use super::{Expr, IntoExpr};

/// The column component of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPart {
    /// A named column.
    Name(String),
    /// All columns (`*`).
    Star,
}

impl ColumnPart {
    fn parse(s: &str) -> Self {
        if s == "*" {
            ColumnPart::Star
        } else {
            ColumnPart::Name(s.to_string())
        }
    }
}

/// A qualified SQL identifier (schema, table, column — each optional).
///
/// Rendering an identifier with all three components absent fails with
/// [`Error::EmptyIdentifier`](crate::Error::EmptyIdentifier).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ident {
    pub(crate) schema: Option<String>,
    pub(crate) table: Option<String>,
    pub(crate) column: Option<ColumnPart>,
}

impl Ident {
    /// A column-only identifier. The name is taken verbatim (no dot parsing).
    pub fn col(name: impl Into<String>) -> Self {
        Ident {
            schema: None,
            table: None,
            column: Some(ColumnPart::parse(&name.into())),
        }
    }

    /// A table-only identifier.
    pub fn table(name: impl Into<String>) -> Self {
        Ident {
            schema: None,
            table: Some(name.into()),
            column: None,
        }
    }

    /// A schema-only identifier.
    pub fn schema(name: impl Into<String>) -> Self {
        Ident {
            schema: Some(name.into()),
            table: None,
            column: None,
        }
    }

    /// Parse a dotted identifier.
    ///
    /// One part is a column, two parts are `table.column`, three parts are
    /// `schema.table.column`. Anything else is kept whole as a column name.
    pub fn parse(s: &str) -> Self {
        let parts: Vec<&str> = s.split('.').collect();
        match parts.as_slice() {
            [table, column] => Ident {
                schema: None,
                table: Some((*table).to_string()),
                column: Some(ColumnPart::parse(column)),
            },
            [schema, table, column] => Ident {
                schema: Some((*schema).to_string()),
                table: Some((*table).to_string()),
                column: Some(ColumnPart::parse(column)),
            },
            _ => Ident {
                schema: None,
                table: None,
                column: Some(ColumnPart::parse(s)),
            },
        }
    }

    /// Returns a copy qualified with the given schema.
    pub fn with_schema(&self, schema: impl Into<String>) -> Self {
        let mut i = self.clone();
        i.schema = Some(schema.into());
        i
    }

    /// Returns a copy qualified with the given table.
    pub fn with_table(&self, table: impl Into<String>) -> Self {
        let mut i = self.clone();
        i.table = Some(table.into());
        i
    }

    /// Returns a copy with the given column.
    pub fn with_col(&self, column: impl Into<String>) -> Self {
        let mut i = self.clone();
        i.column = Some(ColumnPart::parse(&column.into()));
        i
    }

    /// Returns a copy selecting all columns (`table.*`).
    pub fn all(&self) -> Self {
        let mut i = self.clone();
        i.column = Some(ColumnPart::Star);
        i
    }

    /// True when no component is present.
    pub fn is_empty(&self) -> bool {
        self.schema.is_none() && self.table.is_none() && self.column.is_none()
    }

    pub(crate) fn schema_part(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub(crate) fn table_part(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub(crate) fn column_part(&self) -> Option<&ColumnPart> {
        self.column.as_ref()
    }

    /// The name used when this identifier is a SET-clause key: the column
    /// name if present, otherwise the table name.
    pub(crate) fn set_key(&self) -> Option<String> {
        match &self.column {
            Some(ColumnPart::Name(n)) => Some(n.clone()),
            _ => self.table.clone(),
        }
    }
}

/// Conversion of an input into an [`Ident`].
///
/// Strings parse their dotted form; this is mainly for ergonomics in
/// builder APIs that take tables or aliases.
pub trait IntoIdent {
    fn into_ident(self) -> Ident;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> Ident {
        self
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> Ident {
        self.clone()
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> Ident {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> Ident {
        Ident::parse(&self)
    }
}

impl IntoExpr for Ident {
    fn into_expr(self) -> Expr {
        Expr::Ident(self)
    }
}
