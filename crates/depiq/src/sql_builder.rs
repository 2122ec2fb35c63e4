//! The SQL builder sink.
//!
//! An append-only buffer holding the generated text, the collected
//! parameters, the prepared flag, and a first-error latch. The sink is the
//! only place that knows what a placeholder looks like; everything else
//! writes text or hands it values.

use crate::error::{Error, Result};
use crate::value::Value;

/// Placeholder shape of a dialect: the fragment (`?`, `$`, `@p`) and whether
/// a 1-based index follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderStyle {
    pub fragment: String,
    pub include_num: bool,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        PlaceholderStyle {
            fragment: "?".to_string(),
            include_num: false,
        }
    }
}

/// Append-only SQL accumulator with parameter collection and an error latch.
///
/// Once an error is set, every further write is ignored and
/// [`finish`](SqlBuilder::finish) returns the first error unchanged.
#[derive(Debug)]
pub struct SqlBuilder {
    prepared: bool,
    placeholder: PlaceholderStyle,
    sql: String,
    args: Vec<Value>,
    error: Option<Error>,
}

impl SqlBuilder {
    pub fn new(prepared: bool, placeholder: PlaceholderStyle) -> Self {
        SqlBuilder {
            prepared,
            placeholder,
            sql: String::new(),
            args: Vec::new(),
            error: None,
        }
    }

    /// Whether literal values should be collected as parameters.
    pub fn prepared(&self) -> bool {
        self.prepared
    }

    pub fn write_str(&mut self, s: &str) {
        if self.error.is_none() {
            self.sql.push_str(s);
        }
    }

    pub fn write_char(&mut self, c: char) {
        if self.error.is_none() {
            self.sql.push(c);
        }
    }

    /// Collect `value` as a parameter and emit its placeholder.
    ///
    /// Callers must only use this in prepared mode; interpolated mode renders
    /// literals as text through `write_str`.
    pub fn write_arg(&mut self, value: Value) {
        if self.error.is_some() {
            return;
        }
        self.args.push(value);
        self.sql.push_str(&self.placeholder.fragment);
        if self.placeholder.include_num {
            self.sql.push_str(&self.args.len().to_string());
        }
    }

    /// Latch an error; the first one wins.
    pub fn set_error(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// The accumulated text and parameters, or the latched error.
    pub fn finish(self) -> Result<(String, Vec<Value>)> {
        match self.error {
            Some(e) => Err(e),
            None => Ok((self.sql, self.args)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_accumulate() {
        let mut b = SqlBuilder::new(false, PlaceholderStyle::default());
        b.write_str("SELECT ");
        b.write_char('*');
        let (sql, args) = b.finish().unwrap();
        assert_eq!(sql, "SELECT *");
        assert!(args.is_empty());
    }

    #[test]
    fn args_emit_placeholders_in_order() {
        let mut b = SqlBuilder::new(true, PlaceholderStyle::default());
        b.write_arg(Value::Int(1));
        b.write_str(", ");
        b.write_arg(Value::Str("a".into()));
        let (sql, args) = b.finish().unwrap();
        assert_eq!(sql, "?, ?");
        assert_eq!(args, vec![Value::Int(1), Value::Str("a".into())]);
    }

    #[test]
    fn numbered_placeholders() {
        let mut b = SqlBuilder::new(
            true,
            PlaceholderStyle {
                fragment: "$".into(),
                include_num: true,
            },
        );
        b.write_arg(Value::Int(1));
        b.write_str(" ");
        b.write_arg(Value::Int(2));
        let (sql, _) = b.finish().unwrap();
        assert_eq!(sql, "$1 $2");
    }

    #[test]
    fn first_error_wins_and_blocks_writes() {
        let mut b = SqlBuilder::new(false, PlaceholderStyle::default());
        b.write_str("SELECT");
        b.set_error(Error::WindowFunctionNotSupported);
        b.set_error(Error::QueryFactoryNotFound);
        b.write_str(" IGNORED");
        assert_eq!(b.error(), Some(&Error::WindowFunctionNotSupported));
        assert_eq!(b.finish(), Err(Error::WindowFunctionNotSupported));
    }
}
