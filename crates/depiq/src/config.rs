//! Process-wide configuration.
//!
//! The dialect registry, the default-prepared flag, the untagged-field
//! switch, and the column rename function form one mutable pool guarded by a
//! single `RwLock`. Writers serialize through the lock; readers take cheap
//! snapshots (datasets themselves stay immutable and never touch this state
//! after construction, except to resolve a tri-state prepared flag).

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::dialect::{DialectOptions, SqlDialect};

type RenameFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

struct GlobalConfig {
    default_prepared: bool,
    ignore_untagged_fields: bool,
    rename: RenameFn,
    dialects: HashMap<String, Arc<SqlDialect>>,
}

impl GlobalConfig {
    fn bootstrap() -> Self {
        let mut dialects = HashMap::new();
        for (name, options) in [
            ("default", DialectOptions::default()),
            ("postgres", DialectOptions::postgres()),
            ("mysql", DialectOptions::mysql()),
            ("sqlite3", DialectOptions::sqlite3()),
            ("sqlserver", DialectOptions::sqlserver()),
        ] {
            dialects.insert(name.to_string(), Arc::new(SqlDialect::new(name, options)));
        }
        GlobalConfig {
            default_prepared: false,
            ignore_untagged_fields: false,
            rename: Arc::new(|s: &str| s.to_lowercase()),
            dialects,
        }
    }
}

fn global() -> &'static RwLock<GlobalConfig> {
    static CONFIG: OnceLock<RwLock<GlobalConfig>> = OnceLock::new();
    CONFIG.get_or_init(|| RwLock::new(GlobalConfig::bootstrap()))
}

/// Set whether newly constructed datasets start in prepared mode.
pub fn set_default_prepared(prepared: bool) {
    global().write().expect("config lock poisoned").default_prepared = prepared;
}

/// The process-wide default for the prepared flag.
pub fn default_prepared() -> bool {
    global().read().expect("config lock poisoned").default_prepared
}

/// Set whether untagged struct fields are suppressed during normalization.
pub fn set_ignore_untagged_fields(ignore: bool) {
    global()
        .write()
        .expect("config lock poisoned")
        .ignore_untagged_fields = ignore;
}

/// Whether untagged struct fields are suppressed.
pub fn ignore_untagged_fields() -> bool {
    global()
        .read()
        .expect("config lock poisoned")
        .ignore_untagged_fields
}

/// Set the transform applied to field names lacking an explicit column.
///
/// The default lower-cases the field name. A function returning an empty
/// string for any field makes insert/update normalization fail with
/// [`Error::EmptyIdentifier`](crate::Error::EmptyIdentifier).
pub fn set_column_rename_function(f: impl Fn(&str) -> String + Send + Sync + 'static) {
    global().write().expect("config lock poisoned").rename = Arc::new(f);
}

/// Apply the process-wide column rename function.
pub fn rename_column(field: &str) -> String {
    let f = global().read().expect("config lock poisoned").rename.clone();
    f(field)
}

/// Register (or replace) a dialect under `name`.
pub fn register_dialect(name: &str, options: DialectOptions) {
    let dialect = Arc::new(SqlDialect::new(name, options));
    global()
        .write()
        .expect("config lock poisoned")
        .dialects
        .insert(name.to_string(), dialect);
}

/// Remove a registered dialect.
pub fn deregister_dialect(name: &str) {
    global()
        .write()
        .expect("config lock poisoned")
        .dialects
        .remove(name);
}

/// Look up a dialect; unknown names fall back to the default dialect.
pub fn get_dialect(name: &str) -> Arc<SqlDialect> {
    let cfg = global().read().expect("config lock poisoned");
    if let Some(d) = cfg.dialects.get(name) {
        return d.clone();
    }
    if let Some(d) = cfg.dialects.get("default") {
        return d.clone();
    }
    drop(cfg);
    Arc::new(SqlDialect::new("default", DialectOptions::default()))
}

/// The default dialect.
pub fn default_dialect() -> Arc<SqlDialect> {
    get_dialect("default")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_dialects_registered() {
        for name in ["default", "postgres", "mysql", "sqlite3", "sqlserver"] {
            assert_eq!(get_dialect(name).name(), name);
        }
    }

    #[test]
    fn unknown_dialect_falls_back_to_default() {
        assert_eq!(get_dialect("no-such-dialect").name(), "default");
    }

    #[test]
    fn register_and_deregister() {
        register_dialect("custom-cfg-test", DialectOptions::postgres());
        assert_eq!(get_dialect("custom-cfg-test").name(), "custom-cfg-test");
        deregister_dialect("custom-cfg-test");
        assert_eq!(get_dialect("custom-cfg-test").name(), "default");
    }

    #[test]
    fn rename_defaults_to_lowercase() {
        assert_eq!(rename_column("FirstName"), "firstname");
    }
}
