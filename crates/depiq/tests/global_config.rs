//! Process-wide configuration tests.
//!
//! These mutate global state (default-prepared flag, rename function,
//! dialect registry), so they live in their own test binary and serialize
//! through a shared lock, restoring defaults before releasing it.

use std::sync::{Mutex, MutexGuard, OnceLock};

use depiq::{col, ColumnMap, DialectOptions, Error, ExprOps, FieldDef, Record, Value};

fn guard() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(Mutex::default)
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct User {
    first_name: String,
    last_name: String,
}

impl ColumnMap for User {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[FieldDef::new("FirstName"), FieldDef::new("LastName")];
        FIELDS
    }

    fn field_value(&self, field: &'static str) -> Value {
        match field {
            "FirstName" => Value::Str(self.first_name.clone()),
            _ => Value::Str(self.last_name.clone()),
        }
    }
}

struct TaggedUser {
    id: i64,
    name: String,
}

impl ColumnMap for TaggedUser {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::new("id").column("id").skip_insert(),
            FieldDef::new("name").column("name"),
            FieldDef::new("Untagged"),
        ];
        FIELDS
    }

    fn field_value(&self, field: &'static str) -> Value {
        match field {
            "id" => Value::Int(self.id),
            "name" => Value::Str(self.name.clone()),
            _ => Value::Str("untagged".into()),
        }
    }
}

fn greg() -> User {
    User {
        first_name: "Greg".into(),
        last_name: "Farley".into(),
    }
}

#[test]
fn default_prepared_applies_to_new_datasets() {
    let _g = guard();
    depiq::set_default_prepared(true);

    let ds = depiq::from("test").where_(col("a").eq(1));
    assert!(ds.is_prepared());
    let (sql, args) = ds.to_sql().unwrap();
    assert_eq!(sql, r#"SELECT * FROM "test" WHERE ("a" = ?)"#);
    assert_eq!(args, vec![Value::Int(1)]);

    // an explicit prepared(false) still wins
    let (sql, args) = ds.prepared(false).to_sql().unwrap();
    assert_eq!(sql, r#"SELECT * FROM "test" WHERE ("a" = 1)"#);
    assert!(args.is_empty());

    depiq::set_default_prepared(false);
    assert!(!depiq::from("test").is_prepared());
}

#[test]
fn rename_function_defaults_to_lowercase() {
    let _g = guard();
    let ds = depiq::insert("user").rows(greg());
    let (sql, _) = ds.to_sql().unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "user" ("firstname", "lastname") VALUES ('Greg', 'Farley')"#
    );
}

#[test]
fn custom_rename_function() {
    let _g = guard();
    depiq::set_column_rename_function(|name| name.to_uppercase());

    let ds = depiq::insert("user").rows(greg());
    let (sql, _) = ds.to_sql().unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "user" ("FIRSTNAME", "LASTNAME") VALUES ('Greg', 'Farley')"#
    );

    depiq::set_column_rename_function(|name| name.to_lowercase());
}

#[test]
fn rename_function_returning_empty_fails() {
    let _g = guard();
    depiq::set_column_rename_function(|_| String::new());

    let ds = depiq::insert("user").rows(greg());
    assert_eq!(ds.to_sql(), Err(Error::EmptyIdentifier));

    depiq::set_column_rename_function(|name| name.to_lowercase());
}

#[test]
fn ignore_untagged_fields_suppresses_them() {
    let _g = guard();
    depiq::set_ignore_untagged_fields(true);

    let ds = depiq::insert("users").rows(TaggedUser {
        id: 1,
        name: "Bob".into(),
    });
    let (sql, _) = ds.to_sql().unwrap();
    assert_eq!(sql, r#"INSERT INTO "users" ("name") VALUES ('Bob')"#);

    depiq::set_ignore_untagged_fields(false);

    let ds = depiq::insert("users").rows(TaggedUser {
        id: 1,
        name: "Bob".into(),
    });
    let (sql, _) = ds.to_sql().unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "users" ("name", "untagged") VALUES ('Bob', 'untagged')"#
    );
}

#[test]
fn skip_insert_and_update_flags() {
    let _g = guard();
    depiq::set_ignore_untagged_fields(true);

    let user = TaggedUser {
        id: 9,
        name: "Bob".into(),
    };
    let (sql, _) = depiq::insert("users").rows(user).to_sql().unwrap();
    assert_eq!(sql, r#"INSERT INTO "users" ("name") VALUES ('Bob')"#);

    let user = TaggedUser {
        id: 9,
        name: "Bob".into(),
    };
    let (sql, _) = depiq::update("users").set(user).to_sql().unwrap();
    assert_eq!(sql, r#"UPDATE "users" SET "id"=9,"name"='Bob'"#);

    depiq::set_ignore_untagged_fields(false);
}

#[test]
fn register_and_use_custom_dialect() {
    let _g = guard();
    let mut options = DialectOptions::postgres();
    options.quote = '"';
    depiq::register_dialect("custom", options);

    let ds = depiq::dialect("custom")
        .from("test")
        .prepared(true)
        .where_(col("a").eq(10));
    let (sql, args) = ds.to_sql().unwrap();
    assert_eq!(sql, r#"SELECT * FROM "test" WHERE ("a" = $1)"#);
    assert_eq!(args, vec![Value::Int(10)]);

    depiq::deregister_dialect("custom");
    // unknown dialects fall back to the default options
    let (sql, _) = depiq::dialect("custom").from("test").to_sql().unwrap();
    assert_eq!(sql, r#"SELECT * FROM "test""#);
}

#[test]
fn dialect_wrapper_binds_all_constructors() {
    let _g = guard();
    let d = depiq::dialect("mysql");
    assert_eq!(
        d.from("t").to_sql().unwrap().0,
        "SELECT * FROM `t`"
    );
    assert_eq!(
        d.select(depiq::lit("1")).to_sql().unwrap().0,
        "SELECT 1"
    );
    assert_eq!(
        d.insert("t")
            .rows(Record::new().set("a", 1))
            .to_sql()
            .unwrap()
            .0,
        "INSERT INTO `t` (`a`) VALUES (1)"
    );
    assert_eq!(
        d.update("t")
            .set(Record::new().set("a", 1))
            .to_sql()
            .unwrap()
            .0,
        "UPDATE `t` SET `a`=1"
    );
    assert_eq!(d.delete("t").to_sql().unwrap().0, "DELETE FROM `t`");
    assert_eq!(d.truncate("t").to_sql().unwrap().0, "TRUNCATE `t`");
}
