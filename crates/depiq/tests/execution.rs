//! Execution-layer tests against an in-memory mock driver.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use depiq::{
    col, do_nothing, BoxFuture, Database, Driver, Error, ExecResult, ExprOps, FromRow, Record,
    Result, Row, RowIter, TxDriver, TxOptions, Value,
};

#[derive(Clone, Default)]
struct MockDriver {
    result_sets: Arc<Mutex<VecDeque<(Vec<String>, Vec<Vec<Value>>)>>>,
    statements: Arc<Mutex<Vec<(String, Vec<Value>)>>>,
    committed: Arc<AtomicBool>,
    rolled_back: Arc<AtomicBool>,
}

impl MockDriver {
    fn new() -> Self {
        Self::default()
    }

    fn queue(&self, columns: &[&str], rows: Vec<Vec<Value>>) {
        self.result_sets.lock().unwrap().push_back((
            columns.iter().map(|c| c.to_string()).collect(),
            rows,
        ));
    }

    fn statements(&self) -> Vec<(String, Vec<Value>)> {
        self.statements.lock().unwrap().clone()
    }
}

struct MockRows {
    columns: Arc<Vec<String>>,
    rows: VecDeque<Vec<Value>>,
}

impl RowIter for MockRows {
    fn next(&mut self) -> BoxFuture<'_, Option<Result<Row>>> {
        let item = self
            .rows
            .pop_front()
            .map(|values| Ok(Row::new(self.columns.clone(), values)));
        Box::pin(async move { item })
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Driver for MockDriver {
    fn exec<'a>(&'a self, sql: &'a str, args: &'a [Value]) -> BoxFuture<'a, Result<ExecResult>> {
        self.statements
            .lock()
            .unwrap()
            .push((sql.to_string(), args.to_vec()));
        Box::pin(async move {
            Ok(ExecResult {
                rows_affected: 1,
                last_insert_id: Some(1),
            })
        })
    }

    fn query<'a>(
        &'a self,
        sql: &'a str,
        args: &'a [Value],
    ) -> BoxFuture<'a, Result<Box<dyn RowIter>>> {
        self.statements
            .lock()
            .unwrap()
            .push((sql.to_string(), args.to_vec()));
        let (columns, rows) = self
            .result_sets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        Box::pin(async move {
            Ok(Box::new(MockRows {
                columns: Arc::new(columns),
                rows: rows.into(),
            }) as Box<dyn RowIter>)
        })
    }

    fn begin<'a>(&'a self, _opts: TxOptions) -> BoxFuture<'a, Result<Box<dyn TxDriver>>> {
        let tx = self.clone();
        Box::pin(async move { Ok(Box::new(tx) as Box<dyn TxDriver>) })
    }
}

impl TxDriver for MockDriver {
    fn commit<'a>(&'a self) -> BoxFuture<'a, Result<()>> {
        self.committed.store(true, Ordering::SeqCst);
        Box::pin(async move { Ok(()) })
    }

    fn rollback<'a>(&'a self) -> BoxFuture<'a, Result<()>> {
        self.rolled_back.store(true, Ordering::SeqCst);
        Box::pin(async move { Ok(()) })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Item {
    address: String,
    name: String,
}

impl FromRow for Item {
    fn from_row(row: &Row) -> Result<Self> {
        let mut item = Item::default();
        for (i, column) in row.columns().iter().enumerate() {
            let value = row.get(i).cloned().unwrap_or(Value::Null);
            match column.as_str() {
                "address" => item.address = string_value(column, value)?,
                "name" => item.name = string_value(column, value)?,
                other => return Err(Error::UnmappedColumn(other.to_string())),
            }
        }
        Ok(item)
    }
}

fn string_value(column: &str, v: Value) -> Result<String> {
    match v {
        Value::Str(s) => Ok(s),
        other => Err(Error::decode(column, format!("expected text, got {other:?}"))),
    }
}

fn str_val(s: &str) -> Value {
    Value::Str(s.to_string())
}

#[tokio::test]
async fn scan_structs_reads_all_rows() {
    let driver = MockDriver::new();
    driver.queue(
        &["address", "name"],
        vec![
            vec![str_val("111 Test Addr"), str_val("Test1")],
            vec![str_val("211 Test Addr"), str_val("Test2")],
        ],
    );
    let db = Database::new("default", driver.clone());

    let mut items: Vec<Item> = Vec::new();
    db.from("items").scan_structs(&mut items).await.unwrap();
    assert_eq!(
        items,
        vec![
            Item {
                address: "111 Test Addr".into(),
                name: "Test1".into(),
            },
            Item {
                address: "211 Test Addr".into(),
                name: "Test2".into(),
            },
        ]
    );
    assert_eq!(
        driver.statements(),
        vec![(r#"SELECT * FROM "items""#.to_string(), Vec::new())]
    );
}

#[tokio::test]
async fn scan_structs_prepared_passes_args() {
    let driver = MockDriver::new();
    driver.queue(&["address", "name"], vec![]);
    let db = Database::new("default", driver.clone());

    let mut items: Vec<Item> = Vec::new();
    db.from("items")
        .prepared(true)
        .where_(col("address").eq("111 Test Addr"))
        .scan_structs(&mut items)
        .await
        .unwrap();
    assert!(items.is_empty());
    assert_eq!(
        driver.statements(),
        vec![(
            r#"SELECT * FROM "items" WHERE ("address" = ?)"#.to_string(),
            vec![str_val("111 Test Addr")],
        )]
    );
}

#[tokio::test]
async fn scan_structs_reports_unmapped_column() {
    let driver = MockDriver::new();
    driver.queue(&["test"], vec![vec![str_val("x")]]);
    let db = Database::new("default", driver);

    let mut items: Vec<Item> = Vec::new();
    let err = db
        .from("items")
        .select("test")
        .scan_structs(&mut items)
        .await
        .unwrap_err();
    assert_eq!(err, Error::UnmappedColumn("test".into()));
    assert_eq!(
        err.to_string(),
        "depiq: unable to find corresponding field to column \"test\" returned by query"
    );
}

#[tokio::test]
async fn unbound_dataset_reports_missing_query_factory() {
    let mut items: Vec<Item> = Vec::new();
    let err = depiq::from("items").scan_structs(&mut items).await.unwrap_err();
    assert_eq!(err, Error::QueryFactoryNotFound);
    assert_eq!(
        err.to_string(),
        "depiq: a query factory was not found for the dataset"
    );
}

#[tokio::test]
async fn scan_struct_limits_to_one_row() {
    let driver = MockDriver::new();
    driver.queue(
        &["address", "name"],
        vec![vec![str_val("111 Test Addr"), str_val("Test1")]],
    );
    let db = Database::new("default", driver.clone());

    let mut item = Item::default();
    let found = db.from("items").scan_struct(&mut item).await.unwrap();
    assert!(found);
    assert_eq!(item.address, "111 Test Addr");
    assert_eq!(
        driver.statements(),
        vec![(r#"SELECT * FROM "items" LIMIT 1"#.to_string(), Vec::new())]
    );

    let found = db.from("items").scan_struct(&mut item).await.unwrap();
    assert!(!found);
}

#[tokio::test]
async fn scan_vals_and_pluck() {
    let driver = MockDriver::new();
    driver.queue(
        &["id"],
        vec![
            vec![Value::Int(1)],
            vec![Value::Int(2)],
            vec![Value::Int(3)],
        ],
    );
    let db = Database::new("default", driver.clone());

    let mut ids: Vec<i64> = Vec::new();
    db.from("items").pluck(&mut ids, "id").await.unwrap();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(
        driver.statements(),
        vec![(r#"SELECT "id" FROM "items""#.to_string(), Vec::new())]
    );
}

#[tokio::test]
async fn scan_val_reads_first_column() {
    let driver = MockDriver::new();
    driver.queue(&["id"], vec![vec![Value::Int(7)]]);
    let db = Database::new("default", driver);

    let mut id = 0i64;
    let found = db.from("items").select("id").scan_val(&mut id).await.unwrap();
    assert!(found);
    assert_eq!(id, 7);
}

#[tokio::test]
async fn count_wraps_dataset() {
    let driver = MockDriver::new();
    driver.queue(&["count"], vec![vec![Value::Int(4)]]);
    let db = Database::new("default", driver.clone());

    let total = db.from("items").count().await.unwrap();
    assert_eq!(total, 4);
    assert_eq!(
        driver.statements(),
        vec![(
            r#"SELECT COUNT(*) AS "count" FROM (SELECT * FROM "items") AS "t1" LIMIT 1"#
                .to_string(),
            Vec::new(),
        )]
    );
}

#[tokio::test]
async fn insert_exec_reports_result() {
    let driver = MockDriver::new();
    let db = Database::new("default", driver.clone());

    let result = db
        .insert("items")
        .rows(Record::new().set("name", "Test1"))
        .on_conflict(do_nothing())
        .exec()
        .await
        .unwrap();
    assert_eq!(result.rows_affected, 1);
    assert_eq!(result.last_insert_id, Some(1));
    assert_eq!(
        driver.statements(),
        vec![(
            r#"INSERT INTO "items" ("name") VALUES ('Test1') ON CONFLICT DO NOTHING"#.to_string(),
            Vec::new(),
        )]
    );
}

#[tokio::test]
async fn delete_and_update_exec() {
    let driver = MockDriver::new();
    let db = Database::new("default", driver.clone());

    db.delete("items")
        .where_(col("id").eq(1))
        .exec()
        .await
        .unwrap();
    db.update("items")
        .set(Record::new().set("name", "Test2"))
        .where_(col("id").eq(1))
        .exec()
        .await
        .unwrap();
    let stmts = driver.statements();
    assert_eq!(stmts[0].0, r#"DELETE FROM "items" WHERE ("id" = 1)"#);
    assert_eq!(
        stmts[1].0,
        r#"UPDATE "items" SET "name"='Test2' WHERE ("id" = 1)"#
    );
}

#[tokio::test]
async fn render_errors_surface_before_driver_calls() {
    let driver = MockDriver::new();
    let db = Database::new("mysql", driver.clone());

    let err = db
        .insert("items")
        .rows(Record::new().set("name", "Test1"))
        .returning("id")
        .exec()
        .await
        .unwrap_err();
    assert_eq!(err, Error::ReturningNotSupported("mysql".into()));
    assert!(driver.statements().is_empty());
}

#[tokio::test]
async fn scanner_streams_rows() {
    let driver = MockDriver::new();
    driver.queue(
        &["name"],
        vec![vec![str_val("Test1")], vec![str_val("Test2")]],
    );
    let db = Database::new("default", driver);

    let mut rows = db.from("items").select("name").scanner().await.unwrap();
    assert_eq!(rows.columns(), ["name".to_string()].as_slice());
    let first = rows.next().await.unwrap().unwrap();
    assert_eq!(first.get_named("name"), Some(&str_val("Test1")));
    let second = rows.next().await.unwrap().unwrap();
    assert_eq!(second.get_named("name"), Some(&str_val("Test2")));
    assert!(rows.next().await.is_none());
}

#[tokio::test]
async fn with_tx_commits_on_ok() {
    let driver = MockDriver::new();
    let db = Database::new("default", driver.clone());

    db.with_tx(|tx| async move {
        tx.delete("items").where_(col("id").eq(1)).exec().await?;
        Ok(())
    })
    .await
    .unwrap();

    assert!(driver.committed.load(Ordering::SeqCst));
    assert!(!driver.rolled_back.load(Ordering::SeqCst));
    assert_eq!(
        driver.statements(),
        vec![(r#"DELETE FROM "items" WHERE ("id" = 1)"#.to_string(), Vec::new())]
    );
}

#[tokio::test]
async fn with_tx_rolls_back_on_err() {
    let driver = MockDriver::new();
    let db = Database::new("default", driver.clone());

    let err = db
        .with_tx(|_tx| async move { Err::<(), _>(Error::validation("boom")) })
        .await
        .unwrap_err();
    assert_eq!(err, Error::validation("boom"));
    assert!(!driver.committed.load(Ordering::SeqCst));
    assert!(driver.rolled_back.load(Ordering::SeqCst));
}

#[tokio::test]
async fn explicit_tx_lifecycle() {
    let driver = MockDriver::new();
    let db = Database::new("default", driver.clone());

    let tx = db.begin().await.unwrap();
    tx.insert("items")
        .rows(Record::new().set("name", "Test1"))
        .exec()
        .await
        .unwrap();
    tx.commit().await.unwrap();
    assert!(driver.committed.load(Ordering::SeqCst));
}
