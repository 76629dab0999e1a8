//! End-to-end tests against in-memory drivers that emulate bind parameters.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rdo_client::{
    Config, Connection, Driver, Error, Param, Quote, QuoteError, Registry, ResultInfo, ResultSet, Row, SqlValue,
};
use rdo_sql::{BackslashQuoter, InterpolateError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Records every statement it is asked to run after interpolating it.
struct RecordingDriver {
    open: bool,
    refuse_open: bool,
    log: Arc<Mutex<Vec<String>>>,
}

impl Quote for RecordingDriver {
    fn quote(&self, value: &SqlValue) -> Result<String, QuoteError> {
        Ok(value.to_string().replace('\'', "''"))
    }
}

#[async_trait]
impl Driver for RecordingDriver {
    async fn open(&mut self) -> rdo_client::Result<bool> {
        self.open = !self.refuse_open;
        Ok(self.open)
    }

    fn is_open(&self) -> bool {
        self.open
    }

    async fn close(&mut self) -> rdo_client::Result<bool> {
        self.open = false;
        Ok(true)
    }

    async fn execute(&mut self, sql: &str, params: &[Param]) -> rdo_client::Result<ResultSet> {
        let sql = self.interpolate(sql, params)?;
        self.log.lock().push(sql.clone());

        if sql.starts_with("SELECT") {
            let rows = vec![
                Row::from_pairs([("id", Param::from(1i64)), ("name", Param::text("alice"))]),
                Row::from_pairs([("id", Param::from(2i64)), ("name", Param::Null)]),
            ];
            Ok(ResultSet::new(rows, ResultInfo::default()))
        } else if sql.starts_with("INSERT") {
            let info = ResultInfo {
                affected_rows: Some(1),
                insert_id: Some(42),
                ..ResultInfo::default()
            };
            Ok(ResultSet::new(Vec::new(), info))
        } else {
            Err(Error::driver(format_args!("syntax error near {sql:?}")))
        }
    }
}

/// Quotes with backslash escapes, as MySQL does.
struct BackslashDriver;

impl Quote for BackslashDriver {
    fn quote(&self, value: &SqlValue) -> Result<String, QuoteError> {
        BackslashQuoter.quote(value)
    }
}

#[async_trait]
impl Driver for BackslashDriver {
    async fn open(&mut self) -> rdo_client::Result<bool> {
        Ok(true)
    }

    fn is_open(&self) -> bool {
        true
    }

    async fn close(&mut self) -> rdo_client::Result<bool> {
        Ok(true)
    }

    async fn execute(&mut self, _sql: &str, _params: &[Param]) -> rdo_client::Result<ResultSet> {
        Ok(ResultSet::empty())
    }
}

fn registry_with_log() -> (Registry, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = Registry::new();

    let shared = Arc::clone(&log);
    registry
        .register("memory", move |config: &Config| {
            Ok(Box::new(RecordingDriver {
                open: false,
                refuse_open: config.get_option("refuse") == Some("true"),
                log: Arc::clone(&shared),
            }) as Box<dyn Driver>)
        })
        .unwrap();
    registry
        .register("mysql", |_: &Config| Ok(Box::new(BackslashDriver) as Box<dyn Driver>))
        .unwrap();

    (registry, log)
}

async fn connect() -> (Connection, Arc<Mutex<Vec<String>>>) {
    init_tracing();
    let (registry, log) = registry_with_log();
    let conn = registry.connect("memory://localhost/app").await.unwrap();
    (conn, log)
}

#[tokio::test]
async fn test_connect_opens_driver() {
    let (conn, _) = connect().await;
    assert!(conn.is_open());
    assert_eq!(conn.config().driver, "memory");
    assert_eq!(conn.config().database.as_deref(), Some("app"));
}

#[tokio::test]
async fn test_driver_names_are_case_insensitive() {
    let (registry, _) = registry_with_log();
    assert!(registry.is_registered("MEMORY"));
    assert_eq!(registry.names(), ["memory", "mysql"]);
    let conn = registry.connect("Memory://localhost").await.unwrap();
    assert!(conn.is_open());
}

#[tokio::test]
async fn test_open_failure_without_reason() {
    let (registry, _) = registry_with_log();
    let err = registry.connect("memory://localhost/app?refuse=true").await.unwrap_err();
    assert!(matches!(err, Error::OpenFailed { driver } if driver == "memory"));
}

#[tokio::test]
async fn test_unknown_driver() {
    let (registry, _) = registry_with_log();
    let err = registry.connect("oracle://localhost/app").await.unwrap_err();
    assert!(matches!(err, Error::UnknownDriver(name) if name == "oracle"));
}

#[tokio::test]
async fn test_execute_interpolates_bind_values() {
    let (mut conn, log) = connect().await;

    let name = "O'Brien";
    let result = conn
        .execute(
            "SELECT * FROM users WHERE name = ? AND age > ? AND deleted_at IS ? -- really?",
            &[&name, &21i32, &Param::Null],
        )
        .await
        .unwrap();

    assert_eq!(
        log.lock().as_slice(),
        ["SELECT * FROM users WHERE name = 'O''Brien' AND age > 21 AND deleted_at IS NULL -- really?"]
    );
    assert_eq!(result.count(), 2);
    assert_eq!(result.first().unwrap().get_by_name("name"), Some(&Param::text("alice")));
    assert!(result.rows()[1].get_by_name("name").unwrap().is_null());
}

#[tokio::test]
async fn test_insert_reports_id() {
    let (mut conn, log) = connect().await;

    let result = conn
        .execute("INSERT INTO t (a, b) VALUES (?, ?)", &[&1.5f64, &Some("x")])
        .await
        .unwrap();

    assert_eq!(log.lock().as_slice(), ["INSERT INTO t (a, b) VALUES (1.5, 'x')"]);
    assert_eq!(result.insert_id(), Some(42));
    assert_eq!(result.affected_rows(), Some(1));
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_select_insert_id_falls_back_to_id_column() {
    let (mut conn, _) = connect().await;
    let result = conn.execute("SELECT id FROM t", &[]).await.unwrap();
    assert_eq!(result.insert_id(), Some(1));
}

#[tokio::test]
async fn test_parameter_mismatch_is_reported() {
    let (mut conn, log) = connect().await;

    let err = conn.execute("SELECT ?, ?", &[&1i32]).await.unwrap_err();
    assert!(err.is_statement_error());
    assert_eq!(err.to_string(), "bind parameter mismatch (1 for 2) in query SELECT ?, ?");
    match err {
        Error::Interpolate(InterpolateError::ParamCountMismatch { params, markers, .. }) => {
            assert_eq!((params, markers), (1, 2));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(log.lock().is_empty());
}

#[tokio::test]
async fn test_driver_error_propagates() {
    let (mut conn, _) = connect().await;
    let err = conn.execute("VACUUM", &[]).await.unwrap_err();
    assert!(matches!(err, Error::Driver(ref m) if m.contains("VACUUM")));
    assert!(!err.is_statement_error());
}

#[tokio::test]
async fn test_prepared_statement_reuse() {
    let (mut conn, log) = connect().await;

    let stmt = conn.prepare("SELECT * FROM t WHERE id = ? AND note <> '?'");
    assert_eq!(stmt.param_count(), 1);

    stmt.execute(&mut conn, &[&1i64]).await.unwrap();
    stmt.execute_params(&mut conn, &[Param::from(2i64)]).await.unwrap();

    assert_eq!(
        log.lock().as_slice(),
        [
            "SELECT * FROM t WHERE id = 1 AND note <> '?'",
            "SELECT * FROM t WHERE id = 2 AND note <> '?'",
        ]
    );
}

#[tokio::test]
async fn test_execute_after_close() {
    let (mut conn, _) = connect().await;
    assert!(conn.close().await.unwrap());
    assert!(!conn.is_open());

    let err = conn.execute("SELECT 1", &[]).await.unwrap_err();
    assert!(matches!(err, Error::ConnectionClosed));

    assert!(conn.open().await.unwrap());
    assert!(conn.execute("SELECT 1", &[]).await.is_ok());
}

#[tokio::test]
async fn test_driver_quoting_is_used() {
    init_tracing();
    let (registry, _) = registry_with_log();
    let conn = registry.connect("mysql://root@localhost/shop").await.unwrap();

    assert_eq!(conn.quote(&SqlValue::from("it's")).unwrap(), "it\\'s");
    let sql = conn
        .interpolate("SELECT ? FROM t WHERE path = ?", &[Param::from(true), Param::text("C:\\tmp")])
        .unwrap();
    assert_eq!(sql, "SELECT 'true' FROM t WHERE path = 'C:\\\\tmp'");
}
