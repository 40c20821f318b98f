use axum::Router;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use lazy_static::lazy_static;
use rand::{Rng, thread_rng};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgConnection, PgPool};
use std::env;
use std::future::Future;
use std::sync::Arc;
use todo_service::config::CorsOrigins;
use todo_service::{SharedData, app_env, build_router, persistence};
use tokio::runtime::Runtime;
use tower::ServiceExt;

const SCHEMA: &str = include_str!("../../db/schema.sql");

lazy_static! {
    static ref TOKIO_RT: Runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Tokio runtime failed to initialize");
}

struct TestDatabase {
    base_url: String,
    db_name: String,
}

impl TestDatabase {
    async fn create(base_url: &str) -> Result<Self, sqlx::Error> {
        let schema_id: u32 = thread_rng().gen_range(10_000..99_999);
        let db_name = format!("test_db_{}", schema_id);
        let mut conn = PgConnection::connect(base_url).await?;

        sqlx::query(format!("CREATE DATABASE {}", db_name).as_str())
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        Ok(Self {
            base_url: String::from(base_url),
            db_name,
        })
    }

    fn url(&self) -> String {
        format!("{}/{}", self.base_url, self.db_name)
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let db_to_drop = self.db_name.clone();
        let conn_str = self.base_url.clone();

        TOKIO_RT.block_on(async move {
            let mut conn = match PgConnection::connect(conn_str.as_str()).await {
                Ok(cxn) => cxn,
                Err(conn_err) => {
                    println!(
                        "Failed to reconnect to database to drop test database {}, please remove it manually. Error: {}",
                        db_to_drop, conn_err
                    );
                    return;
                }
            };

            let drop_result = sqlx::query(format!("DROP DATABASE {} WITH (FORCE)", db_to_drop).as_str())
                .execute(&mut conn)
                .await;
            if let Err(db_err) = drop_result {
                println!(
                    "Failed to drop test database {}, please remove it manually. Error: {}",
                    db_to_drop, db_err
                );
            }
        });
    }
}

/// Creates a throwaway database holding an empty `todos` table, runs the test against a pool
/// connected to it, then drops the database.
///
/// Expects that the TEST_DB_URL environment variable is populated
pub fn prepare_db_and_test<F, R>(test_fn: F)
where
    F: FnOnce(PgPool) -> R,
    R: Future<Output = ()>,
{
    if dotenv::dotenv().is_err() {
        println!("Test is running without .env file.");
    }

    let base_url = env::var(app_env::TEST_DB_URL).expect(
        "You must provide the TEST_DB_URL environment variable as the base postgres connection string",
    );
    let test_db = match TOKIO_RT.block_on(TestDatabase::create(&base_url)) {
        Ok(tdb) => tdb,
        Err(db_err) => panic!("Failed to start test database: {}", db_err),
    };

    TOKIO_RT.block_on(async {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&test_db.url())
            .await
            .expect("Could not connect to the test database");
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .expect("Could not create the todos table");

        test_fn(pool.clone()).await;
        pool.close().await;
    });
}

/// Builds the complete application router on top of the given pool
pub fn router_for(pool: PgPool) -> Router {
    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(pool),
    });

    build_router(shared_data, &CorsOrigins::Any)
}

/// Sends a request through the router and returns its status and parsed JSON body
/// (null when the body is empty)
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router should always produce a response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read data from response body!");

    if bytes.is_empty() {
        return (status, serde_json::Value::Null);
    }
    let parsed = serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!("Response body was not JSON! Error: {}, Received body: {:?}", err, bytes)
    });

    (status, parsed)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}
