pub mod db_todo_driven_ports;

use crate::external_connections;
use crate::external_connections::ConnectionHandle;
use anyhow::Context;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgConnection, PgPool, Postgres};

/// Builds the database connection pool. Connections are opened lazily, so an unreachable
/// database surfaces as a failure on the first request that needs it rather than at startup.
pub fn connect_pool(db_url: &str, max_connections: u32) -> Result<PgPool, anyhow::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_lazy(db_url)
        .context("configuring the database connection pool")
}

/// Data structure which owns clients for connecting to external systems.
/// Allows business logic to be agnostic of the external systems it communicates with
/// so driven adapters can easily be swapped out for other implementations
#[derive(Clone)]
pub struct ExternalConnectivity {
    db: PgPool,
}

impl ExternalConnectivity {
    /// Accepts the set of clients used to connect to external systems and constructs
    /// an instance of ExternalConnectivity owning those clients
    pub fn new(db: PgPool) -> Self {
        ExternalConnectivity { db }
    }
}

/// A handle from ExternalConnectivity which holds one pooled database connection.
/// The connection goes back to the pool when the handle is dropped.
pub struct PoolConnectionHandle {
    active_connection: PoolConnection<Postgres>,
}

impl ConnectionHandle for PoolConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection {
        &mut self.active_connection
    }
}

impl external_connections::ExternalConnectivity for ExternalConnectivity {
    type DbHandle<'cxn_borrow> = PoolConnectionHandle;

    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error> {
        let handle = PoolConnectionHandle {
            active_connection: self
                .db
                .acquire()
                .await
                .context("acquiring a connection from the database pool")?,
        };

        Ok(handle)
    }
}

/// Utility DTO for retrieving the ID of a newly inserted record to PostgreSQL
#[derive(FromRow)]
struct NewId {
    id: i64,
}

