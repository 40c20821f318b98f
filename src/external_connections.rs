use sqlx::PgConnection;

/// A scoped handle to a live database connection. The connection is given back when the
/// handle is dropped.
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection;
}

/// Provides access to the external systems the application talks to, so driven adapters
/// don't need to know where their connections come from
pub trait ExternalConnectivity {
    type DbHandle<'cxn_borrow>: ConnectionHandle + Send
    where
        Self: 'cxn_borrow;

    /// Acquires a database connection which lives as long as the returned handle
    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}
