// [libs/infra/store/src/client.rs]
/*!
 * =================================================================
 * APARATO: STORE CLIENT (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CONEXIÓN AL SUSTRATO EMBEBIDO Y APLICACIÓN DE ESQUEMA
 *
 * Local-file libSQL only: the single embedded relational store the spec
 * names (C1) never talks to a remote Turso cluster. `connect` always builds
 * a local database at the given path; an in-memory path (":memory:") is
 * accepted for tests, anchored against a held connection so the schema
 * survives across pooled connections for the process lifetime.
 * =================================================================
 */

use crate::errors::StoreError;
use crate::schema::apply_schema;
use libsql::{Builder, Connection, Database};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct StoreClient {
    database: Arc<Database>,
    _memory_anchor: Option<Arc<Connection>>,
}

impl StoreClient {
    #[instrument]
    pub async fn connect(database_path: &str) -> Result<Self, StoreError> {
        if database_path.is_empty() {
            return Err(StoreError::ConnectionError("database path must not be empty".into()));
        }

        info!("opening embedded store at '{}'", database_path);
        let is_memory = database_path == ":memory:";

        let database = Builder::new_local(database_path)
            .build()
            .await
            .map_err(|error| StoreError::ConnectionError(error.to_string()))?;
        let database = Arc::new(database);

        let anchor = if is_memory {
            let connection = database.connect().map_err(|error| StoreError::ConnectionError(error.to_string()))?;
            apply_schema(&connection).await?;
            Some(Arc::new(connection))
        } else {
            let connection = database.connect().map_err(|error| StoreError::ConnectionError(error.to_string()))?;
            apply_schema(&connection).await?;
            None
        };

        Ok(Self { database, _memory_anchor: anchor })
    }

    pub fn connection(&self) -> Result<Connection, StoreError> {
        self.database.connect().map_err(|error| StoreError::ConnectionError(error.to_string()))
    }
}
