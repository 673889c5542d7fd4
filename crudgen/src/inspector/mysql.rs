//! Live MySQL inspector built on mysql_async

use std::time::Duration;

use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Conn, OptsBuilder};
use tracing::{debug, warn};

use super::SchemaInspector;
use crate::codegen::TableName;
use crate::config::defaults;
use crate::error::{CrudgenError, Result};
use crate::request::ConnectionParams;

/// Ordered column names of one table
const COLUMNS_QUERY: &str = "SELECT COLUMN_NAME FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? \
     ORDER BY ORDINAL_POSITION";

/// Introspects a table over a single, short-lived MySQL connection
///
/// No pooling: every call opens its own connection and closes it before
/// returning, whether the query succeeded or not.
#[derive(Debug, Clone)]
pub struct MySqlInspector {
    connect_timeout: Duration,
}

impl Default for MySqlInspector {
    fn default() -> Self {
        Self::new(Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS))
    }
}

impl MySqlInspector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    fn opts(connection: &ConnectionParams) -> OptsBuilder {
        OptsBuilder::default()
            .ip_or_hostname(connection.host.clone())
            .tcp_port(connection.port)
            .user(Some(connection.user.clone()))
            .pass(Some(connection.password.clone()))
            .db_name(Some(connection.database.clone()))
    }

    async fn connect(&self, connection: &ConnectionParams) -> Result<Conn> {
        match tokio::time::timeout(self.connect_timeout, Conn::new(Self::opts(connection))).await
        {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(CrudgenError::Connection(e.to_string())),
            Err(_) => Err(CrudgenError::Connection(format!(
                "timed out after {:?} connecting to {}:{}",
                self.connect_timeout, connection.host, connection.port
            ))),
        }
    }
}

#[async_trait]
impl SchemaInspector for MySqlInspector {
    async fn table_columns(
        &self,
        connection: &ConnectionParams,
        table: &TableName,
    ) -> Result<Vec<String>> {
        let mut conn = self.connect(connection).await?;
        debug!(
            "Connected to {}:{}/{}",
            connection.host, connection.port, connection.database
        );

        let result: std::result::Result<Vec<String>, mysql_async::Error> = conn
            .exec(
                COLUMNS_QUERY,
                (connection.database.clone(), table.as_str().to_string()),
            )
            .await;

        // Release before looking at the outcome
        if let Err(e) = conn.disconnect().await {
            warn!("Failed to close introspection connection: {}", e);
        }

        let columns = result.map_err(|e| CrudgenError::Connection(e.to_string()))?;
        if columns.is_empty() {
            return Err(CrudgenError::TableNotFound(format!(
                "{}.{}",
                connection.database, table
            )));
        }
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_a_connection_error() {
        let inspector = MySqlInspector::new(Duration::from_millis(500));
        let connection = ConnectionParams {
            host: "127.0.0.1".into(),
            database: "d".into(),
            // Reserved port, nothing listens there
            port: 1,
            user: "u".into(),
            password: "p".into(),
        };
        let table = TableName::parse("users").unwrap();
        let result = inspector.table_columns(&connection, &table).await;
        assert!(matches!(result, Err(CrudgenError::Connection(_))));
    }
}
