//! Offline inspector backed by a MySQL DDL file

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use super::SchemaInspector;
use crate::codegen::TableName;
use crate::error::{CrudgenError, Result};
use crate::parser;
use crate::request::ConnectionParams;

/// Resolves tables from `CREATE TABLE` statements instead of a live server
///
/// Connection parameters are ignored; they only end up in the generated
/// `.env`.
#[derive(Debug, Clone)]
pub struct DdlInspector {
    sql: String,
}

impl DdlInspector {
    /// Create an inspector over DDL text
    ///
    /// The text is parsed once up front so syntax errors surface early.
    pub fn new(sql: impl Into<String>) -> Result<Self> {
        let sql = sql.into();
        parser::parse_schema(&sql)?;
        Ok(Self { sql })
    }

    /// Read a DDL file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading schema file {:?}", path);
        Self::new(std::fs::read_to_string(path)?)
    }

    /// Full table metadata, including column types
    pub fn table(&self, table: &TableName) -> Result<parser::TableMetadata> {
        parser::find_table(&self.sql, table.as_str())?
            .ok_or_else(|| CrudgenError::TableNotFound(table.to_string()))
    }
}

#[async_trait]
impl SchemaInspector for DdlInspector {
    async fn table_columns(
        &self,
        _connection: &ConnectionParams,
        table: &TableName,
    ) -> Result<Vec<String>> {
        Ok(self.table(table)?.column_names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> ConnectionParams {
        ConnectionParams {
            host: "h".into(),
            database: "d".into(),
            port: 3306,
            user: "u".into(),
            password: "p".into(),
        }
    }

    #[tokio::test]
    async fn test_columns_in_declaration_order() {
        let inspector =
            DdlInspector::new("CREATE TABLE users (id INT, name TEXT, email TEXT);").unwrap();
        let table = TableName::parse("USERS").unwrap();
        let columns = inspector.table_columns(&connection(), &table).await.unwrap();
        assert_eq!(columns, vec!["id", "name", "email"]);
    }

    #[tokio::test]
    async fn test_missing_table() {
        let inspector = DdlInspector::new("CREATE TABLE users (id INT);").unwrap();
        let table = TableName::parse("orders").unwrap();
        let result = inspector.table_columns(&connection(), &table).await;
        assert!(matches!(result, Err(CrudgenError::TableNotFound(_))));
    }

    #[test]
    fn test_invalid_ddl_fails_early() {
        assert!(matches!(
            DdlInspector::new("CREATE TABLE ("),
            Err(CrudgenError::ParseError(_))
        ));
    }
}
