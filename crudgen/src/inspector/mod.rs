//! Schema inspection: resolve a table and list its columns in order

mod ddl;
mod mysql;

pub use ddl::DdlInspector;
pub use mysql::MySqlInspector;

use async_trait::async_trait;

use crate::codegen::TableName;
use crate::error::Result;
use crate::request::ConnectionParams;

/// Source of a table's ordered column names
///
/// Implementations fail with [`CrudgenError::Connection`] when the source
/// cannot be reached and [`CrudgenError::TableNotFound`] when the table
/// does not resolve.
///
/// [`CrudgenError::Connection`]: crate::error::CrudgenError::Connection
/// [`CrudgenError::TableNotFound`]: crate::error::CrudgenError::TableNotFound
#[async_trait]
pub trait SchemaInspector: Send + Sync {
    /// Column names of `table`, in the table's natural order
    async fn table_columns(
        &self,
        connection: &ConnectionParams,
        table: &TableName,
    ) -> Result<Vec<String>>;
}
