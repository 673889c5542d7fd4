//! Metadata structures for parsed SQL schema

use serde::{Deserialize, Serialize};

/// Metadata for a table declared in a DDL file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name, as declared
    pub name: String,

    /// Columns in declaration order
    pub columns: Vec<ColumnMetadata>,
}

/// Metadata for a column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name
    pub name: String,

    /// Data type as string (e.g., "BIGINT", "VARCHAR(255)")
    pub data_type: String,
}

impl TableMetadata {
    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}
