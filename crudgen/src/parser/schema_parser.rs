//! SQL schema parser using sqlparser-rs

use sqlparser::ast::{ObjectName, Statement};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use super::metadata::*;
use crate::error::Result;

/// Parse a SQL schema string into table metadata
pub fn parse_schema(sql: &str) -> Result<Vec<TableMetadata>> {
    let dialect = MySqlDialect {};
    let statements = Parser::parse_sql(&dialect, sql)?;

    let mut tables = Vec::new();

    for stmt in statements {
        if let Statement::CreateTable(create_table) = stmt {
            tables.push(extract_table_metadata(&create_table));
        }
    }

    Ok(tables)
}

/// Find a table by name (case-insensitive, schema qualifier ignored)
pub fn find_table(sql: &str, table_name: &str) -> Result<Option<TableMetadata>> {
    let tables = parse_schema(sql)?;
    Ok(tables
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(table_name)))
}

/// Extract table metadata from a CREATE TABLE statement
fn extract_table_metadata(create: &sqlparser::ast::CreateTable) -> TableMetadata {
    let columns = create
        .columns
        .iter()
        .map(|col_def| ColumnMetadata {
            name: col_def.name.value.clone(),
            data_type: format!("{}", col_def.data_type),
        })
        .collect();

    TableMetadata {
        name: extract_table_name(&create.name),
        columns,
    }
}

/// Extract a simple string from an ObjectName
fn extract_table_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}
