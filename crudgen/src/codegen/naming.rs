//! Naming utilities for code generation

use std::fmt;

use crate::error::{CrudgenError, Result};

/// Prefix of every generated project (and archive) name
pub const PROJECT_PREFIX: &str = "Backend_";

/// Column treated as the auto-increment primary key
pub const PRIMARY_KEY_COLUMN: &str = "id";

/// Members the generated model already defines; a column with one of
/// these names would shadow them.
const RESERVED_MODEL_MEMBERS: &[&str] = &["metadata", "query", "query_class", "serialize"];

/// A lowercased, identifier-safe table name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Normalize (lowercase) and validate a raw table name
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim().to_lowercase();
        if !is_identifier(&name) {
            return Err(CrudgenError::Validation(format!(
                "table_name must be a plain identifier ([a-z_][a-z0-9_]*), got '{}'",
                raw
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Model class name: `users` -> `Users`, `order_items` -> `Order_items`
    pub fn class_name(&self) -> String {
        capitalize(&self.0)
    }

    /// Project directory name: `users` -> `Backend_Users`
    pub fn project_name(&self) -> String {
        format!("{}{}", PROJECT_PREFIX, self.class_name())
    }

    /// Archive file name: `users` -> `Backend_Users.zip`
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.project_name())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// ASCII identifier: a letter or underscore, then letters, digits or underscores
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Check that every column can be emitted as a model attribute
pub fn validate_columns(table: &TableName, columns: &[String]) -> Result<()> {
    for column in columns {
        if !is_identifier(column) {
            return Err(CrudgenError::UnsupportedColumn(format!(
                "column '{}' of table '{}' is not a valid identifier",
                column, table
            )));
        }
        if is_python_keyword(column) || RESERVED_MODEL_MEMBERS.contains(&column.as_str()) {
            return Err(CrudgenError::UnsupportedColumn(format!(
                "column '{}' of table '{}' collides with a reserved name",
                column, table
            )));
        }
    }
    Ok(())
}

/// Columns that become model fields (everything but the primary key)
pub fn field_columns(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter(|c| c.as_str() != PRIMARY_KEY_COLUMN)
        .cloned()
        .collect()
}

/// Check if a name is a Python reserved keyword
pub fn is_python_keyword(name: &str) -> bool {
    matches!(
        name,
        "False"
            | "None"
            | "True"
            | "and"
            | "as"
            | "assert"
            | "async"
            | "await"
            | "break"
            | "class"
            | "continue"
            | "def"
            | "del"
            | "elif"
            | "else"
            | "except"
            | "finally"
            | "for"
            | "from"
            | "global"
            | "if"
            | "import"
            | "in"
            | "is"
            | "lambda"
            | "nonlocal"
            | "not"
            | "or"
            | "pass"
            | "raise"
            | "return"
            | "try"
            | "while"
            | "with"
            | "yield"
    )
}
