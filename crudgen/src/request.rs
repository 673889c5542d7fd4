//! Generation request: connection parameters plus the table to scaffold

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::codegen::TableName;
use crate::error::{CrudgenError, Result};

/// Database connection parameters, also written to the generated `.env`
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub database: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

impl ConnectionParams {
    /// Reject values that cannot be written as a single `KEY=value` line
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("db_host", self.host.as_str()),
            ("db_name", self.database.as_str()),
            ("db_user", self.user.as_str()),
            ("db_password", self.password.as_str()),
        ];
        for (field, value) in values {
            if value.chars().any(char::is_control) {
                return Err(CrudgenError::Validation(format!(
                    "{} must not contain control characters",
                    field
                )));
            }
        }
        if self.port == 0 {
            return Err(CrudgenError::Validation("db_port must be in 1..=65535".into()));
        }
        Ok(())
    }
}

/// A validated request to generate one project
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub connection: ConnectionParams,
    pub table: TableName,
}

impl GenerationRequest {
    pub fn new(connection: ConnectionParams, table: TableName) -> Result<Self> {
        connection.validate()?;
        Ok(Self { connection, table })
    }
}

/// `db_port` accepts either a JSON number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(u64),
    Text(String),
}

/// A text field sent as either a JSON string or a JSON number
#[derive(Deserialize)]
#[serde(untagged)]
enum TextValue {
    Text(String),
    Number(serde_json::Number),
}

/// Numbers keep their JSON spelling, so `123456` becomes `"123456"`
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextValue>::deserialize(deserializer)?.map(|value| match value {
        TextValue::Text(text) => text,
        TextValue::Number(number) => number.to_string(),
    }))
}

/// Raw body of `POST /gerar`; every field is optional until validated
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationPayload {
    #[serde(default, deserialize_with = "string_or_number")]
    pub db_host: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub db_name: Option<String>,
    pub db_port: Option<PortValue>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub db_user: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub db_password: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub table_name: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl GenerationPayload {
    /// Check required fields, then normalize into a [`GenerationRequest`]
    ///
    /// Empty strings and a zero port count as missing.
    pub fn into_request(self) -> Result<GenerationRequest> {
        let host = present(self.db_host);
        let database = present(self.db_name);
        let user = present(self.db_user);
        let password = present(self.db_password);
        let table = present(self.table_name);
        let port = match self.db_port {
            Some(PortValue::Number(0)) | None => None,
            Some(PortValue::Text(t)) if t.trim().is_empty() => None,
            Some(port) => Some(port),
        };

        let mut missing = Vec::new();
        if host.is_none() {
            missing.push("db_host");
        }
        if database.is_none() {
            missing.push("db_name");
        }
        if port.is_none() {
            missing.push("db_port");
        }
        if user.is_none() {
            missing.push("db_user");
        }
        if password.is_none() {
            missing.push("db_password");
        }
        if table.is_none() {
            missing.push("table_name");
        }

        match (host, database, port, user, password, table) {
            (Some(host), Some(database), Some(port), Some(user), Some(password), Some(table)) => {
                let connection = ConnectionParams {
                    host,
                    database,
                    port: parse_port(port)?,
                    user,
                    password,
                };
                GenerationRequest::new(connection, TableName::parse(&table)?)
            }
            _ => Err(CrudgenError::MissingFields(missing)),
        }
    }
}

fn parse_port(value: PortValue) -> Result<u16> {
    let invalid = || CrudgenError::Validation("db_port must be in 1..=65535".into());
    let port = match value {
        PortValue::Number(n) => u16::try_from(n).map_err(|_| invalid())?,
        PortValue::Text(t) => t.trim().parse::<u16>().map_err(|_| invalid())?,
    };
    if port == 0 {
        return Err(invalid());
    }
    Ok(port)
}
