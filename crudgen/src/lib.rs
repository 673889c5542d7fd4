//! crudgen: Scaffold a single-table CRUD service from a MySQL table
//!
//! Given connection parameters and a table name, crudgen reads the table's
//! column list and emits a runnable Flask + SQLAlchemy service:
//!
//! - `.env` with the connection settings
//! - `app.py` with a model and list/get/create/update/delete routes
//! - `static/swagger.json` describing the five operations
//! - `requirements.txt` and a `README.md`
//!
//! The project is written to `Backend_<Table>/` under the configured output
//! directory and bundled as `Backend_<Table>.zip` next to it.
//!
//! # HTTP API
//!
//! ```bash
//! crudgen serve --bind 127.0.0.1:5000 --output-dir ./generated
//!
//! curl -X POST localhost:5000/gerar -H 'content-type: application/json' -d '{
//!   "db_host": "localhost", "db_name": "shop", "db_port": 3306,
//!   "db_user": "app", "db_password": "secret", "table_name": "users"
//! }'
//! # {"zip_name":"Backend_Users.zip"}
//!
//! curl -OJ localhost:5000/download/Backend_Users.zip
//! ```
//!
//! # Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crudgen::{GenerationPayload, MySqlInspector, ProjectGenerator, ProjectStore};
//!
//! let generator = ProjectGenerator::new(
//!     Arc::new(MySqlInspector::default()),
//!     Arc::new(ProjectStore::new("./generated")?),
//! );
//! let request = payload.into_request()?;
//! let published = generator.generate(&request).await?;
//! println!("{}", published.archive_path.display());
//! ```
//!
//! # Offline generation
//!
//! A DDL file can stand in for the live database:
//!
//! ```bash
//! crudgen generate --schema schema.sql --table users \
//!     --db-host localhost --db-name shop --db-user app --db-password secret
//! ```

pub mod archive;
pub mod codegen;
pub mod config;
pub mod error;
pub mod generator;
pub mod inspector;
pub mod parser;
pub mod request;
pub mod server;
pub mod store;

use std::path::Path;
use std::sync::Arc;

use tracing::info;

pub use codegen::{RenderedProject, TableName};
pub use config::ServerConfig;
pub use error::{CrudgenError, Result};
pub use generator::ProjectGenerator;
pub use inspector::{DdlInspector, MySqlInspector, SchemaInspector};
pub use request::{ConnectionParams, GenerationPayload, GenerationRequest};
pub use store::{ProjectStore, PublishedProject};

/// Generate one project from a DDL file instead of a live database
pub async fn generate_from_schema_file(
    schema_file: &Path,
    output_dir: &Path,
    request: &GenerationRequest,
) -> Result<PublishedProject> {
    info!("Parsing schema: {:?}", schema_file);
    let inspector = DdlInspector::from_file(schema_file)?;
    let store = ProjectStore::new(output_dir)?;
    ProjectGenerator::new(Arc::new(inspector), Arc::new(store))
        .generate(request)
        .await
}
