//! CLI entry point for crudgen

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crudgen::codegen::{render_project, PRIMARY_KEY_COLUMN};
use crudgen::{
    ConnectionParams, DdlInspector, GenerationRequest, MySqlInspector, ProjectGenerator,
    ProjectStore, SchemaInspector, ServerConfig, TableName,
};

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(about = "Generate a single-table CRUD service from a MySQL table")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output directory for projects and archives (overrides config)
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Connection flags shared by `generate` and `inspect`
#[derive(Args)]
struct ConnectionArgs {
    #[arg(long, env = "CRUDGEN_DB_HOST")]
    db_host: String,

    #[arg(long, env = "CRUDGEN_DB_NAME")]
    db_name: String,

    #[arg(long, env = "CRUDGEN_DB_PORT", default_value_t = 3306)]
    db_port: u16,

    #[arg(long, env = "CRUDGEN_DB_USER")]
    db_user: String,

    #[arg(long, env = "CRUDGEN_DB_PASSWORD", hide_env_values = true)]
    db_password: String,
}

impl From<ConnectionArgs> for ConnectionParams {
    fn from(args: ConnectionArgs) -> Self {
        Self {
            host: args.db_host,
            database: args.db_name,
            port: args.db_port,
            user: args.db_user,
            password: args.db_password,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (POST /gerar, GET /download/{zip_name})
    Serve {
        /// Address to listen on (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Generate one project and print the archive path
    Generate {
        /// Table to scaffold
        #[arg(short, long)]
        table: String,

        /// Read the table from a DDL file instead of the live database
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Dry run - show what would be generated without writing files
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Show the columns a table resolves to
    Inspect {
        /// Table to inspect
        #[arg(short, long)]
        table: String,

        /// Read the table from a DDL file instead of the live database
        #[arg(short, long)]
        schema: Option<PathBuf>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = ServerConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_address = bind;
            }
            crudgen::server::serve(&config).await?;
        }
        Commands::Generate {
            table,
            schema,
            dry_run,
            connection,
        } => {
            config.validate()?;
            let request = GenerationRequest::new(connection.into(), TableName::parse(&table)?)?;

            if dry_run {
                let inspector = inspector_for(schema.as_ref(), &config)?;
                let columns = inspector
                    .table_columns(&request.connection, &request.table)
                    .await?;
                let project = render_project(&request.connection, &request.table, &columns)?;
                println!("Dry run mode - would generate:");
                for file in &project.files {
                    println!(
                        "  {}",
                        config.output_dir.join(&project.name).join(file.path).display()
                    );
                }
                println!(
                    "  {}",
                    config.output_dir.join(project.archive_name()).display()
                );
                return Ok(());
            }

            let published = match &schema {
                Some(schema_file) => {
                    crudgen::generate_from_schema_file(schema_file, &config.output_dir, &request)
                        .await?
                }
                None => {
                    let store = Arc::new(ProjectStore::new(&config.output_dir)?);
                    ProjectGenerator::new(inspector_for(None, &config)?, store)
                        .generate(&request)
                        .await?
                }
            };
            info!("Project generation completed successfully");
            println!("{}", published.archive_path.display());
        }
        Commands::Inspect {
            table,
            schema,
            connection,
        } => {
            let request = GenerationRequest::new(connection.into(), TableName::parse(&table)?)?;
            inspect_table(schema.as_ref(), &config, &request).await?;
        }
    }

    Ok(())
}

fn inspector_for(
    schema: Option<&PathBuf>,
    config: &ServerConfig,
) -> Result<Arc<dyn SchemaInspector>> {
    Ok(match schema {
        Some(path) => Arc::new(DdlInspector::from_file(path)?),
        None => Arc::new(MySqlInspector::new(config.connect_timeout())),
    })
}

async fn inspect_table(
    schema: Option<&PathBuf>,
    config: &ServerConfig,
    request: &GenerationRequest,
) -> Result<()> {
    println!("Table: {}", request.table);
    println!("  Columns:");

    if let Some(path) = schema {
        // The DDL carries types as well as names
        let metadata = DdlInspector::from_file(path)?.table(&request.table)?;
        for col in &metadata.columns {
            println!("    - {} {}{}", col.name, col.data_type, pk_marker(&col.name));
        }
        return Ok(());
    }

    let columns = inspector_for(None, config)?
        .table_columns(&request.connection, &request.table)
        .await?;
    for col in &columns {
        println!("    - {}{}", col, pk_marker(col));
    }
    Ok(())
}

fn pk_marker(column: &str) -> &'static str {
    if column == PRIMARY_KEY_COLUMN {
        " (primary key)"
    } else {
        ""
    }
}
