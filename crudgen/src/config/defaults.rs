//! Default configuration values - single source of truth

/// Default address the HTTP API listens on
pub const BIND_ADDRESS: &str = "127.0.0.1:5000";

/// Default root directory for generated projects and archives
pub const OUTPUT_DIR: &str = "./generated";

/// Default timeout for opening a database connection, in seconds
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default config file base name, looked up in the working directory
pub const CONFIG_FILE: &str = "crudgen";

/// Prefix for environment variable overrides (`CRUDGEN_*`)
pub const ENV_PREFIX: &str = "CRUDGEN";
