//! Configuration for the crudgen server and CLI

pub mod defaults;
mod settings;

pub use settings::ServerConfig;
