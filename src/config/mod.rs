#[cfg(feature = "cli")]
pub mod cli;
pub mod seed_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use seed_config::SeedConfig;
