//! Configuration file loading for campus-portal
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PORTAL_*` environment variables (`PORTAL_CHAT__BASE_URL=...`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./portal.toml` or `./.portal.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/campus-portal/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAuthConfig, FileChatConfig, FileConfig, FileDevUserConfig,
};
pub use loader::ConfigLoader;
