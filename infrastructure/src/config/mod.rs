//! Configuration file loading for docent
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DOCENT_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./docent.toml` or `./.docent.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/docent/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAnthropicConfig, FileConfig, FileHistoryConfig, FileKnowledgeConfig, FileLoggingConfig,
    FileOpenAiConfig, FileOutputConfig, FileProvidersConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
