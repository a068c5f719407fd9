//! Infrastructure - configuration
//!
//! - `config` - Application configuration (TOML loading, defaults, env overrides)

pub mod config;

// Re-export commonly used types
pub use config::Config;
