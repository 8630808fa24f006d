//! Configuration module.
//!
//! Settings resolve in four layers: built-in defaults, the TOML config
//! file, environment variables, then command-line flags.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config, validate,
    CliOverrides, ConfigError, ConfigFile, ResolvedConfig,
};
