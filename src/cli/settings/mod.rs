//! Settings management for the `set`, `unset` and `config` commands.
//!
//! Each configuration key has a [`SettingHandler`]; the [`SettingRegistry`]
//! maps user-supplied keys to handlers and fixes the display order.

pub mod error;
pub mod handlers;
pub mod helpers;
pub mod registry;


pub use error::SettingError;
pub use registry::SettingRegistry;

use std::path::Path;

use crate::core::config::Config;
use helpers::canonical_key;

/// Trait for handling a configuration setting.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Apply `args` to `config`, returning the message to display.
    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    /// Clear the value so the default applies again.
    fn unset(&self, config: &mut Config) -> String;

    /// Format the current value for `copilot-chat config` output.
    fn format(&self, config: &Config) -> String;
}

fn lookup<'a>(
    registry: &'a SettingRegistry,
    key: &str,
) -> Result<&'a dyn SettingHandler, SettingError> {
    registry
        .get(&canonical_key(key))
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))
}

/// Set `key` in the config file at `path`.
pub fn set_at(path: &Path, key: &str, args: &[String]) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let handler = lookup(&registry, key)?;
    Config::mutate_at(path, |config| handler.set(args, config))
}

/// Unset `key` in the config file at `path`.
pub fn unset_at(path: &Path, key: &str) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let handler = lookup(&registry, key)?;
    Config::mutate_at(path, |config| Ok(handler.unset(config)))
}

pub fn set(key: &str, args: &[String]) -> Result<String, SettingError> {
    set_at(&Config::config_path()?, key, args)
}

pub fn unset(key: &str) -> Result<String, SettingError> {
    unset_at(&Config::config_path()?, key)
}

/// Lines describing every key of `config`, in display order.
pub fn format_all(config: &Config) -> Vec<String> {
    let registry = SettingRegistry::new();
    registry
        .keys_display_order()
        .iter()
        .filter_map(|key| registry.get(key))
        .map(|handler| handler.format(config))
        .collect()
}

pub fn print_all(config: &Config) {
    println!("Current configuration:");
    for line in format_all(config) {
        println!("{line}");
    }
}
