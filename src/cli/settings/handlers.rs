//! Setting handlers, one per configuration key.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::helpers::{format_bool, parse_bool, success_set};
use crate::cli::settings::SettingHandler;
use crate::core::config::Config;
use crate::ui::theme::Theme;
use crate::utils::url::{normalize_base_url, DEFAULT_BASE_URL};

/// Data-driven handler for boolean (on/off) settings.
pub struct BooleanHandler {
    key: &'static str,
    hint: &'static str,
    example: &'static str,
    get: fn(&Config) -> Option<bool>,
    set_field: fn(&mut Config, Option<bool>),
}

impl SettingHandler for BooleanHandler {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        if args.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: self.hint,
                example: self.example,
            });
        }

        let input = args.join(" ");
        let value = parse_bool(&input).ok_or(SettingError::InvalidBoolean(input))?;
        (self.set_field)(config, Some(value));
        Ok(success_set(self.key, format_bool(value)))
    }

    fn unset(&self, config: &mut Config) -> String {
        (self.set_field)(config, None);
        format!("✅ Unset {} (will use default: on)", self.key)
    }

    fn format(&self, config: &Config) -> String {
        match (self.get)(config) {
            Some(value) => format!("  {}: {}", self.key, format_bool(value)),
            None => format!("  {}: (unset, default: on)", self.key),
        }
    }
}

pub fn markdown_handler() -> BooleanHandler {
    BooleanHandler {
        key: "markdown",
        hint: "To set markdown rendering, specify on or off:",
        example: "copilot-chat set markdown off",
        get: |c| c.markdown,
        set_field: |c, v| c.markdown = v,
    }
}

pub fn syntax_handler() -> BooleanHandler {
    BooleanHandler {
        key: "syntax",
        hint: "To set syntax highlighting, specify on or off:",
        example: "copilot-chat set syntax off",
        get: |c| c.syntax,
        set_field: |c, v| c.syntax = v,
    }
}

pub fn sidebar_handler() -> BooleanHandler {
    BooleanHandler {
        key: "sidebar",
        hint: "To show or hide the conversation sidebar, specify on or off:",
        example: "copilot-chat set sidebar off",
        get: |c| c.sidebar,
        set_field: |c, v| c.sidebar = v,
    }
}

/// Handler for the `base_url` setting.
pub struct BaseUrlHandler;

impl SettingHandler for BaseUrlHandler {
    fn key(&self) -> &'static str {
        "base_url"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let input = args.join(" ");
        let url = normalize_base_url(&input);
        if url.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "To set the backend location, provide its base URL:",
                example: "copilot-chat set base_url http://localhost:5001",
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SettingError::InvalidUrl(input));
        }
        let message = success_set("base_url", &url);
        config.base_url = Some(url);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> String {
        config.base_url = None;
        format!("✅ Unset base_url (will use default: {DEFAULT_BASE_URL})")
    }

    fn format(&self, config: &Config) -> String {
        match &config.base_url {
            Some(_) => format!("  base_url: {}", config.base_url()),
            None => format!("  base_url: (unset, default: {DEFAULT_BASE_URL})"),
        }
    }
}

/// Handler for the `theme` setting.
pub struct ThemeHandler;

impl SettingHandler for ThemeHandler {
    fn key(&self) -> &'static str {
        "theme"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set the theme, specify its name:",
                example: "copilot-chat set theme light",
            });
        };
        let name = input.trim().to_ascii_lowercase();
        if !Theme::is_known(&name) {
            return Err(SettingError::UnknownTheme {
                input: input.clone(),
            });
        }
        let message = success_set("theme", &name);
        config.theme = Some(name);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> String {
        config.theme = None;
        "✅ Unset theme (will use default: dark)".to_string()
    }

    fn format(&self, config: &Config) -> String {
        match &config.theme {
            Some(theme) => format!("  theme: {theme}"),
            None => "  theme: (unset, default: dark)".to_string(),
        }
    }
}

/// Handler for the `log_file` setting.
pub struct LogFileHandler;

impl SettingHandler for LogFileHandler {
    fn key(&self) -> &'static str {
        "log_file"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let path = args.join(" ");
        if path.trim().is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "To write diagnostics to a file, provide its path:",
                example: "copilot-chat set log_file ~/copilot-chat.log",
            });
        }
        let message = success_set("log_file", &path);
        config.log_file = Some(path);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> String {
        config.log_file = None;
        "✅ Unset log_file (logging disabled)".to_string()
    }

    fn format(&self, config: &Config) -> String {
        match &config.log_file {
            Some(path) => format!("  log_file: {path}"),
            None => "  log_file: (unset)".to_string(),
        }
    }
}
