use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::url::{normalize_base_url, DEFAULT_BASE_URL};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend location; `/api/query` is appended to it
    pub base_url: Option<String>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
    /// Render bot replies as markdown
    pub markdown: Option<bool>,
    /// Syntax highlight fenced code blocks when markdown is enabled
    pub syntax: Option<bool>,
    /// Show the conversation sidebar
    pub sidebar: Option<bool>,
    /// Write tracing output to this file
    pub log_file: Option<String>,
}

impl Config {
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .map(normalize_base_url)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn theme_name(&self) -> &str {
        self.theme.as_deref().unwrap_or("dark")
    }

    pub fn markdown_enabled(&self) -> bool {
        self.markdown.unwrap_or(true)
    }

    pub fn syntax_enabled(&self) -> bool {
        self.syntax.unwrap_or(true)
    }

    pub fn sidebar_enabled(&self) -> bool {
        self.sidebar.unwrap_or(true)
    }
}

/// Get a user-friendly display string for a path, using `~` for the home
/// directory on Unix-like systems.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
