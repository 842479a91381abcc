use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Theme options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    Ocean,
}

impl ThemeMode {
    /// Cycle order used by the theme key
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Ocean,
            ThemeMode::Ocean => ThemeMode::Dark,
        }
    }
}

/// Language options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum Language {
    #[default]
    Spanish,
    English,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::Spanish => Language::English,
            Language::English => Language::Spanish,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" | "spanish" | "español" => Ok(Language::Spanish),
            "en" | "english" => Ok(Language::English),
            other => Err(format!("unknown language '{other}' (expected es or en)")),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Dataset path or URL, `data.csv` in the working directory when unset
    pub data_source: Option<String>,
    /// Theme mode selection
    pub theme_mode: ThemeMode,
    /// Language selection
    pub language: Language,
    /// Show help overlay
    pub show_help: bool,
    /// Sidebar shows short labels only
    pub sidebar_collapsed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: None,
            theme_mode: ThemeMode::default(),
            language: Language::default(),
            show_help: false,
            sidebar_collapsed: false,
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if not found
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Ok(Self::load_from(&config_path))
    }

    /// Load from an explicit path. Unreadable or invalid files fall back to
    /// defaults, which are written back.
    pub fn load_from(path: &Path) -> Self {
        let parsed = fs::read_to_string(path)
            .ok()
            .and_then(|content| match serde_json::from_str(&content) {
                Ok(config) => Some(config),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "invalid config, using defaults");
                    None
                }
            });

        parsed.unwrap_or_else(|| {
            let default_config = Config::default();
            if let Err(err) = default_config.save_to(path) {
                tracing::warn!(path = %path.display(), %err, "could not write default config");
            }
            default_config
        })
    }

    /// Write configuration to `path`, creating the parent directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Application directory under the XDG config home (or ~/.config)
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
                .join(".config")
        };

        let app_config_dir = config_dir.join("tablero");
        fs::create_dir_all(&app_config_dir)?;

        Ok(app_config_dir)
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Set theme mode
    pub fn set_theme_mode(&mut self, theme_mode: ThemeMode) {
        self.theme_mode = theme_mode;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    /// Get theme display string
    pub fn theme_display(&self) -> &str {
        match self.theme_mode {
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
            ThemeMode::Ocean => "Ocean",
        }
    }
}
