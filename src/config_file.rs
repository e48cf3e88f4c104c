use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Project-level config file name, searched upward from the working directory
pub const PROJECT_CONFIG_NAME: &str = ".fraglogrc";

/// Configuration file handler for fraglog
///
/// Only the root-level `defaults = <args>` key is understood; sections and
/// unknown keys are ignored so a file can carry notes for other tools.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub defaults: Option<String>,
    /// Where the defaults came from, for --show-config
    pub source: Option<PathBuf>,
}

impl ConfigFile {
    /// Find project-level .fraglogrc by walking up from the working directory
    pub fn find_project_config() -> Option<PathBuf> {
        let current = env::current_dir().ok()?;
        Self::find_project_config_from(&current)
    }

    /// Find .fraglogrc in `start` or any of its ancestors
    pub fn find_project_config_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// User config location: $XDG_CONFIG_HOME/fraglog/config.ini, falling back
    /// to ~/.config/fraglog/config.ini
    pub fn user_config_path() -> PathBuf {
        let xdg_config = env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                env::var("HOME")
                    .map(|h| PathBuf::from(h).join(".config"))
                    .unwrap_or_else(|_| PathBuf::from(".config"))
            });
        xdg_config.join("fraglog").join("config.ini")
    }

    /// Load configuration with precedence: project > user
    pub fn load() -> Result<Self> {
        let user_path = Self::user_config_path();
        let user_config = if user_path.is_file() {
            Self::load_from_path(&user_path)?
        } else {
            Self::default()
        };

        match Self::find_project_config() {
            Some(project_path) => {
                let project_config = Self::load_from_path(&project_path)?;
                Ok(Self::merge_configs(user_config, project_config))
            }
            None => Ok(user_config),
        }
    }

    /// Load configuration with optional custom config file path
    pub fn load_with_custom_path(custom_path: Option<&Path>) -> Result<Self> {
        match custom_path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config = Self::parse_ini_content(&content);
        if config.defaults.is_some() {
            config.source = Some(path.to_path_buf());
        }
        Ok(config)
    }

    fn parse_ini_content(content: &str) -> Self {
        let mut defaults = None;
        let mut in_section = false;

        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                in_section = true;
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                if !in_section && key.trim() == "defaults" {
                    defaults = Some(value.trim().to_string());
                }
            }
        }

        Self {
            defaults,
            source: None,
        }
    }

    /// Merge two configuration objects, with the second taking precedence
    fn merge_configs(base: Self, overlay: Self) -> Self {
        if overlay.defaults.is_some() {
            overlay
        } else {
            base
        }
    }

    /// Insert the configured defaults right after the program name, so any
    /// flag the user passes explicitly is parsed later and wins.
    pub fn process_args(&self, args: Vec<String>) -> Result<Vec<String>> {
        let defaults = match &self.defaults {
            Some(defaults) => defaults,
            None => return Ok(args),
        };

        let default_args = shell_words::split(defaults)
            .context("Invalid defaults: failed to parse arguments")?;

        let mut args = args.into_iter();
        let mut result: Vec<String> = args.next().into_iter().collect();
        result.extend(default_args);
        result.extend(args);
        Ok(result)
    }

    /// Lines appended to the --show-config output
    pub fn describe(&self) -> String {
        match (&self.source, &self.defaults) {
            (Some(path), Some(defaults)) => {
                format!("config file: {}\ndefaults: {}", path.display(), defaults)
            }
            _ => "config file: none".to_string(),
        }
    }
}

/// True when `--ignore-config` appears among the raw arguments
pub fn ignore_config_requested(args: &[String]) -> bool {
    args.iter().skip(1).any(|arg| arg == "--ignore-config")
}

/// Value of `--config-file PATH` / `--config-file=PATH` in the raw arguments
pub fn custom_config_path(args: &[String]) -> Option<PathBuf> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--config-file" {
            return iter.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config-file=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}
