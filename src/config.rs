use crate::cli::color_escape;
use crate::error::{FastfetchError, Result};
use crate::logo::Logo;
use dirs::config_dir;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

const SYSTEM_CONFIG: &str = "/usr/share/fastfetch/config.toml";

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
}

/// `[display]` table. Every key is optional; the command line wins over it.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub logo: Option<String>,
    pub color: Option<String>,
    pub separator: Option<i16>,
    pub show_errors: Option<bool>,
    pub ascii_path: Option<String>,
}

impl DisplayConfig {
    /// Key color escape sequence, if a color is configured
    pub fn color_escape(&self) -> Option<String> {
        // validated on load
        self.color.as_deref().and_then(|code| color_escape(code).ok())
    }

    pub fn ascii_path(&self) -> Option<&str> {
        self.ascii_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("fastfetch/config.toml"))
}

/// Load the user config, then the system-wide one; no file means defaults
pub fn load_config() -> Result<Config> {
    let path = user_config_path()
        .filter(|path| path.exists())
        .or_else(|| Some(PathBuf::from(SYSTEM_CONFIG)).filter(|path| path.exists()));

    match path {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    tracing::debug!(path = %path.display(), "loading config");
    let config_data = fs::read_to_string(path)?;
    let config: Config = toml::de::from_str(&config_data)
        .map_err(|err| FastfetchError::Config(format!("{}: {}", path.display(), err)))?;
    config.validate()?;
    Ok(config)
}

impl Config {
    fn validate(&self) -> Result<()> {
        if let Some(code) = &self.display.color {
            color_escape(code).map_err(|err| FastfetchError::Config(err.to_string()))?;
        }
        if let Some(name) = &self.display.logo {
            if Logo::find(name).is_none() {
                return Err(FastfetchError::Config(format!("unknown logo: {}", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn parses_display_table() {
        let (_dir, path) = write_config(
            "[display]\nlogo = \"gentoo\"\ncolor = \"1;35\"\nseparator = 2\nshow_errors = true\n",
        );
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.display.logo.as_deref(), Some("gentoo"));
        assert_eq!(config.display.color_escape().as_deref(), Some("\x1b[1;35m"));
        assert_eq!(config.display.separator, Some(2));
        assert_eq!(config.display.show_errors, Some(true));
    }

    #[test]
    fn empty_file_is_default() {
        let (_dir, path) = write_config("");
        assert_eq!(load_config_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn rejects_bad_values() {
        let (_dir, path) = write_config("[display]\ncolor = \"12345678\"\n");
        assert!(matches!(load_config_from(&path), Err(FastfetchError::Config(_))));

        let (_dir, path) = write_config("[display]\nlogo = \"beos\"\n");
        assert!(matches!(load_config_from(&path), Err(FastfetchError::Config(_))));

        let (_dir, path) = write_config("[display\n");
        assert!(matches!(load_config_from(&path), Err(FastfetchError::Config(_))));
    }

    #[test]
    fn sample_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/config.toml");
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.display.separator, Some(4));
        assert_eq!(config.display.logo, None);
    }

    #[test]
    fn blank_ascii_path_is_ignored() {
        let display = DisplayConfig {
            ascii_path: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(display.ascii_path(), None);
    }
}
