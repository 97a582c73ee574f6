//! Configuration file support for cmdtree-based tools.
//!
//! Loads optional `.cmdtree/config.toml` from a directory, or a file given
//! explicitly. Apply the result with [`CommandBuilder::config`](crate::CommandBuilder::config).

use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::types::ColorMode;

/// Root configuration structure
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CmdtreeConfig {
    /// Colour mode: `auto`, `always` or `never`
    pub color: Option<ColorMode>,
    pub shell: ShellConfig,
}

/// Shell display settings
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Constant prompt replacing the default `[<command>][<n>] $ `
    pub prompt: Option<String>,
    /// Constant banner replacing `Starting shell for command "<command>"`
    pub banner: Option<String>,
    /// Echo each line read back after the prompt
    pub echo_input: Option<bool>,
}

impl CmdtreeConfig {
    /// Load config from `.cmdtree/config.toml` in the given directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".cmdtree").join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse config");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CmdtreeConfig::default();
        assert_eq!(config.color, None);
        assert_eq!(config.shell, ShellConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        let config = CmdtreeConfig::load(temp.path());
        assert_eq!(config, CmdtreeConfig::default());
    }

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().expect("temp dir");
        let config_dir = temp.path().join(".cmdtree");
        std::fs::create_dir_all(&config_dir).expect("create .cmdtree");

        let config_path = config_dir.join("config.toml");
        let mut file = std::fs::File::create(&config_path).expect("create config");
        writeln!(
            file,
            r#"
color = "never"

[shell]
prompt = "cmd> "
banner = "welcome"
echo_input = false
"#
        )
        .expect("write config");

        let config = CmdtreeConfig::load(temp.path());
        assert_eq!(config.color, Some(ColorMode::Never));
        assert_eq!(config.shell.prompt.as_deref(), Some("cmd> "));
        assert_eq!(config.shell.banner.as_deref(), Some("welcome"));
        assert_eq!(config.shell.echo_input, Some(false));
    }

    #[test]
    fn test_load_invalid_config_falls_back() {
        let temp = TempDir::new().expect("temp dir");
        let config_path = temp.path().join("broken.toml");
        std::fs::write(&config_path, "color = \"sometimes\"\n").expect("write config");

        let config = CmdtreeConfig::load_from_path(&config_path);
        assert_eq!(config, CmdtreeConfig::default());
    }
}
