//! CLI Configuration

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clubhub_client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub default_format: Option<String>,
    pub strict_status: Option<bool>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::config_path(profile)?)
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Missing file means an empty config
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot find home directory"))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".clubhub").join(filename))
    }

    /// Flag or environment value first, then this file, then the default
    pub fn resolve_api_url(&self, from_cli: Option<String>) -> String {
        from_cli
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn resolve_token(&self, from_cli: Option<String>) -> Option<String> {
        from_cli.or_else(|| self.token.clone())
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "api_url" => self.api_url = Some(value),
            "token" => self.token = Some(value),
            "default_format" => self.default_format = Some(value),
            "strict_status" => {
                let flag = value
                    .parse()
                    .map_err(|_| anyhow!("strict_status must be true or false"))?;
                self.strict_status = Some(flag);
            }
            _ => return Err(anyhow!("unknown config key: {}", key)),
        }
        Ok(())
    }

    /// Display value for `key`; the token is masked
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(match key {
            "api_url" => self.api_url.clone(),
            "token" => self.token.as_deref().map(mask),
            "default_format" => self.default_format.clone(),
            "strict_status" => self.strict_status.map(|b| b.to_string()),
            _ => return Err(anyhow!("unknown config key: {}", key)),
        })
    }
}

pub const KEYS: [&str; 4] = ["api_url", "token", "default_format", "strict_status"];

/// Short secrets are hidden entirely; longer ones keep a 4 character prefix
pub fn mask(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "****".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("api_url", "https://api.clubhub.example".into()).unwrap();
        config.set("strict_status", "true".into()).unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.strict_status, Some(true));
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_resolution_order() {
        let config = Config {
            api_url: Some("https://from-file".into()),
            token: Some("file-token".into()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_url(Some("https://from-flag".into())), "https://from-flag");
        assert_eq!(config.resolve_api_url(None), "https://from-file");
        assert_eq!(Config::default().resolve_api_url(None), DEFAULT_BASE_URL);
        assert_eq!(config.resolve_token(None), Some("file-token".into()));
        assert_eq!(Config::default().resolve_token(None), None);
    }

    #[test]
    fn test_token_is_masked() {
        let mut config = Config::default();
        config.set("token", "abcdefghij".into()).unwrap();
        assert_eq!(config.get("token").unwrap(), Some("abcd****".into()));
        assert_eq!(mask("éééééééééé"), "éééé****");
    }

    #[test]
    fn test_short_token_is_fully_hidden() {
        assert_eq!(mask("abcd"), "****");
        assert_eq!(mask("abcdefgh"), "****");
        assert_eq!(mask(""), "****");
        assert_eq!(mask("abcdefghi"), "abcd****");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let mut config = Config::default();
        assert!(config.set("colour", "blue".into()).is_err());
        assert!(config.get("colour").is_err());
        assert!(config.set("strict_status", "maybe".into()).is_err());
    }
}
