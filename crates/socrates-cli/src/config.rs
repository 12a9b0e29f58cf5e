// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use socrates_app::DEFAULT_MAX_IMPORT_BYTES;
use socrates_llm::{DEFAULT_CHAT_MODEL, RequestHints};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

pub const APP_NAME: &str = "socrates";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub chat: Chat,
    #[serde(default)]
    pub context: RequestContext,
    #[serde(default)]
    pub import: Import,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            chat: Chat::default(),
            context: RequestContext::default(),
            import: Import::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub model: Option<String>,
}

impl Default for Chat {
    fn default() -> Self {
        Self {
            model: Some(DEFAULT_CHAT_MODEL.to_owned()),
        }
    }
}

/// Stand-in for request geolocation when running outside a browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub local_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Import {
    pub max_bytes: Option<i64>,
}

impl Default for Import {
    fn default() -> Self {
        Self {
            max_bytes: Some(DEFAULT_MAX_IMPORT_BYTES as i64),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("SOCRATES_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set SOCRATES_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [chat], [context], [import], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(model) = &self.chat.model
            && model.trim().is_empty()
        {
            bail!("chat.model in {} must not be empty", path.display());
        }

        if let Some(max_bytes) = self.import.max_bytes
            && max_bytes <= 0
        {
            bail!(
                "import.max_bytes in {} must be positive, got {}",
                path.display(),
                max_bytes
            );
        }

        if let Some(level) = &self.log.level {
            parse_level(level).with_context(|| format!("log.level in {}", path.display()))?;
        }

        Ok(())
    }

    pub fn chat_model(&self) -> &str {
        self.chat
            .model
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_CHAT_MODEL)
    }

    pub fn request_hints(&self) -> RequestHints {
        RequestHints {
            latitude: self.context.latitude.clone(),
            longitude: self.context.longitude.clone(),
            city: self.context.city.clone(),
            country: self.context.country.clone(),
            client_local_time: self.context.local_time.clone(),
        }
    }

    pub fn import_max_bytes(&self) -> u64 {
        self.import
            .max_bytes
            .and_then(|value| u64::try_from(value).ok())
            .unwrap_or(DEFAULT_MAX_IMPORT_BYTES)
    }

    pub fn log_level(&self) -> Result<Level> {
        parse_level(self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# socrates config\n# Place this file at: {}\n\nversion = 1\n\n[chat]\n# \"{}\" skips the document-tool guidance.\nmodel = \"{}\"\n\n[context]\n# Stands in for request geolocation.\ncity = \"Stockholm\"\ncountry = \"SE\"\n# local_time = \"2026-08-20 08:00\"\n\n[import]\nmax_bytes = {}\n\n[log]\n# error, warn, info, debug or trace\nlevel = \"{}\"\n",
            path.display(),
            socrates_llm::REASONING_CHAT_MODEL,
            DEFAULT_CHAT_MODEL,
            DEFAULT_MAX_IMPORT_BYTES,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_level(raw: &str) -> Result<Level> {
    raw.trim().parse::<Level>().map_err(|_| {
        anyhow!("invalid log level {raw:?}; use one of: error, warn, info, debug, trace")
    })
}

#[cfg(test)]
mod tests {
    use super::{Config, parse_level};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use tracing::Level;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.chat_model(), "chat-model");
        assert_eq!(config.import_max_bytes(), 1024 * 1024);
        assert_eq!(config.log_level()?, Level::WARN);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[chat]\nmodel = \"chat-model\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[chat], [context], [import], and [log]"));
        Ok(())
    }

    #[test]
    fn full_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[chat]\nmodel = \"chat-model-reasoning\"\n[context]\ncity = \"Malmö\"\ncountry = \"SE\"\nlocal_time = \"2026-09-01\"\n[import]\nmax_bytes = 2048\n[log]\nlevel = \"debug\"\n",
        )?;
        let config = Config::load(&path)?;
        assert_eq!(config.chat_model(), "chat-model-reasoning");
        assert_eq!(config.import_max_bytes(), 2048);
        assert_eq!(config.log_level()?, Level::DEBUG);

        let hints = config.request_hints();
        assert_eq!(hints.city.as_deref(), Some("Malmö"));
        assert_eq!(hints.client_local_time.as_deref(), Some("2026-09-01"));
        assert_eq!(hints.latitude, None);
        Ok(())
    }

    #[test]
    fn context_section_is_optional() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[chat]\nmodel = \"chat-model\"\n")?;
        let config = Config::load(&path)?;
        assert_eq!(config.context.city, None);
        assert_eq!(config.request_hints(), Default::default());
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn non_positive_import_limit_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[import]\nmax_bytes = 0\n")?;
        let error = Config::load(&path).expect_err("zero limit should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn blank_model_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[chat]\nmodel = \"  \"\n")?;
        let error = Config::load(&path).expect_err("blank model should fail");
        assert!(error.to_string().contains("chat.model"));
        Ok(())
    }

    #[test]
    fn invalid_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"loud\"\n")?;
        let error = Config::load(&path).expect_err("bad level should fail");
        assert!(format!("{error:#}").contains("invalid log level"));
        Ok(())
    }

    #[test]
    fn parse_level_accepts_any_case() -> Result<()> {
        assert_eq!(parse_level("INFO")?, Level::INFO);
        assert_eq!(parse_level(" trace ")?, Level::TRACE);
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("SOCRATES_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("SOCRATES_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("SOCRATES_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("socrates/config.toml"));
        Ok(())
    }

    #[test]
    fn example_config_round_trips() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, Config::example_config(&path))?;
        let config = Config::load(&path)?;
        assert_eq!(config.chat_model(), "chat-model");
        assert_eq!(config.request_hints().city.as_deref(), Some("Stockholm"));
        Ok(())
    }
}
