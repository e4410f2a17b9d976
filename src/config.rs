use anyhow::{Context, Result, anyhow};
use dirs::home_dir;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_TOKENS: u32 = 2048;
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub model: String,
    pub base_url: String,
    pub output_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    openai_api_key: Option<String>,
    timeout_secs: Option<u64>,
    max_tokens: Option<u32>,
    model: Option<String>,
    base_url: Option<String>,
    output_dir: Option<String>,
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(".pytrainer/config");
        Ok(path)
    }

    /// Environment variables win over the config file, which wins over
    /// built-in defaults. The API key has no default.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let file_cfg = Self::read_file_config(&path)?;
        let FileConfig {
            openai_api_key: file_api_key,
            timeout_secs: file_timeout,
            max_tokens: file_max_tokens,
            model: file_model,
            base_url: file_base_url,
            output_dir: file_output_dir,
        } = file_cfg;

        let api_key = Self::env_string("OPENAI_API_KEY")?
            .or(file_api_key)
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "OpenAI API key not found. Set OPENAI_API_KEY or add it to {}",
                    path.display()
                )
            })?;

        let timeout_secs = Self::env_u64("PYTRAINER_TIMEOUT_SECS")?
            .or(file_timeout)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let max_tokens = Self::env_u32("PYTRAINER_MAX_TOKENS")?
            .or(file_max_tokens)
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let model = Self::env_string("PYTRAINER_MODEL")?
            .or(file_model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = Self::env_string("PYTRAINER_BASE_URL")?
            .or(file_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let output_dir = Self::env_string("PYTRAINER_OUTPUT_DIR")?
            .or(file_output_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Ok(Self {
            api_key,
            timeout_secs,
            max_tokens,
            model,
            base_url,
            output_dir,
        })
    }

    fn read_file_config(path: &Path) -> Result<FileConfig> {
        if !path.exists() {
            return Ok(FileConfig::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;
        let file = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;
        Ok(file)
    }

    fn env_string(key: &str) -> Result<Option<String>> {
        match env::var(key) {
            Ok(val) => Ok(Some(val)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
        }
    }

    fn env_u64(key: &str) -> Result<Option<u64>> {
        if let Some(value) = Self::env_string(key)? {
            let parsed = value
                .parse::<u64>()
                .with_context(|| format!("Failed to parse {key} as u64"))?;
            Ok(Some(parsed))
        } else {
            Ok(None)
        }
    }

    fn env_u32(key: &str) -> Result<Option<u32>> {
        if let Some(value) = Self::env_string(key)? {
            let parsed = value
                .parse::<u32>()
                .with_context(|| format!("Failed to parse {key} as u32"))?;
            Ok(Some(parsed))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_lock<'a>() -> std::sync::MutexGuard<'a, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    struct EnvGuard {
        saved: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new(vars: &[(&str, Option<&str>)]) -> Self {
            let saved = vars
                .iter()
                .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
                .collect::<Vec<_>>();
            for (key, value) in vars {
                match value {
                    Some(val) => unsafe { std::env::set_var(key, val) },
                    None => unsafe { std::env::remove_var(key) },
                }
            }
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.saved {
                match value {
                    Some(val) => unsafe { std::env::set_var(key, val) },
                    None => unsafe { std::env::remove_var(key) },
                }
            }
        }
    }

    #[test]
    fn load_from_env_only() {
        let _lock = env_lock();
        let temp_home = TempDir::new().unwrap();
        let home = temp_home.path().to_str().unwrap().to_string();

        let _env = EnvGuard::new(&[
            ("HOME", Some(home.as_str())),
            ("OPENAI_API_KEY", Some("env-key")),
            ("PYTRAINER_TIMEOUT_SECS", Some("45")),
            ("PYTRAINER_MAX_TOKENS", Some("4096")),
            ("PYTRAINER_MODEL", Some("env-model")),
            ("PYTRAINER_BASE_URL", Some("https://example.test/v1")),
            ("PYTRAINER_OUTPUT_DIR", Some("env-output")),
        ]);

        let config = Config::load().unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.timeout_secs, 45);
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.model, "env-model");
        assert_eq!(config.base_url, "https://example.test/v1");
        assert_eq!(config.output_dir, PathBuf::from("env-output"));
    }

    #[test]
    fn load_prefers_env_over_file() {
        let _lock = env_lock();
        let temp_home = TempDir::new().unwrap();
        let home = temp_home.path().to_str().unwrap().to_string();
        let config_dir = temp_home.path().join(".pytrainer");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config"),
            r#"{
                "openai_api_key": "file-key",
                "timeout_secs": 20,
                "max_tokens": 1024,
                "model": "file-model",
                "output_dir": "file-output"
            }"#,
        )
        .unwrap();

        let _env = EnvGuard::new(&[
            ("HOME", Some(home.as_str())),
            ("OPENAI_API_KEY", Some("env-key")),
            ("PYTRAINER_TIMEOUT_SECS", Some("40")),
            ("PYTRAINER_MAX_TOKENS", None),
            ("PYTRAINER_MODEL", None),
            ("PYTRAINER_BASE_URL", None),
            ("PYTRAINER_OUTPUT_DIR", None),
        ]);

        let config = Config::load().unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.timeout_secs, 40);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.model, "file-model");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output_dir, PathBuf::from("file-output"));
    }

    #[test]
    fn load_errors_without_api_key() {
        let _lock = env_lock();
        let temp_home = TempDir::new().unwrap();
        let home = temp_home.path().to_str().unwrap().to_string();

        let _env = EnvGuard::new(&[
            ("HOME", Some(home.as_str())),
            ("OPENAI_API_KEY", None),
            ("PYTRAINER_TIMEOUT_SECS", None),
            ("PYTRAINER_MAX_TOKENS", None),
            ("PYTRAINER_MODEL", None),
            ("PYTRAINER_BASE_URL", None),
            ("PYTRAINER_OUTPUT_DIR", None),
        ]);

        let err = Config::load().unwrap_err();
        assert!(err.to_string().contains("OpenAI API key not found"));
    }
}
