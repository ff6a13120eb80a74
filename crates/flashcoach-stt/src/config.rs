//! Backend configuration and factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use flashcoach_core::traits::Transcriber;

use crate::stub::StubTranscriber;
use crate::whisper::WhisperTranscriber;

/// Configuration for a transcription backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Offline placeholder transcripts, no model required.
    Stub,
    /// whisper.cpp server over HTTP.
    Whisper {
        #[serde(default = "default_whisper_url")]
        base_url: String,
        #[serde(default)]
        language: Option<String>,
    },
}

fn default_whisper_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Stub
    }
}

impl BackendConfig {
    pub fn name(&self) -> &'static str {
        match self {
            BackendConfig::Stub => "stub",
            BackendConfig::Whisper { .. } => "whisper",
        }
    }
}

/// Top-level flashcoach configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcoachConfig {
    /// Transcription backend, selected once at startup.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Max concurrent transcriptions.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Max retries on transient backend errors.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Delay between retries in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Output directory for session reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_parallelism() -> usize {
    4
}
fn default_retries() -> u32 {
    2
}
fn default_retry_delay() -> u64 {
    1000
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./flashcoach-results")
}

impl Default for FlashcoachConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            parallelism: default_parallelism(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `flashcoach.toml` in the current directory
/// 2. `~/.config/flashcoach/config.toml`
///
/// Environment variable override: `FLASHCOACH_WHISPER_URL` switches
/// the backend to whisper at that URL.
pub fn load_config() -> Result<FlashcoachConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<FlashcoachConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("flashcoach.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<FlashcoachConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => FlashcoachConfig::default(),
    };

    // Env var override takes precedence over the file
    if let Ok(url) = std::env::var("FLASHCOACH_WHISPER_URL") {
        config.backend = BackendConfig::Whisper {
            base_url: url,
            language: None,
        };
    }

    // Resolve env vars in the backend config
    if let BackendConfig::Whisper { base_url, .. } = &mut config.backend {
        *base_url = resolve_env_vars(base_url);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("flashcoach"))
}

/// Create a transcriber instance from its configuration.
pub fn create_transcriber(config: &BackendConfig) -> Box<dyn Transcriber> {
    match config {
        BackendConfig::Stub => Box::new(StubTranscriber::new()),
        BackendConfig::Whisper { base_url, language } => {
            Box::new(WhisperTranscriber::new(base_url, language.clone()))
        }
    }
}
