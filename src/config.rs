use log::debug;
use serde::{ Deserialize, Serialize };
use std::fs;
use std::path::{ Path, PathBuf };
use thiserror::Error;

pub const DEFAULT_SCREENSHOT_DIR: &str = "/tmp/reader-tests";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("{0} environment variable not set")]
    MissingApiKey(String),
}

/// A newtype wrapping an API key string that masks its value in Debug output.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

/// Top-level configuration, loadable from YAML. Every field has a default.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct HarnessConfig {
    pub screenshots: ScreenshotConfig,
    pub composer: ComposerConfig,
    pub judge: JudgeConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Directory holding `ref_*` / `ios_*` screenshots and composed output
    pub directory: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ComposerConfig {
    /// Gap around and between panels, in pixels
    pub padding: u32,

    /// Height of the band reserved for labels above the images
    pub label_height: u32,

    pub background: [u8; 3],

    pub label_color: [u8; 3],

    /// Label font size in pixels
    pub font_size: f32,

    /// Candidate label fonts, tried in order
    pub font_paths: Vec<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct JudgeConfig {
    pub api_endpoint: String,

    pub model: String,

    pub max_tokens: usize,

    /// Value of the `anthropic-version` header
    pub api_version: String,

    /// Environment variable holding the credential
    pub api_key_env: String,

    /// Request timeout; none when absent
    pub timeout_secs: Option<u64>,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
        }
    }
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            padding: 20,
            label_height: 60,
            background: [30, 30, 30],
            label_color: [255, 255, 255],
            font_size: 32.0,
            font_paths: vec![
                PathBuf::from("/System/Library/Fonts/Helvetica.ttc"),
                PathBuf::from("/System/Library/Fonts/SFNSText.ttf"),
                PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf")
            ],
        }
    }
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 2000,
            api_version: "2023-06-01".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            timeout_secs: None,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: HarnessConfig = serde_yaml::from_str(&contents)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

impl JudgeConfig {
    /// Read the credential from the configured environment variable.
    /// Empty values count as missing.
    pub fn api_key(&self) -> Result<ApiKey, ConfigError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => {
                debug!("Using API key from {}", self.api_key_env);
                Ok(ApiKey::new(key))
            }
            _ => Err(ConfigError::MissingApiKey(self.api_key_env.clone())),
        }
    }
}
