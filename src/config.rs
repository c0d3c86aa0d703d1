use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

/// Runtime configuration, read from `urdle.toml` next to the binary plus
/// `URDLE_…` environment overrides. Every section has a working default so
/// the game runs with no file at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub words: WordsConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("urdle").required(false))
            .add_source(config::Environment::with_prefix("URDLE").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordsConfig {
    path: Option<PathBuf>,
}

impl WordsConfig {
    /// Words file to play from; `None` means the bundled list.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    check_word_url: Option<Url>,
}

impl ApiConfig {
    /// Base URL of the dictionary backend. When unset, guesses are checked
    /// against the local words list instead.
    pub fn check_word_url(&self) -> Option<&Url> {
        self.check_word_url.as_ref()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_dir")]
    dir: PathBuf,
}

impl StoreConfig {
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".urdle")
}
