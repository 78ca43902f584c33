//! Layered configuration: built-in defaults, then a TOML file named by
//! `ORGANPAIR_CONFIG`, then `ORGANPAIR_*` environment variables.
//!
//! ```toml
//! seed = 42
//! user_id = 7
//! accuracy = 0.8
//!
//! [game]
//! initial_time_secs = 90
//! penalty_wrong_match = 10
//! ```

use organpair_engine::settings::GameSettings;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "ORGANPAIR_CONFIG";
pub const SEED_ENV: &str = "ORGANPAIR_SEED";
pub const USER_ID_ENV: &str = "ORGANPAIR_USER_ID";
pub const INITIAL_TIME_ENV: &str = "ORGANPAIR_INITIAL_TIME";
pub const ACCURACY_ENV: &str = "ORGANPAIR_ACCURACY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    /// Owner of submitted score records
    pub user_id: u64,
    /// Hit rate of the simulated player used by `sim`
    pub accuracy: f64,
    pub game: GameSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub user_id: ValueSource,
    pub accuracy: ValueSource,
    pub game: ValueSource,
    pub initial_time_secs: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            user_id: ValueSource::Default,
            accuracy: ValueSource::Default,
            game: ValueSource::Default,
            initial_time_secs: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            user_id: 0,
            accuracy: 0.85,
            game: GameSettings::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Resolve configuration reading variables through `env`.
pub fn load_from<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();
    let var = |key: &str| env(key).filter(|v| !v.is_empty());

    if let Some(path) = var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.user_id {
            cfg.user_id = v;
            sources.user_id = ValueSource::File;
        }
        if let Some(v) = f.accuracy {
            cfg.accuracy = v;
            sources.accuracy = ValueSource::File;
        }
        if let Some(table) = f.game {
            if table.contains_key("initial_time_secs") {
                sources.initial_time_secs = ValueSource::File;
            }
            cfg.game = toml::Value::Table(table).try_into()?;
            sources.game = ValueSource::File;
        }
    }

    if let Some(seed) = var(SEED_ENV) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(user) = var(USER_ID_ENV) {
        cfg.user_id = user
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid user id: {}", user)))?;
        sources.user_id = ValueSource::Env;
    }
    if let Some(secs) = var(INITIAL_TIME_ENV) {
        cfg.game.initial_time_secs = secs
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid initial time: {}", secs)))?;
        sources.initial_time_secs = ValueSource::Env;
    }
    if let Some(acc) = var(ACCURACY_ENV) {
        cfg.accuracy = acc
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid accuracy: {}", acc)))?;
        sources.accuracy = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    user_id: Option<u64>,
    #[serde(default)]
    accuracy: Option<f64>,
    /// Kept as a table so explicitly set keys can be told apart from defaults
    #[serde(default)]
    game: Option<toml::Table>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&cfg.accuracy) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: accuracy must be within 0.0..=1.0".into(),
        ));
    }
    cfg.game
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}
