use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const DEFAULT_BINARIES_DIR: &str = "~/.local/bin";
pub const DEFAULT_ITEM_LIMIT: usize = 10;

const HOME_ENV: &str = "HOME";
const BINARIES_DIR_ENV: &str = "IDE_BINARIES_DIR";
const ITEM_LIMIT_ENV: &str = "IDE_ITEM_LIMIT";

/// Host platform, as far as configuration lookup is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
}

impl Platform {
    /// Anything that is not macOS uses the Linux layout.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Self::MacOs,
            _ => Self::Linux,
        }
    }

    pub fn config_root(self, home: &Path) -> PathBuf {
        match self {
            Self::MacOs => home.join("Library").join("Application Support"),
            Self::Linux => home.join(".config"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub home: PathBuf,
    pub binaries_dir: PathBuf,
    pub item_limit: usize,
    pub platform: Platform,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_pairs(unicode_pairs(std::env::vars_os()), Platform::current())
    }

    pub fn from_pairs<I, K, V>(pairs: I, platform: Platform) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env_map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        let home = env_map
            .get(HOME_ENV)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(ToOwned::to_owned)
            .ok_or(ConfigError::MissingHome)?;

        let binaries_dir = env_map
            .get(BINARIES_DIR_ENV)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BINARIES_DIR);

        let item_limit = parse_item_limit(env_map.get(ITEM_LIMIT_ENV).map(String::as_str))?;

        Ok(Self {
            binaries_dir: PathBuf::from(expand_home_tokens(binaries_dir, &home)),
            home: PathBuf::from(home),
            item_limit,
            platform,
        })
    }

    pub fn config_root(&self) -> PathBuf {
        self.platform.config_root(&self.home)
    }
}

/// Drops variables whose name or value is not valid UTF-8; none of them can
/// be a setting this crate reads.
fn unicode_pairs<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}

fn parse_item_limit(raw: Option<&str>) -> Result<usize, ConfigError> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(DEFAULT_ITEM_LIMIT);
    };

    match value.parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(ConfigError::InvalidItemLimit(value.to_string())),
    }
}

pub fn expand_home_tokens(raw: &str, home: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut expanded = trimmed.replace("$HOME", home);

    if expanded == "~" {
        expanded = home.to_string();
    } else if let Some(rest) = expanded.strip_prefix("~/") {
        expanded = format!("{}/{rest}", home.trim_end_matches('/'));
    }

    expanded
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing HOME")]
    MissingHome,
    #[error("invalid IDE_ITEM_LIMIT: {0} (expected a positive integer)")]
    InvalidItemLimit(String),
}
