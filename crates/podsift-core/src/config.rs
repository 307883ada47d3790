//! Configuration loader and path helpers.
//!
//! Figment merges `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nesting, e.g. `APP_SEARCH__LIMIT=20`).

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::{DEFAULT_CAP_N_MATCHES, DEFAULT_DESCRIPTION_WEIGHT, DEFAULT_LIMIT, DEFAULT_TITLE_WEIGHT};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Load `config.toml` and the `RUST_ENV` overlay from `dir`.
    pub fn load_from(dir: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(dir, &env_name)
    }

    pub fn load_for_env(dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate_for_env(env_name)?;
        Ok(config)
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Like [`Config::get`], but a missing key yields `default`. A present key
    /// with the wrong type is still an error.
    pub fn get_or<T>(&self, key: &str, default: T) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if self.figment.find_value(key).is_err() {
            return Ok(default);
        }
        self.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.figment.find_value(key).is_ok()
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        if matches!(env, "prod" | "production") && !self.contains("data.catalog_dir") {
            return Err(Error::InvalidConfig("data.catalog_dir is required in production".to_string()).into());
        }
        SearchDefaults::from_config(self)?;
        Ok(())
    }
}

/// Fallback search parameters used when a caller leaves them unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDefaults {
    pub title_weight: i64,
    pub description_weight: i64,
    pub cap_n_matches: i64,
    pub limit: i64,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            title_weight: DEFAULT_TITLE_WEIGHT,
            description_weight: DEFAULT_DESCRIPTION_WEIGHT,
            cap_n_matches: DEFAULT_CAP_N_MATCHES,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchDefaults {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let d = Self::default();
        Ok(Self {
            title_weight: config.get_or("search.title_weight", d.title_weight)?,
            description_weight: config.get_or("search.description_weight", d.description_weight)?,
            cap_n_matches: config.get_or("search.cap_n_matches", d.cap_n_matches)?,
            limit: config.get_or("search.limit", d.limit)?,
        })
    }
}

/// Expand a user-provided path string: a leading `~` becomes the home
/// directory and `${VAR}`/`$VAR` are substituted. Not canonicalized.
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let with_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&with_env);
    PathBuf::from(expanded.as_ref())
}

/// Expand `p` and, if it is still relative, join it onto `base`.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
