//! Configuration file handling for the budget tracker.
//!
//! The configuration file is stored at `$BUDGET_HOME/config.json` and says where the budget
//! snapshot is kept and under which key.

use crate::error::{ErrorType, IntoResult};
use crate::store::{FileStore, Persistence, BUDGET_KEY};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "budget";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA: &str = "data";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$BUDGET_HOME` and from there it loads `$BUDGET_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_dir: PathBuf,
}

impl Config {
    /// Creates the home directory and its data directory, and writes an initial `config.json`
    /// with default settings.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the budget home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        let data_dir = config_file.data_dir(&root);
        utils::make_dir(&data_dir).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
            data_dir,
        })
    }

    /// This will
    /// - validate that `budget_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the data directory exists
    /// - return the loaded configuration object
    pub async fn load(budget_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = budget_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Budget home is missing, run 'budget init' first")
            .pub_result(ErrorType::Config)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            return Err(anyhow::anyhow!(
                "The config file is missing '{}'",
                config_path.display()
            ))
            .pub_result(ErrorType::Config);
        }
        let config_file = ConfigFile::load(&config_path)
            .await
            .pub_result(ErrorType::Config)?;
        let data_dir = config_file.data_dir(&root);

        let config = Self {
            root,
            config_path,
            config_file,
            data_dir,
        };
        if !config.data_dir.is_dir() {
            return Err(anyhow::anyhow!(
                "The data directory is missing '{}'",
                config.data_dir.display()
            ))
            .pub_result(ErrorType::Config);
        }
        Ok(config)
    }

    /// Loads the configuration in `budget_home`, or creates it if there is no config file yet.
    pub async fn open(budget_home: impl Into<PathBuf>) -> Result<Self> {
        let home = budget_home.into();
        if home.join(CONFIG_JSON).is_file() {
            Self::load(home).await
        } else {
            Self::create(home).await.pub_result(ErrorType::Config)
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn storage_key(&self) -> &str {
        &self.config_file.storage_key
    }

    /// Creates the file-backed `Persistence` for the budget snapshot.
    pub async fn persistence(&self) -> Result<Persistence> {
        let store = FileStore::new(&self.data_dir)
            .await
            .pub_result(ErrorType::Persistence)?;
        Ok(Persistence::new(Box::new(store), self.storage_key()))
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "budget",
///   "config_version": 1,
///   "storage_key": "budget",
///   "data_dir": "data"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "budget"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The key that the budget snapshot is stored under
    #[serde(default = "default_storage_key")]
    storage_key: String,

    /// Where snapshots are stored (optional, relative to the home directory or absolute)
    /// Defaults to $BUDGET_HOME/data if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    BUDGET_KEY.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            storage_key: default_storage_key(),
            data_dir: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        if config.config_version > CONFIG_VERSION {
            bail!(
                "Config version {} is unsupported. Is a newer version of budget available?",
                config.config_version
            )
        }
        if config.storage_key.is_empty() {
            bail!("The storage_key in {} is empty", path.display())
        }

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    /// Returns the data directory, resolving a relative `data_dir` against `root`.
    fn data_dir(&self, root: &Path) -> PathBuf {
        match &self.data_dir {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => root.join(p),
            None => root.join(DATA),
        }
    }
}
