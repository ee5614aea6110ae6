use std::path::{
    Path,
    PathBuf,
};

use color_eyre::eyre::eyre;
use directories::ProjectDirs;
use psat::Strictness;
use serde::{
    Deserialize,
    Serialize,
};

use crate::Error;

/// Settings read from `config.toml`. Command line flags take precedence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Annotation added to decoded frames if `--comment` isn't given.
    pub comment: String,

    pub strictness: Strictness,

    /// Archive directory used if `--archive` isn't given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        tracing::debug!(path = %path.as_ref().display(), "Loading config from file");
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn to_path(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        tracing::debug!(path = %path.as_ref().display(), "Writing config to file");
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct AppFiles {
    project_dirs: ProjectDirs,
}

impl AppFiles {
    pub fn new() -> Result<Self, Error> {
        let project_dirs = ProjectDirs::from("", "psat", "psat-cli")
            .ok_or_else(|| eyre!("Could not determine project directories"))?;
        let this = Self { project_dirs };

        std::fs::create_dir_all(this.config_dir())?;

        Ok(this)
    }

    fn config_dir(&self) -> &Path {
        self.project_dirs.config_dir()
    }

    /// Loads the config, writing the default one first if there is none yet.
    pub fn config(&self) -> Result<Config, Error> {
        load_or_create_config(self.config_dir().join("config.toml"))
    }
}

pub fn load_or_create_config(path: impl AsRef<Path>) -> Result<Config, Error> {
    let path = path.as_ref();

    if path.exists() {
        Config::from_path(path)
    }
    else {
        let config = Config::default();
        config.to_path(path)?;
        Ok(config)
    }
}
