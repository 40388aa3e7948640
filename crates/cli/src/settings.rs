use std::{
    fs, io,
    path::{Path, PathBuf},
};

use liftlog_domain as domain;
use liftlog_storage::CsvOptions;
use log::{LevelFilter, debug};
use serde::{Deserialize, Serialize};

use crate::logger::LevelFilterDef;

pub trait Repository {
    fn read_settings(&self) -> Result<Settings, Error>;
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
    #[error("similarity threshold must be greater than 0 and at most 1, got {0}")]
    InvalidThreshold(f64),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub similarity_threshold: f64,
    pub csv: CsvOptions,
    #[serde(with = "LevelFilterDef")]
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            similarity_threshold: domain::DEFAULT_SIMILARITY_THRESHOLD,
            csv: CsvOptions::default(),
            log_level: LevelFilter::Warn,
        }
    }
}

impl Settings {
    pub fn validate(self) -> Result<Self, Error> {
        if self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0 {
            Ok(self)
        } else {
            Err(Error::InvalidThreshold(self.similarity_threshold))
        }
    }
}

/// Settings stored as JSON. A missing file results in the default settings.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Repository for JsonFile {
    fn read_settings(&self) -> Result<Settings, Error> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str::<Settings>(&content)?.validate()?),
            Err(err) => match err.kind() {
                io::ErrorKind::NotFound => {
                    debug!("{} not found, using defaults", self.path.display());
                    Ok(Settings::default())
                }
                _ => Err(err.into()),
            },
        }
    }
}
