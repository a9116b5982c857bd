use std::{fmt, marker::PhantomData, path::PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use super::ConfigError;
use super::json_file::{read_json_file, write_json_file};
use crate::paths::{ensure_absolute, expand_tilde};

/// Loads and saves a typed config file at `<config_folder_path>/<file_name>`.
///
/// The folder may start with `~`, which is expanded against the home
/// directory when the path is resolved. Resolution happens on every call,
/// so a loader can be built before `HOME` is known.
pub struct ConfigLoader<T> {
    config_folder_path: String,
    file_name: String,
    allow_comments: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ConfigLoader<T> {
    #[must_use]
    pub fn new(config_folder_path: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            config_folder_path: config_folder_path.into(),
            file_name: file_name.into(),
            allow_comments: false,
            _marker: PhantomData,
        }
    }

    /// Accept `//` and `/* */` comments when loading.
    #[must_use]
    pub fn with_comments(mut self, allow_comments: bool) -> Self {
        self.allow_comments = allow_comments;
        self
    }

    /// The absolute path of the config file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::HomeMissing`] or [`ConfigError::PathNotAbsolute`].
    pub fn resolved_path(&self) -> Result<PathBuf, ConfigError> {
        let path = expand_tilde(&self.config_folder_path)?.join(&self.file_name);
        ensure_absolute(&path)?;
        Ok(path)
    }
}

impl<T: DeserializeOwned> ConfigLoader<T> {
    /// Load the config, or `Ok(None)` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Path resolution errors, IO errors other than "not found", and
    /// [`ConfigError::Parse`] for malformed content.
    pub fn load(&self) -> Result<Option<T>, ConfigError> {
        let path = self.resolved_path()?;
        read_json_file(&path, self.allow_comments)
    }
}

impl<T: Serialize> ConfigLoader<T> {
    /// Write `subject` to the resolved path.
    ///
    /// # Errors
    ///
    /// Path resolution, serialization and IO errors.
    pub fn save(&self, subject: &T) -> Result<(), ConfigError> {
        let path = self.resolved_path()?;
        write_json_file(subject, &path)
    }
}

impl<T> Clone for ConfigLoader<T> {
    fn clone(&self) -> Self {
        Self {
            config_folder_path: self.config_folder_path.clone(),
            file_name: self.file_name.clone(),
            allow_comments: self.allow_comments,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ConfigLoader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("config_folder_path", &self.config_folder_path)
            .field("file_name", &self.file_name)
            .field("allow_comments", &self.allow_comments)
            .finish_non_exhaustive()
    }
}
