//! User preferences for Cubeview.
//!
//! Preferences are stored as YAML. Values missing from the user's file are
//! taken from the built-in defaults in `default.yaml`.

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use cubeview_core::ColorScheme;
use eyre::WrapErr;
use serde::{Deserialize, Serialize};

mod animation;
mod geometry;
pub mod paths;
pub mod persist;
mod schema;

pub use animation::*;
pub use geometry::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    /// Built-in default preferences.
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str::<schema::AnyVersion>(DEFAULT_PREFS_STR)
        .map(schema::AnyVersion::into_current)
        .unwrap_or_else(|e| {
            log::error!("error loading default preferences: {e}");
            Preferences::default()
        });
}

/// All user preferences.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Move animation.
    pub animation: AnimationPreferences,
    /// Sticker colors.
    pub colors: ColorScheme,
    /// Cubie sizes.
    pub geometry: GeometryPreferences,
}
impl Preferences {
    /// Loads preferences from the user preferences file. If loading fails,
    /// then the existing file is backed up (if possible) and `backup` (or else
    /// the default preferences) is returned.
    pub fn load(backup: Option<Self>) -> Self {
        let user_source = match persist::user_config_source() {
            Ok(config_source) => Some(config_source),
            Err(e) => {
                log::warn!("error loading user preferences: {e}");
                None
            }
        };

        Self::build(user_source).unwrap_or_else(|e| {
            log::warn!("error loading preferences: {e}");
            persist::backup_prefs_file();
            backup.unwrap_or_else(|| DEFAULT_PREFS.clone())
        })
    }

    /// Loads preferences from a specific file, layered over the defaults. A
    /// missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> eyre::Result<Self> {
        Self::build(Some(persist::file_source(path)))
            .wrap_err_with(|| format!("error loading preferences from {}", path.display()))
    }

    /// Parses preferences from a YAML string, layered over the defaults.
    pub fn from_yaml_str(s: &str) -> eyre::Result<Self> {
        Ok(Self::build(Some(config::File::from_str(s, PREFS_FILE_FORMAT)))?)
    }

    fn build<S>(user_source: Option<S>) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let mut builder = config::Config::builder()
            .set_default("version", schema::CURRENT_VERSION)?
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));
        if let Some(source) = user_source {
            builder = builder.add_source(source);
        }
        let prefs = builder
            .build()?
            .try_deserialize::<schema::AnyVersion>()?
            .into_current();
        prefs.geometry.validate().map_err(config::ConfigError::Message)?;
        Ok(prefs)
    }

    /// Saves preferences to the user preferences file and returns its path.
    pub fn save(&self) -> eyre::Result<&'static Path> {
        let path = paths::prefs_file()?;
        self.save_to(path)?;
        Ok(path)
    }

    /// Saves preferences to a specific file.
    pub fn save_to(&self, path: &Path) -> eyre::Result<()> {
        persist::save_to(path, &self.to_serde())
            .wrap_err_with(|| format!("error saving preferences to {}", path.display()))
    }

    fn to_serde(&self) -> schema::AnyVersion {
        schema::AnyVersion::from(self.clone())
    }
}
