use std::path::Path;

use eyre::Result;
use serde::Serialize;

use crate::paths;

pub(crate) type FileSource = config::File<config::FileSourceFile, config::FileFormat>;

pub(crate) fn user_config_source() -> Result<FileSource> {
    Ok(file_source(paths::prefs_file()?))
}

pub(crate) fn file_source(path: &Path) -> FileSource {
    config::File::from(path)
        .format(crate::PREFS_FILE_FORMAT)
        .required(false)
}

/// Writes preferences to `path`, creating parent directories as needed.
pub fn save_to(path: &Path, prefs_data: &impl Serialize) -> Result<()> {
    if let Some(p) = path.parent() {
        std::fs::create_dir_all(p)?;
    }
    serde_norway::to_writer(std::fs::File::create(path)?, prefs_data)?;
    Ok(())
}

/// Moves the user preferences file out of the way so that it is not
/// overwritten.
pub fn backup_prefs_file() {
    if let Ok(path) = paths::prefs_file() {
        paths::move_to_backup_file(path);
    }
}
