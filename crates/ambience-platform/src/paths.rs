use std::path::PathBuf;

use ambience_common::PlatformError;

pub(crate) const APP_NAME: &str = "ambience";

/// Returns the platform-specific data directory for ambience.
///
/// - macOS: `~/Library/Application Support/ambience`
/// - Linux: `$XDG_DATA_HOME/ambience` (defaults to `~/.local/share/ambience`)
/// - Windows: `%APPDATA%\ambience`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the path to the persisted preference file.
///
/// Located at `data_dir()/preferences.json`.
pub fn preferences_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("preferences.json"))
}
