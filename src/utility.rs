//! Path helpers for the settings and log directory.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Name of the per-user settings folder
const SETTINGS_DIR_NAME: &str = ".uplift";

/// Resolve the settings folder.
///
/// A `.uplift` folder in the current working directory wins; otherwise the
/// folder lives in the home directory and is created on first use.
fn get_settings_dir(dir_name: &str) -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let local_path = cwd.join(dir_name);
    if local_path.exists() {
        return local_path;
    }

    let home_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let settings_path = home_path.join(dir_name);
    if !settings_path.exists() {
        let _ = fs::create_dir_all(&settings_path);
    }
    settings_path
}

/// Settings directory
pub static SETTINGS_DIR: LazyLock<PathBuf> = LazyLock::new(|| get_settings_dir(SETTINGS_DIR_NAME));

/// Get path for a file inside the settings directory
pub fn get_file_path(filename: &str) -> PathBuf {
    SETTINGS_DIR.join(filename)
}

/// Get path for a folder inside the settings directory, creating it if needed
pub fn get_folder_path(folder_name: &str) -> PathBuf {
    let folder_path = SETTINGS_DIR.join(folder_name);
    if !folder_path.exists() {
        let _ = fs::create_dir_all(&folder_path);
    }
    folder_path
}
