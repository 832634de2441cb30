use std::path::PathBuf;

/// Default config file: `~/.config/vmclone/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vmclone").join("config.toml"))
}
