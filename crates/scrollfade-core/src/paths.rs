//! Filesystem locations for settings and logs

use std::path::PathBuf;

use crate::constants::paths::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOGS_DIR_NAME};

/// `~/.scrollfade`, or `./.scrollfade` when no home directory is known
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

pub fn logs_dir() -> PathBuf {
    config_dir().join(LOGS_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_nest_under_config_dir() {
        let root = config_dir();
        assert!(root.ends_with(CONFIG_DIR_NAME));
        assert_eq!(config_file(), root.join("config.toml"));
        assert_eq!(logs_dir(), root.join("logs"));
    }
}
