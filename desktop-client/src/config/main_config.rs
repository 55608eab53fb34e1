use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::puzzle2048::Puzzle2048Settings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "cats2048_config.yaml";

/// `cats2048_config.yaml` next to the executable, or in the working
/// directory when the executable path is unknown.
pub fn default_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    config_path: &Path,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(config_path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub puzzle2048: Puzzle2048Settings,
    /// Relative paths are resolved against the config file's directory.
    pub best_score_file: String,
    #[serde(default)]
    pub tile_images_dir: Option<String>,
}

impl Config {
    pub fn best_score_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.best_score_file)
    }

    pub fn tile_images_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.tile_images_dir.as_ref().map(|dir| config_dir.join(dir))
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.puzzle2048.validate()?;
        if self.best_score_file.trim().is_empty() {
            return Err("best_score_file must not be empty".to_string());
        }
        if let Some(dir) = &self.tile_images_dir
            && dir.trim().is_empty()
        {
            return Err("tile_images_dir must not be empty when set".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            puzzle2048: Puzzle2048Settings::default(),
            best_score_file: "cats2048_best.yaml".to_string(),
            tile_images_dir: Some("cats".to_string()),
        }
    }
}
