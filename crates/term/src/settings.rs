use std::path::{Path, PathBuf};

use agrimind_widget::WidgetConfig;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};

pub const SETTINGS_DIRECTORY_NAME: &str = "agrimind";
pub const SETTINGS_FILE_NAME: &str = "widget.json";
/// Environment prefix, e.g. `AGRIMIND_BASE_URL=https://...`.
pub const ENV_PREFIX: &str = "AGRIMIND_";

/// Loaded widget configuration plus where it came from.
pub struct SettingsStore {
    config: WidgetConfig,
    config_path: PathBuf,
}

impl SettingsStore {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".agrimind"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn new(config_path: PathBuf) -> Self {
        let config = Self::load_layers(&config_path);
        Self {
            config,
            config_path,
        }
    }

    pub fn load() -> Self {
        Self::new(Self::default_config_path())
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Defaults, then the JSON file, then `AGRIMIND_*` variables.
    fn load_layers(path: &Path) -> WidgetConfig {
        let mut figment = Figment::from(Serialized::defaults(WidgetConfig::default()));
        if path.exists() {
            figment = figment.merge(Json::file(path));
        } else {
            tracing::info!("settings file not found at {:?}, using defaults", path);
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        match figment.extract::<WidgetConfig>() {
            Ok(config) => config.normalized(),
            Err(error) => {
                tracing::warn!(
                    "failed to parse settings from {:?}: {}. using defaults",
                    path,
                    error
                );
                WidgetConfig::default()
            }
        }
    }
}
