use liftlog_domain::DEFAULT_REST_DURATION;
use log::warn;

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

/// The stored settings, falling back to the defaults if they cannot be read.
pub async fn current_settings(service: &impl SettingsService) -> Settings {
    match service.get_settings().await {
        Ok(settings) => settings,
        Err(err) => {
            warn!("using default settings: {err}");
            Settings::default()
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Configured rest between sets in seconds.
    pub rest_duration: u32,
    pub haptics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rest_duration: DEFAULT_REST_DURATION,
            haptics: true,
        }
    }
}
