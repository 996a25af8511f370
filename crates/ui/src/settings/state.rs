use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use figment::{
    Figment,
    providers::{Format, Json, Serialized},
};
use gpui::*;
use gpui_component::{Theme, ThemeMode, ThemeRegistry};
use natter_state::{DEFAULT_AUTO_REPLY_DELAY, ReplyRouting, SessionConfig};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const SETTINGS_DIRECTORY_NAME: &str = "natter";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessengerSettings {
    #[serde(
        default = "default_theme_mode",
        serialize_with = "serialize_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
    #[serde(default)]
    pub theme_name: String,
    #[serde(default = "default_auto_reply_delay_ms")]
    pub auto_reply_delay_ms: u64,
    #[serde(default)]
    pub reply_routing: ReplyRouting,
}

impl Default for MessengerSettings {
    fn default() -> Self {
        Self {
            theme_mode: default_theme_mode(),
            theme_name: String::new(),
            auto_reply_delay_ms: default_auto_reply_delay_ms(),
            reply_routing: ReplyRouting::default(),
        }
    }
}

impl MessengerSettings {
    pub fn normalized(mut self) -> Self {
        self.theme_name = self.theme_name.trim().to_string();
        if self.auto_reply_delay_ms == 0 {
            self.auto_reply_delay_ms = default_auto_reply_delay_ms();
        }
        self
    }

    pub fn auto_reply_delay(&self) -> Duration {
        Duration::from_millis(self.auto_reply_delay_ms)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            routing: self.reply_routing,
            reply_delay: self.auto_reply_delay(),
        }
    }

    pub fn apply_theme(&self, window: Option<&mut Window>, cx: &mut App) {
        if let Some(theme_config) = ThemeRegistry::global(cx)
            .themes()
            .get(&SharedString::from(self.theme_name.clone()))
            .cloned()
        {
            let mode = theme_config.mode;
            let theme = Theme::global_mut(cx);
            if mode.is_dark() {
                theme.dark_theme = theme_config;
            } else {
                theme.light_theme = theme_config;
            }
            Theme::change(mode, window, cx);
            return;
        }

        Theme::change(self.theme_mode, window, cx);
    }
}

/// Read-only settings loaded once at startup.
///
/// The theme mode can be flipped for the running session; nothing is written back.
pub struct SettingsStore {
    settings: ArcSwap<MessengerSettings>,
}

impl SettingsStore {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".natter"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn new(config_path: impl AsRef<Path>) -> Self {
        let settings = Self::load_from_disk(config_path.as_ref());
        Self {
            settings: ArcSwap::from_pointee(settings),
        }
    }

    pub fn load() -> Self {
        Self::new(Self::default_config_path())
    }

    pub fn settings(&self) -> Arc<MessengerSettings> {
        self.settings.load_full()
    }

    /// Flips light/dark for this session and returns the new mode.
    pub fn toggle_theme_mode(&self) -> ThemeMode {
        let mut next = MessengerSettings::clone(&self.settings.load());
        next.theme_mode = if next.theme_mode.is_dark() {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        };
        // A preset pins its own mode, so drop it once the user picks one explicitly.
        next.theme_name.clear();
        let mode = next.theme_mode;
        self.settings.store(Arc::new(next));
        mode
    }

    fn load_from_disk(path: &Path) -> MessengerSettings {
        if !path.exists() {
            tracing::info!("settings file not found at {:?}, using defaults", path);
            return MessengerSettings::default();
        }

        let figment = Figment::from(Serialized::defaults(MessengerSettings::default()))
            .merge(Json::file(path));

        match figment.extract::<MessengerSettings>() {
            Ok(settings) => settings.normalized(),
            Err(error) => {
                tracing::warn!(
                    "failed to parse settings from {:?}: {}. using defaults",
                    path,
                    error
                );
                MessengerSettings::default()
            }
        }
    }
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Light
}

fn default_auto_reply_delay_ms() -> u64 {
    DEFAULT_AUTO_REPLY_DELAY.as_millis() as u64
}

fn serialize_theme_mode<S>(value: &ThemeMode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.name())
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> Result<ThemeMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(parse_theme_mode(&value))
}

fn parse_theme_mode(value: &str) -> ThemeMode {
    if value.trim().eq_ignore_ascii_case("dark") {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    }
}
