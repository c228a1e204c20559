use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::{Srgb, Srgba, WithAlpha};
use sectorwheel::animation::{Easing, HomeAngle};
use sectorwheel::fling::DEFAULT_DECELERATION;
use sectorwheel::icon::IconName;
use sectorwheel::render::PieColors;
use sectorwheel::rotation::{DEFAULT_BORDER, FLING_VELOCITY_DOWNSCALE, RotationSettings};
use sectorwheel::{LayoutMode, SectorLayout};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// `#rrggbb` or `#rrggbbaa`, the leading `#` optional.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(pub Srgba<f64>);

impl FromStr for HexColor {
    type Err = palette::rgb::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let color = if hex.len() == 8 {
            Srgba::<u8>::from_str(hex)?.into_format::<f64, f64>()
        } else {
            Srgb::<u8>::from_str(hex)?
                .into_format::<f64>()
                .with_alpha(1.0)
        };
        Ok(Self(color))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.0.into_format::<u8, u8>().into_components();
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ItemConfig {
    pub icon: IconName,
    /// Drawn instead of the icon when the icon cannot be found.
    pub label: Option<String>,
}

impl ItemConfig {
    fn new(icon: &str, label: &str) -> Self {
        Self {
            icon: IconName::new(icon),
            label: Some(label.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub pie_color: HexColor,
    pub pie_selected_color: HexColor,
    /// Translucent disc painted behind the sectors.
    pub backdrop_color: HexColor,
    pub layout: LayoutMode,
    /// Overrides the layout's own offset between rotation and first sector.
    pub base_offset: Option<i32>,
    pub home: HomeAngle,
    pub border: f64,
    pub size: i32,
    pub drag_downscale: i32,
    pub scroll_gain: f64,
    pub fling_deceleration: f64,
    pub snap_duration_ms: u64,
    pub easing: Easing,
    pub start_hidden: bool,
    pub items: Vec<ItemConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pie_color: HexColor(Srgba::new(0.15, 0.15, 0.15, 0.85)),
            pie_selected_color: HexColor(Srgba::new(0.4, 0.4, 0.8, 0.9)),
            backdrop_color: HexColor(Srgba::new(0.4, 0.8, 1.0, 80.0 / 255.0)),
            layout: LayoutMode::default(),
            base_offset: None,
            home: HomeAngle::default(),
            border: DEFAULT_BORDER,
            size: 480,
            drag_downscale: FLING_VELOCITY_DOWNSCALE,
            scroll_gain: 1.0,
            fling_deceleration: DEFAULT_DECELERATION,
            snap_duration_ms: 1000,
            easing: Easing::default(),
            start_hidden: false,
            items: vec![
                ItemConfig::new("media-skip-backward", "Prev"),
                ItemConfig::new("media-seek-backward", "Rew"),
                ItemConfig::new("media-playback-pause", "Pause"),
                ItemConfig::new("media-playback-start", "Play"),
                ItemConfig::new("media-seek-forward", "FF"),
                ItemConfig::new("media-skip-forward", "Next"),
                ItemConfig::new("audio-input-microphone", "Speak"),
            ],
        }
    }
}

impl Config {
    pub fn rotation_settings(&self) -> RotationSettings {
        let mut layout = SectorLayout::new(self.layout);
        if let Some(offset) = self.base_offset {
            layout = layout.with_base_offset(offset);
        }

        let mut settings = RotationSettings {
            layout,
            drag_downscale: self.drag_downscale,
            scroll_gain: self.scroll_gain,
            border: self.border,
            ..RotationSettings::default()
        };
        settings.animator.home = self.home;
        settings.animator.easing = self.easing;
        settings.animator.duration = Duration::from_millis(self.snap_duration_ms);
        settings
    }

    pub fn pie_colors(&self) -> PieColors<Srgba<f64>> {
        PieColors::new(self.pie_color.0, self.pie_selected_color.0)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Config file has no sectors")]
    NoItems,
    #[error("fling_deceleration must be a positive number, got {0}")]
    BadDeceleration(f64),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "circlemenu", "circlemenu")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("CIRCLEMENU"))
        .build()?;

    validate(s.try_deserialize()?)
}

fn validate(config: Config) -> Result<Config, ConfigError> {
    if config.items.is_empty() {
        return Err(ConfigError::NoItems);
    }
    if !(config.fling_deceleration.is_finite() && config.fling_deceleration > 0.0) {
        return Err(ConfigError::BadDeceleration(config.fling_deceleration));
    }
    Ok(config)
}

/// Loads the user's config, writing the default one first if none exists.
/// Any failure falls back to the built-in defaults.
pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Could not write default config: {}", e),
        }
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", ConfigError::from(e));
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
