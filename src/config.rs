//! Run configuration
//!
//! Options come from two layers: an optional property file and the command
//! line. [`Options`] holds whatever either layer supplied; [`Options::resolve`]
//! checks that the two required paths are present and fills in defaults.

use std::path::{Path, PathBuf};

use crossterm::style::Color;

use crate::logging::{LogLevel, DEFAULT_LOG_FILE};
use crate::propfile::{PropertyError, PropertyFile};
use crate::sound::command::DEFAULT_PLAYER_COMMAND;
use crate::sound::AudioBackend;
use crate::terminal::{parse_color, Palette, PromptConfig};

/// Section holding the run settings
pub const SETTINGS_SECTION: &str = "Settings";
/// Optional section mapping speaker names to colours
pub const SPEAKERS_SECTION: &str = "Speakers";

/// Result artifact path reported at completion
pub const DEFAULT_OUTPUT_VIDEO: &str = "output_video.mp4";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Please provide either a configuration file or all required arguments (missing {0})")]
    MissingInputs(&'static str),

    #[error(transparent)]
    File(#[from] PropertyError),

    #[error("Configuration file {path} has no [{section}] section")]
    MissingSection { path: PathBuf, section: &'static str },

    #[error("Configuration file {path} is missing [{section}] {key}")]
    MissingKey {
        path: PathBuf,
        section: &'static str,
        key: &'static str,
    },

    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Options gathered from the config file and command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    // Required
    pub podcast_audio_path: Option<PathBuf>,
    pub transcript_csv_path: Option<PathBuf>,

    // Output
    pub log_file: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub output_video_path: Option<PathBuf>,

    // Display
    pub episode: Option<u32>,
    pub show_name: Option<String>,
    pub large_font: Option<bool>,
    pub speaker_colors: Vec<(String, Color)>,
    pub seed: Option<u64>,

    // Audio
    pub audio_backend: Option<AudioBackend>,
    pub player_command: Option<String>,
    pub volume: Option<f32>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub podcast_audio_path: PathBuf,
    pub transcript_csv_path: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LogLevel,
    pub output_video_path: PathBuf,
    pub prompt: PromptConfig,
    pub palette: Palette,
    pub large_font: bool,
    pub seed: Option<u64>,
    pub audio_backend: AudioBackend,
    pub player_command: String,
    /// Fixed playback volume for the rodio backend, 0.0 to 1.0
    pub volume: Option<f32>,
}

impl Options {
    /// Check required values and apply defaults
    pub fn resolve(self) -> Result<Settings, ConfigError> {
        let podcast_audio_path = self
            .podcast_audio_path
            .ok_or(ConfigError::MissingInputs("podcast_audio_path"))?;
        let transcript_csv_path = self
            .transcript_csv_path
            .ok_or(ConfigError::MissingInputs("transcript_csv_path"))?;

        let defaults = PromptConfig::default();
        let prompt = PromptConfig {
            episode: self.episode.unwrap_or(defaults.episode),
            show_name: self.show_name.unwrap_or(defaults.show_name),
        };

        let mut palette = Palette::default();
        for (speaker, color) in &self.speaker_colors {
            palette.insert(speaker, *color);
        }

        Ok(Settings {
            podcast_audio_path,
            transcript_csv_path,
            log_file: self
                .log_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            log_level: self.log_level.unwrap_or_default(),
            output_video_path: self
                .output_video_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_VIDEO)),
            prompt,
            palette,
            large_font: self.large_font.unwrap_or(true),
            seed: self.seed,
            audio_backend: self.audio_backend.unwrap_or_default(),
            player_command: self
                .player_command
                .unwrap_or_else(|| DEFAULT_PLAYER_COMMAND.to_string()),
            volume: self.volume,
        })
    }
}

/// Load options from a property file.
///
/// The `[Settings]` section and both required paths must be present. Other
/// settings are optional. Unknown colour names in `[Speakers]` are skipped.
pub fn load_config(path: &Path) -> Result<Options, ConfigError> {
    let file = PropertyFile::load(path)?;
    options_from_file(&file, path)
}

fn options_from_file(file: &PropertyFile, path: &Path) -> Result<Options, ConfigError> {
    let settings = file
        .section(SETTINGS_SECTION)
        .ok_or_else(|| ConfigError::MissingSection {
            path: path.to_path_buf(),
            section: SETTINGS_SECTION,
        })?;

    let required = |key: &'static str| {
        settings
            .get(key)
            .map(PathBuf::from)
            .ok_or_else(|| ConfigError::MissingKey {
                path: path.to_path_buf(),
                section: SETTINGS_SECTION,
                key,
            })
    };

    let mut options = Options {
        podcast_audio_path: Some(required("podcast_audio_path")?),
        transcript_csv_path: Some(required("transcript_csv_path")?),
        log_file: settings.get("log_file_path").map(PathBuf::from),
        output_video_path: settings.get("output_video_path").map(PathBuf::from),
        show_name: settings.get("show_name").map(str::to_string),
        ..Options::default()
    };

    if let Some(value) = settings.get("episode_number") {
        options.episode = Some(parse_episode(value)?);
    }

    if let Some(value) = settings.get("volume") {
        options.volume = Some(parse_volume(value)?);
    }

    if let Some(speakers) = file.section(SPEAKERS_SECTION) {
        for (speaker, name) in speakers.iter() {
            match parse_color(name) {
                Some(color) => options.speaker_colors.push((speaker.to_string(), color)),
                None => tracing::warn!("Ignoring unknown colour {:?} for speaker {}", name, speaker),
            }
        }
    }

    Ok(options)
}

/// Parse an episode number
pub fn parse_episode(value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
            key: "episode_number",
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a playback volume between 0.0 and 1.0
pub fn parse_volume(value: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: "volume",
        value: value.to_string(),
        reason,
    };

    let volume: f32 = value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
    if !(0.0..=1.0).contains(&volume) {
        return Err(invalid("expected a value between 0.0 and 1.0".to_string()));
    }
    Ok(volume)
}
