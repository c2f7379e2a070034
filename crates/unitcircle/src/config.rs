use crate::render::theme::{ColorError, Theme};
use config::ConfigBuilder;
use config::builder::DefaultState;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::path::{Path, PathBuf};
use thiserror::Error;
use trigo::curves::{CIRCLE_SEGMENTS, TrigFunction};
use trigo::{AngleRange, GeometryError, Radius, SegmentKind};

pub const ENV_PREFIX: &str = "UNITCIRCLE";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AngleConfig {
    pub initial: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for AngleConfig {
    fn default() -> Self {
        Self {
            initial: 1.0,
            min: -TAU,
            max: TAU,
            step: trigo::angle::DEFAULT_STEP,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CurveConfig {
    pub resolution: f64,
    pub functions: Vec<TrigFunction>,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            resolution: 0.1,
            functions: vec![TrigFunction::Sin, TrigFunction::Cos, TrigFunction::Tan],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CircleConfig {
    pub segments: usize,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            segments: CIRCLE_SEGMENTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 61,
            height: 31,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub radius: f64,
    pub angle: AngleConfig,
    pub curves: CurveConfig,
    pub circle: CircleConfig,
    pub canvas: CanvasConfig,
    pub style: HashMap<SegmentKind, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            radius: 100.0,
            angle: AngleConfig::default(),
            curves: CurveConfig::default(),
            circle: CircleConfig::default(),
            canvas: CanvasConfig::default(),
            style: HashMap::new(),
        }
    }
}

/// Checked session parameters. Only obtainable through [`Config::validate`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub radius: Radius,
    pub range: AngleRange,
    pub initial_angle: f64,
    pub curve_resolution: f64,
    pub curve_functions: Vec<TrigFunction>,
    pub circle_segments: usize,
    pub canvas: CanvasConfig,
    pub theme: Theme,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error("Canvas must be at least 3x3 cells, got {width}x{height}")]
    Canvas { width: usize, height: usize },
}

impl Config {
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let radius = Radius::new(self.radius)?;
        let range = AngleRange::new(self.angle.min, self.angle.max, self.angle.step)?;

        let resolution = self.curves.resolution;
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(GeometryError::InvalidResolution(resolution).into());
        }

        let CanvasConfig { width, height } = self.canvas;
        if width < 3 || height < 3 {
            return Err(ConfigError::Canvas { width, height });
        }

        let initial_angle = range
            .clamp(self.angle.initial)
            .unwrap_or(0.0_f64.clamp(range.min(), range.max()));
        if initial_angle != self.angle.initial {
            log::warn!(
                "Initial angle {} outside [{}, {}], using {}",
                self.angle.initial,
                range.min(),
                range.max(),
                initial_angle
            );
        }

        Ok(Settings {
            radius,
            range,
            initial_angle,
            curve_resolution: resolution,
            curve_functions: self.curves.functions.clone(),
            circle_segments: self.circle.segments,
            canvas: self.canvas,
            theme: self.theme()?,
        })
    }

    fn theme(&self) -> Result<Theme, ConfigError> {
        Ok(Theme::default().with_overrides(&self.style)?)
    }
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "unitcircle", "unitcircle").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    load_config_from(&config_path)
}

/// Loads `path` (absent is fine) with environment overrides on top.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    log::info!("Loading configuration from {}", path.display());
    let file = config::File::from(path.to_path_buf()).required(false);
    finish(config::Config::builder().add_source(file))
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Config, ConfigError> {
    let s = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
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

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> Config {
        let source = File::from_str(toml, FileFormat::Toml);
        finish(config::Config::builder().add_source(source)).unwrap()
    }

    #[test]
    fn test_bundled_config_matches_defaults() {
        let bundled = parse(DEFAULT_CONFIG).validate().unwrap();
        let defaults = Config::default().validate().unwrap();

        assert_eq!(bundled.radius, defaults.radius);
        assert_eq!(bundled.range, defaults.range);
        assert_eq!(bundled.initial_angle, 1.0);
        assert_eq!(bundled.curve_functions, defaults.curve_functions);
        assert_eq!(bundled.circle_segments, 64);
        assert_eq!(bundled.canvas, defaults.canvas);
        assert_eq!(bundled.theme, defaults.theme);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse("radius = 40.0\n[angle]\nstep = 0.1\n");
        assert_eq!(config.radius, 40.0);
        assert_eq!(config.angle.step, 0.1);
        assert_eq!(config.angle.initial, 1.0);
        assert_eq!(config.angle.max, TAU);
    }

    #[test]
    fn test_non_positive_radius_is_fatal() {
        for radius in ["0.0", "-5.0"] {
            let config = parse(&format!("radius = {radius}\n"));
            assert!(matches!(
                config.validate(),
                Err(ConfigError::Geometry(GeometryError::NonPositiveRadius(_)))
            ));
        }
    }

    #[test]
    fn test_initial_angle_is_clamped() {
        let settings = parse("[angle]\ninitial = 42.0\n").validate().unwrap();
        assert_eq!(settings.initial_angle, TAU);
    }

    #[test]
    fn test_style_keys_accept_aliases() {
        let config = parse("[style]\nhypotenuse = \"#123456\"\ncos = \"#abcdef\"\n");
        assert_eq!(config.style.get(&SegmentKind::Radial).unwrap(), "#123456");
        assert_eq!(config.style.get(&SegmentKind::Adjacent).unwrap(), "#abcdef");
    }

    #[test]
    fn test_bad_color_names_segment() {
        let config = parse("[style]\nopposite = \"zzz\"\n");
        match config.validate() {
            Err(ConfigError::Color(e)) => assert_eq!(e.segment, SegmentKind::Opposite),
            other => panic!("expected color error, got {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_range_and_canvas() {
        assert!(parse("[angle]\nmin = 1.0\nmax = 1.0\n").validate().is_err());
        assert!(parse("[angle]\nstep = 0.0\n").validate().is_err());
        assert!(parse("[curves]\nresolution = -1.0\n").validate().is_err());
        assert!(parse("[canvas]\nwidth = 2\n").validate().is_err());
    }

    #[test]
    fn test_function_list_deserialization() {
        let cases = vec![
            ("\"sin\"", TrigFunction::Sin),
            ("\"Cos\"", TrigFunction::Cos),
            ("\"TAN\"", TrigFunction::Tan),
        ];

        for (json, expected) in cases {
            let deserialized: TrigFunction = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }
}
