//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/shapetree/shapetree.toml`
//! 3. Local config: `<project_dir>/.shapetree.toml`
//! 4. Environment variables: `SHAPETREE_*` prefix, `__` between section and key
//!    (e.g. `SHAPETREE_BENCH__CIRCLES=1000`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Scale benchmark settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BenchConfig {
    /// Number of circles drawn
    pub circles: usize,
    /// Number of squares drawn
    pub squares: usize,
    /// Radius of every circle
    pub radius: f64,
    /// Side length of every square
    pub side_length: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            circles: 500_000,
            squares: 500_000,
            radius: 5.0,
            side_length: 4.0,
        }
    }
}

/// Draw output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RenderConfig {
    /// Emit a "Drawing Composite:" line when entering each composite
    pub announce_composites: bool,
    /// Write draw output to this file instead of stdout
    pub output: Option<PathBuf>,
}

/// Raw bench config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawBenchConfig {
    pub circles: Option<usize>,
    pub squares: Option<usize>,
    pub radius: Option<f64>,
    pub side_length: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub announce_composites: Option<bool>,
    pub output: Option<PathBuf>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub bench: RawBenchConfig,
    pub render: RawRenderConfig,
}

/// Unified configuration for shapetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    pub bench: BenchConfig,
    pub render: RenderConfig,
}

/// Get the XDG config directory for shapetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "shapetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("shapetree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".shapetree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let bench = &overlay.bench;
        let render = &overlay.render;
        Self {
            bench: BenchConfig {
                circles: bench.circles.unwrap_or(self.bench.circles),
                squares: bench.squares.unwrap_or(self.bench.squares),
                radius: bench.radius.unwrap_or(self.bench.radius),
                side_length: bench.side_length.unwrap_or(self.bench.side_length),
            },
            render: RenderConfig {
                announce_composites: render
                    .announce_composites
                    .unwrap_or(self.render.announce_composites),
                output: render
                    .output
                    .clone()
                    .or_else(|| self.render.output.clone()),
            },
        }
    }

    fn expand_paths(&mut self) {
        if let Some(output) = &self.render.output {
            self.render.output = Some(expand_path(output));
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.shapetree.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply SHAPETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SHAPETREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<usize>("bench.circles") {
            settings.bench.circles = val;
        }
        if let Ok(val) = config.get::<usize>("bench.squares") {
            settings.bench.squares = val;
        }
        if let Ok(val) = config.get_float("bench.radius") {
            settings.bench.radius = val;
        }
        if let Ok(val) = config.get_float("bench.side_length") {
            settings.bench.side_length = val;
        }
        if let Ok(val) = config.get_bool("render.announce_composites") {
            settings.render.announce_composites = val;
        }
        if let Ok(val) = config.get_string("render.output") {
            settings.render.output = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# shapetree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/shapetree/shapetree.toml
#   Local:  <project_dir>/.shapetree.toml
#   Env:    SHAPETREE_<SECTION>__<KEY>, e.g. SHAPETREE_BENCH__CIRCLES=1000

[bench]
# Leaves drawn by `shapetree bench` (circles first, then squares)
# circles = 500000
# squares = 500000
# radius = 5.0
# side_length = 4.0

[render]
# Emit a "Drawing Composite:" line when entering each composite
# announce_composites = false

# Write draw output to a file instead of stdout (~ and $VAR are expanded)
# output = "~/shapes.txt"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_then_draws_one_million_leaves() {
        let settings = Settings::default();
        assert_eq!(settings.bench.circles, 500_000);
        assert_eq!(settings.bench.squares, 500_000);
        assert_eq!(settings.bench.radius, 5.0);
        assert!(!settings.render.announce_composites);
        assert!(settings.render.output.is_none());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay = RawSettings {
            bench: RawBenchConfig {
                circles: Some(10),
                ..Default::default()
            },
            render: RawRenderConfig {
                announce_composites: Some(true),
                output: None,
            },
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.bench.circles, 10);
        assert_eq!(result.bench.squares, 500_000);
        assert_eq!(result.bench.side_length, 4.0);
        assert!(result.render.announce_composites);
    }

    #[test]
    fn given_tilde_in_output_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings::default();
        settings.render.output = Some(PathBuf::from("~/shapes.txt"));

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let output = settings.render.output.unwrap();
        assert!(output.to_string_lossy().starts_with(&home));
        assert!(!output.to_string_lossy().contains('~'));
    }

    #[test]
    fn given_template_when_parsing_then_yields_empty_overlay() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.bench.circles.is_none());
        assert!(raw.render.output.is_none());
    }

    #[test]
    fn given_settings_when_serializing_then_roundtrips_through_raw() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&text).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }
}
