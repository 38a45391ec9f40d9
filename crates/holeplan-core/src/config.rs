//! Project configuration.
//!
//! Loaded from `<project>/.holeplan/config.toml`. A missing file is not an
//! error: every section falls back to its defaults, and so does every field
//! missing from a partial file.
//!
//! ```toml
//! [milestones]
//! complexity_threshold = 25
//! max_holes = 4
//!
//! [roadmap]
//! show_suggestions = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Relative location of the project config file.
pub const PROJECT_CONFIG_PATH: &str = ".holeplan/config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub milestones: MilestoneConfig,
    #[serde(default)]
    pub roadmap: RoadmapConfig,
}

/// Bounds for grouping the implementation order into milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneConfig {
    /// A milestone is closed once its summed complexity reaches this value.
    #[serde(default = "default_complexity_threshold")]
    pub complexity_threshold: u32,
    /// A milestone is closed once it holds this many holes.
    #[serde(default = "default_max_holes")]
    pub max_holes: usize,
}

impl Default for MilestoneConfig {
    fn default() -> Self {
        Self {
            complexity_threshold: default_complexity_threshold(),
            max_holes: default_max_holes(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapConfig {
    /// Include the suggested implementation line under each hole.
    #[serde(default = "default_true")]
    pub show_suggestions: bool,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            show_suggestions: default_true(),
        }
    }
}

const fn default_complexity_threshold() -> u32 {
    25
}

const fn default_max_holes() -> usize {
    4
}

const fn default_true() -> bool {
    true
}

/// Load the project config under `project_root`, or defaults when absent.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig, ConfigError> {
    let path = project_root.join(PROJECT_CONFIG_PATH);
    if !path.exists() {
        debug!(path = %path.display(), "no project config, using defaults");
        return Ok(ProjectConfig::default());
    }
    load_config_file(&path)
}

/// Load a config file from an explicit path.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse config TOML text.
///
/// # Errors
///
/// Returns the TOML error for malformed input or mistyped fields.
pub fn parse_config(content: &str) -> Result<ProjectConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Resolve the effective config: an explicit path wins, then the project
/// file, then the user-level file under the platform config dir.
///
/// # Errors
///
/// Propagates [`ConfigError`] from whichever file is selected.
pub fn resolve_config(
    project_root: &Path,
    explicit: Option<&Path>,
) -> Result<ProjectConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }
    let project_path = project_root.join(PROJECT_CONFIG_PATH);
    if project_path.exists() {
        return load_config_file(&project_path);
    }
    match user_config_path() {
        Some(path) if path.exists() => load_config_file(&path),
        _ => Ok(ProjectConfig::default()),
    }
}

/// Location of the user-level config file, if the platform has one.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("holeplan/config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_bounds() {
        let config = ProjectConfig::default();
        assert_eq!(config.milestones.complexity_threshold, 25);
        assert_eq!(config.milestones.max_holes, 4);
        assert!(config.roadmap.show_suggestions);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse_config("[milestones]\nmax_holes = 2\n").expect("valid toml");
        assert_eq!(config.milestones.max_holes, 2);
        assert_eq!(config.milestones.complexity_threshold, 25);
        assert!(config.roadmap.show_suggestions);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(parse_config("").expect("empty toml"), ProjectConfig::default());
    }

    #[test]
    fn mistyped_field_is_rejected() {
        assert!(parse_config("[milestones]\nmax_holes = \"four\"\n").is_err());
    }

    #[test]
    fn missing_project_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_project_config(dir.path()).expect("defaults");
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn project_file_is_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join(".holeplan")).expect("mkdir");
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_PATH),
            "[roadmap]\nshow_suggestions = false\n",
        )
        .expect("write config");

        let config = load_project_config(dir.path()).expect("loads");
        assert!(!config.roadmap.show_suggestions);
    }

    #[test]
    fn broken_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[milestones").expect("write");

        let err = load_config_file(&path).expect_err("parse failure");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn explicit_path_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[milestones]\ncomplexity_threshold = 10\n").expect("write");

        let config = resolve_config(dir.path(), Some(&path)).expect("resolves");
        assert_eq!(config.milestones.complexity_threshold, 10);
    }
}
