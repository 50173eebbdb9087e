//! Client settings loaded from a TOML file.
//!
//! Every section falls back to defaults, so an empty file is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub ghost: GhostConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Unset means requests may hang forever, matching the browser client.
    pub timeout_ms: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedbackConfig {
    pub reward: i32,
    pub ghost_hit_slop: f64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            reward: 1,
            ghost_hit_slop: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PredictionOrdering {
    /// Whichever response arrives last owns the overlay.
    #[default]
    LastResolved,
    /// Responses to requests older than the one on screen are dropped.
    DiscardStale,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GhostConfig {
    pub room_size: f64,
    pub path_radius: f64,
    pub stroke_color: String,
    pub fill_color: String,
    pub ordering: PredictionOrdering,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            room_size: 60.0,
            path_radius: 8.0,
            stroke_color: "rgba(0,200,255,0.5)".to_string(),
            fill_color: "rgba(0,200,255,0.15)".to_string(),
            ordering: PredictionOrdering::LastResolved,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolsConfig {
    pub room_color: String,
    pub path_color: String,
    pub line_width: f64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            room_color: "#00ff00".to_string(),
            path_color: "#ffff00".to_string(),
            line_width: 2.0,
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|error| {
            ClientError::Config(format!("failed to read {}: {error}", path.display()))
        })?;
        log::debug!("Loaded client config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: ClientConfig = toml::from_str(contents)
            .map_err(|error| ClientError::Config(format!("invalid config: {error}")))?;
        config.validate_and_clamp();
        Ok(config)
    }

    fn validate_and_clamp(&mut self) {
        if self.feedback.reward < 1 {
            log::warn!(
                "Confirmation reward must be positive, got {}; using 1",
                self.feedback.reward
            );
            self.feedback.reward = 1;
        }
        if !(self.feedback.ghost_hit_slop.is_finite() && self.feedback.ghost_hit_slop >= 0.0) {
            log::warn!(
                "Invalid ghost_hit_slop {}, using 0",
                self.feedback.ghost_hit_slop
            );
            self.feedback.ghost_hit_slop = 0.0;
        }
        if !(4.0..=400.0).contains(&self.ghost.room_size) {
            log::warn!(
                "Invalid ghost room_size {:.1}, clamping to 4.0-400.0 range",
                self.ghost.room_size
            );
            self.ghost.room_size = clamp_or(self.ghost.room_size, 4.0, 400.0, 60.0);
        }
        if !(1.0..=100.0).contains(&self.ghost.path_radius) {
            log::warn!(
                "Invalid ghost path_radius {:.1}, clamping to 1.0-100.0 range",
                self.ghost.path_radius
            );
            self.ghost.path_radius = clamp_or(self.ghost.path_radius, 1.0, 100.0, 8.0);
        }
        if !(0.5..=20.0).contains(&self.tools.line_width) {
            log::warn!(
                "Invalid line_width {:.1}, clamping to 0.5-20.0 range",
                self.tools.line_width
            );
            self.tools.line_width = clamp_or(self.tools.line_width, 0.5, 20.0, 2.0);
        }
        let trimmed = self.backend.base_url.trim_end_matches('/');
        if trimmed.len() != self.backend.base_url.len() {
            self.backend.base_url = trimmed.to_string();
        }
    }
}

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.feedback.reward, 1);
        assert_eq!(config.ghost.ordering, PredictionOrdering::LastResolved);
    }

    #[test]
    fn load_reads_sections_and_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(
            &path,
            r#"
[backend]
base_url = "http://backend:9000/"
timeout_ms = 2500

[feedback]
reward = -3

[ghost]
room_size = 1000.0
ordering = "discard-stale"
"#,
        )
        .unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.backend.base_url, "http://backend:9000");
        assert_eq!(config.backend.timeout_ms, Some(2500));
        assert_eq!(config.feedback.reward, 1);
        assert_eq!(config.ghost.room_size, 400.0);
        assert_eq!(config.ghost.ordering, PredictionOrdering::DiscardStale);
        assert_eq!(config.tools, ToolsConfig::default());
    }

    #[test]
    fn load_reports_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ClientConfig::load(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ClientError::Config(_))));

        let invalid = ClientConfig::from_toml_str("[ghost]\nroom_size = \"big\"");
        assert!(matches!(invalid, Err(ClientError::Config(_))));
    }
}
