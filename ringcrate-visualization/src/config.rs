//! Viewer configuration

use ringcrate_core::{Color, Result};
use ringcrate_geometry::DEFAULT_EDGE_THRESHOLD_DEGREES;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Appearance and interaction settings for the ring viewer
///
/// Colors are packed `0xRRGGBB` values so configuration files stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub background: u32,
    pub material_color: u32,
    pub edge_color: u32,
    pub edge_threshold_degrees: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub grid_divisions: u32,
    pub show_grid: bool,
    pub show_axes: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    /// Size used when the container reports no layout yet
    pub default_width: u32,
    pub default_height: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            background: 0xf0f0f0,
            material_color: 0x8c9bab,
            edge_color: 0x1a1a1a,
            edge_threshold_degrees: DEFAULT_EDGE_THRESHOLD_DEGREES,
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            grid_divisions: 20,
            show_grid: true,
            show_axes: true,
            enable_damping: true,
            damping_factor: 0.05,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            ambient_intensity: 0.6,
            directional_intensity: 0.8,
            default_width: 800,
            default_height: 600,
        }
    }
}

impl ViewerConfig {
    /// Parse a configuration; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn background_color(&self) -> Color {
        Color::from_hex(self.background)
    }

    pub fn material_color(&self) -> Color {
        Color::from_hex(self.material_color)
    }

    pub fn edge_color(&self) -> Color {
        Color::from_hex(self.edge_color)
    }
}
