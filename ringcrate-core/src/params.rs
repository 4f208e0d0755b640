//! Tolerance ring part parameters

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scalar parameters describing one tolerance ring part
///
/// Lengths are in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingParams {
    /// Part identifier, used in labels and export file names
    pub part_id: String,
    /// Inner diameter of the ring
    pub bore_diameter: f32,
    /// Extent of the ring along its axis
    pub width: f32,
    /// Radial wall thickness before the wave perturbation
    pub wall_thickness: f32,
    /// Number of samples on the wavy outer boundary
    pub wave_count: u32,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            part_id: "TR-25-12".to_string(),
            bore_diameter: 25.0,
            width: 12.0,
            wall_thickness: 1.5,
            wave_count: 18,
        }
    }
}

impl RingParams {
    pub fn new<S: Into<String>>(
        part_id: S,
        bore_diameter: f32,
        width: f32,
        wall_thickness: f32,
        wave_count: u32,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            bore_diameter,
            width,
            wall_thickness,
            wave_count,
        }
    }

    /// Parse parameters from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load parameters from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn bore_radius(&self) -> f32 {
        self.bore_diameter / 2.0
    }

    /// Base radius of the outer boundary before the wave perturbation
    pub fn outer_radius(&self) -> f32 {
        self.bore_radius() + self.wall_thickness
    }

    /// Check that every dimension is usable for building geometry
    pub fn validate(&self) -> Result<()> {
        if self.part_id.trim().is_empty() {
            return Err(Error::InvalidData("Part id must not be empty".to_string()));
        }

        let dimensions = [
            ("bore diameter", self.bore_diameter),
            ("width", self.width),
            ("wall thickness", self.wall_thickness),
        ];
        for (name, value) in dimensions {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidData(format!(
                    "Ring {} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }

        if self.wave_count < 3 {
            return Err(Error::InvalidData(format!(
                "Wave count must be at least 3, got {}",
                self.wave_count
            )));
        }

        Ok(())
    }

    /// Human-readable caption for the part
    pub fn label(&self) -> String {
        format!(
            "{} | Ø{} x {} mm | t {} mm | {} waves",
            self.part_id,
            format_dimension(self.bore_diameter),
            format_dimension(self.width),
            format_dimension(self.wall_thickness),
            self.wave_count
        )
    }
}

/// Format with at most two decimals and no trailing zeros
pub fn format_dimension(value: f32) -> String {
    let text = format!("{:.2}", value);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
