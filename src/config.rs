//! Simulation configuration loaded from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Range checks happen here, not in the solar or shading math.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::ephemeris::Location;
use crate::sky::SkyConfig;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Full simulation configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Observer position.
    pub location: LocationConfig,
    /// Sky model constants.
    pub sky: SkyConfig,
    /// Output image parameters.
    pub frame: FrameConfig,
    /// Sun sweep animation parameters.
    pub animation: AnimationConfig,
}

impl SimConfig {
    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Check every value the rest of the crate assumes is in range.
    pub fn validate(&self) -> Result<()> {
        self.location.to_location()?;

        let scale = self.sky.altitude_scale;
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(Error::Config(format!("altitude_scale {scale} must be in (0, 1]")));
        }
        if !(self.sky.sunlight_radius >= 0.0) {
            return Err(Error::Config(format!(
                "sunlight_radius {} must be non-negative",
                self.sky.sunlight_radius
            )));
        }
        if !(self.sky.horizon_radius > 0.0) {
            return Err(Error::Config(format!(
                "horizon_radius {} must be positive",
                self.sky.horizon_radius
            )));
        }
        if self.frame.width == 0 || self.frame.height == 0 {
            return Err(Error::Config(format!(
                "frame size {}x{} must be non-zero",
                self.frame.width, self.frame.height
            )));
        }
        if self.animation.max_frames == 0 {
            return Err(Error::Config("animation.max_frames must be at least 1".to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Location config
// ---------------------------------------------------------------------------

/// Observer latitude and longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationConfig {
    /// Validated [`Location`].
    pub fn to_location(&self) -> Result<Location> {
        Location::new(self.latitude, self.longitude)
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        // London, south bank of the Thames
        Self {
            latitude: 51.499_25,
            longitude: -0.108_492,
        }
    }
}

// ---------------------------------------------------------------------------
// Frame config
// ---------------------------------------------------------------------------

/// Output image parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub width: u32,
    pub height: u32,
    /// Overlay the day's altitude curve as a grey line.
    pub draw_altitude_curve: bool,
    /// Overlay the horizon as a grey line.
    pub draw_horizon: bool,
}

impl FrameConfig {
    /// Width / height of the output.
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            draw_altitude_curve: true,
            draw_horizon: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Animation config
// ---------------------------------------------------------------------------

/// Sun sweep animation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Sweep the sun from midnight to its current position before resting.
    pub enabled: bool,
    /// Hard limit on frames per sweep.
    pub max_frames: u32,
    /// Target time between frames.
    pub frame_interval_ms: u64,
    /// Seconds to rest at the true position before sweeping again.
    pub refresh_seconds: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_frames: 2000,
            frame_interval_ms: 16,
            refresh_seconds: 60,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
