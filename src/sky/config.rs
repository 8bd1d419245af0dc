//! Sky shading configuration.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Constants of the procedural sky model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Compression applied to sin(altitude) on screen, in `(0, 1]`.
    pub altitude_scale: f32,
    /// Sunlight falloff radius while the sun is above the horizon.
    pub sunlight_radius: f32,
    /// Horizon glow falloff radius at aspect ratio 1; divided by the aspect ratio.
    pub horizon_radius: f32,
    /// Colours of each term.
    pub palette: SkyPalette,
    /// Weights used to sum the terms.
    pub weights: BlendWeights,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            altitude_scale: 0.8,
            sunlight_radius: 0.8,
            horizon_radius: 0.75,
            palette: SkyPalette::default(),
            weights: BlendWeights::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Linear RGB colours for each shading term.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyPalette {
    /// Night background behind everything.
    pub background: [f32; 3],
    /// Daylight sky around the sun.
    pub sky: [f32; 3],
    /// Sun disc.
    pub sunlight: [f32; 3],
    /// Horizon band while the sun is in the eastern half.
    pub sunrise: [f32; 3],
    /// Horizon band while the sun is in the western half.
    pub sunset: [f32; 3],
}

impl Default for SkyPalette {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0],
            sky: [0.529_411_765, 0.807_843_137, 0.980_392_157], // light sky blue
            sunlight: [1.0, 1.0, 1.0],
            sunrise: [0.953, 0.906, 0.427],                 // pale gold
            sunset: [1.2 * 0.788, 1.2 * 0.106, 1.2 * 0.149], // deep red, boosted
        }
    }
}

// ---------------------------------------------------------------------------
// Blend weights
// ---------------------------------------------------------------------------

/// Weights of the sky, sun and horizon terms. The background always has weight 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendWeights {
    pub sky: f32,
    pub sun: f32,
    pub horizon: f32,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            sky: 0.8,
            sun: 0.4,
            horizon: 0.3,
        }
    }
}
