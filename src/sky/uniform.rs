//! GPU uniform layout of the sky model.

use std::path::Path;

use bytemuck::{Pod, Zeroable};

use crate::core::Result;

use crate::ephemeris::SunPosition;
use crate::sky::config::SkyConfig;

/// Per-frame inputs of the sky fragment shader.
///
/// Padded to a multiple of 16 bytes for WGSL/GLSL uniform blocks.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SkyUniform {
    // -- 16 bytes --
    pub sun_position: [f32; 2],
    /// `(width / height, 1.0)`
    pub aspect_ratio: [f32; 2],

    // -- 16 bytes --
    pub altitude_scale: f32,
    pub sunlight_radius: f32,
    pub horizon_radius: f32,
    pub _pad: f32,
}

impl SkyUniform {
    pub fn new(sun: SunPosition, aspect_ratio: f32, config: &SkyConfig) -> Self {
        Self {
            sun_position: [sun.x, sun.y],
            aspect_ratio: [aspect_ratio, 1.0],
            altitude_scale: config.altitude_scale,
            sunlight_radius: config.sunlight_radius,
            horizon_radius: config.horizon_radius,
            _pad: 0.0,
        }
    }
}

impl SkyUniform {
    /// Raw bytes in uniform buffer layout.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Dump the uniform block to a file for a GPU shader harness.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.as_bytes())?;
        Ok(())
    }
}

impl Default for SkyUniform {
    fn default() -> Self {
        Self::new(SunPosition::default(), 1.0, &SkyConfig::default())
    }
}
