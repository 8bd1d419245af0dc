//! Explicit frame loop.
//!
//! Each tick snapshots the [`RenderState`], shades the snapshot, hands the
//! image to the caller and only then advances the sweep. Nothing in the
//! renderer schedules itself; this loop is the only driver.

use std::time::Duration;

use image::RgbImage;

use crate::config::SimConfig;
use crate::core::Result;
use crate::core::time::FrameTimer;
use crate::render::frame::render_frame;
use crate::render::state::RenderState;
use crate::sky::SkyShader;

/// Render frames until the sun stops moving or `animation.max_frames` is hit.
///
/// With `realtime` set, frames are paced at `animation.frame_interval_ms`
/// and a warning is logged for any frame whose work overruns that budget.
/// Returns the number of frames passed to `emit`; the first error from
/// rendering or from `emit` ends the loop.
pub fn run_frames<F>(
    state: &mut RenderState,
    shader: &SkyShader,
    config: &SimConfig,
    realtime: bool,
    mut emit: F,
) -> Result<u32>
where
    F: FnMut(&RgbImage) -> Result<()>,
{
    let mut timer = FrameTimer::new(Duration::from_millis(config.animation.frame_interval_ms));
    let mut frames = 0u32;

    loop {
        timer.begin_frame();
        let input = state.snapshot();
        let image = render_frame(&input, shader, &config.frame)?;
        emit(&image)?;
        frames += 1;
        timer.tick();

        if realtime {
            if timer.over_budget() {
                log::warn!(
                    "Frame {} took {:.1}ms, over the {}ms budget",
                    timer.frame_count(),
                    timer.delta_secs() * 1000.0,
                    timer.interval().as_millis()
                );
            }
            std::thread::sleep(timer.time_until_next());
        }

        if frames >= config.animation.max_frames {
            if state.is_animating() {
                log::warn!("Stopped after {} frames, sweep not finished", frames);
            }
            break;
        }
        if !state.advance() {
            break;
        }
    }

    log::info!(
        "Rendered {} frames (avg {:.1}ms/frame)",
        frames,
        timer.average_frame_ms()
    );
    Ok(frames)
}
