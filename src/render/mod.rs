//! Frame production: sun sweep animation, per-frame state, the CPU rasterizer
//! and the frame loop

pub mod animation;
pub mod frame;
pub mod scheduler;
pub mod state;

pub use animation::SunSweep;
pub use frame::{draw_line, draw_polyline, ndc_to_pixel, pixel_to_ndc, render_frame, save_frame};
pub use scheduler::run_frames;
pub use state::{FrameInput, ManualInput, RenderState};
