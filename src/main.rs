//! Solsky - sky simulation driver.
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>     JSON config file (default: built-in defaults)
//!   --out <DIR>         Output directory for frames (default: "frames")
//!   --date <RFC3339>    Date and time to show (default: now)
//!   --frames <N>        Frame limit per sweep (overrides the config)
//!   --manual <DEG>      Render one frame with the sun at DEG from midnight
//!   --latitude <DEG>    Latitude for --manual (default: config latitude)
//!   --day <N>           Day of year for --manual (default: from --date)
//!   --realtime          Pace frames at the configured interval
//!   --watch             Keep running, re-sweeping every refresh period
//!
//! Output:
//!   <out>/frame_0000.png, frame_0001.png, ...

use std::path::PathBuf;
use std::time::Duration;

use solsky::config::SimConfig;
use solsky::core::{Result, logging};
use solsky::ephemeris::GeoDate;
use solsky::render::{ManualInput, RenderState, render_frame, run_frames, save_frame};
use solsky::sky::SkyShader;

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(frames) = parse_u32_arg(&args, "--frames") {
        config.animation.max_frames = frames;
        config.validate()?;
    }
    let out_dir = PathBuf::from(parse_str_arg(&args, "--out").unwrap_or_else(|| "frames".to_string()));
    let realtime = has_flag(&args, "--realtime");
    let watch = has_flag(&args, "--watch");

    let date = match parse_str_arg(&args, "--date") {
        Some(text) => GeoDate::parse_rfc3339(&text)?,
        None => GeoDate::now()?,
    };

    std::fs::create_dir_all(&out_dir)?;

    let shader = SkyShader::new(config.sky);
    let location = config.location.to_location()?;
    let mut state = RenderState::new(location, f64::from(config.sky.altitude_scale));

    log::info!(
        "Sky at ({:.4}, {:.4}), {}x{} frames into {}",
        location.latitude_degrees(),
        location.longitude_degrees(),
        config.frame.width,
        config.frame.height,
        out_dir.display()
    );

    if let Some(position_degrees) = parse_f64_arg(&args, "--manual") {
        let input = ManualInput {
            position_degrees,
            latitude_degrees: parse_f64_arg(&args, "--latitude").unwrap_or(config.location.latitude),
            day_of_year: parse_u32_arg(&args, "--day").unwrap_or_else(|| date.day_of_year()),
        };
        state.apply_manual(&input)?;
        let path = out_dir.join("frame_0000.png");
        let image = render_frame(&state.snapshot(), &shader, &config.frame)?;
        save_frame(&image, &path)?;
        log::info!("Wrote {} (sun at {:.3}, {:.3})", path.display(), state.sun().x, state.sun().y);
        return Ok(());
    }

    if config.animation.enabled {
        state.start_sweep(date);
    } else {
        state.set_date(date);
    }

    let mut next_index = 0u32;
    loop {
        let frames = run_frames(&mut state, &shader, &config, realtime, |image| {
            save_frame(image, out_dir.join(format!("frame_{:04}.png", next_index)))?;
            next_index += 1;
            Ok(())
        })?;
        log::info!("Wrote {} frames to {}", frames, out_dir.display());
        if !watch {
            break;
        }

        std::thread::sleep(Duration::from_secs(config.animation.refresh_seconds));
        let now = GeoDate::now()?;
        if config.animation.enabled {
            state.refresh(now);
        } else {
            state.set_date(now);
        }
    }

    Ok(())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn parse_f64_arg(args: &[String], flag: &str) -> Option<f64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
