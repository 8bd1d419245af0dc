//! Single-frame renderer: draws the sky for one date and place.
//!
//! Usage: cargo run --release --bin render_frame -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>    JSON config file (default: built-in defaults)
//!   --date <RFC3339>   Date and time (default: now)
//!   --lat <DEG>        Latitude (default: config latitude)
//!   --lon <DEG>        Longitude (default: config longitude)
//!   --width <PX>       Image width (default: config width)
//!   --height <PX>      Image height (default: config height)
//!   --out <PATH>       Output image (default: "sky.png")
//!   --uniform <PATH>   Also write the frame's GPU uniform block (32 bytes)

use std::time::Instant;

use solsky::config::SimConfig;
use solsky::core::Result;
use solsky::ephemeris::GeoDate;
use solsky::render::{RenderState, render_frame, save_frame};
use solsky::sky::{SkyShader, SkyUniform};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

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
    if let Some(lat) = parse_f64_arg(&args, "--lat") {
        config.location.latitude = lat;
    }
    if let Some(lon) = parse_f64_arg(&args, "--lon") {
        config.location.longitude = lon;
    }
    if let Some(width) = parse_u32_arg(&args, "--width") {
        config.frame.width = width;
    }
    if let Some(height) = parse_u32_arg(&args, "--height") {
        config.frame.height = height;
    }
    config.validate()?;

    let date = match parse_str_arg(&args, "--date") {
        Some(text) => GeoDate::parse_rfc3339(&text)?,
        None => GeoDate::now()?,
    };
    let out = parse_str_arg(&args, "--out").unwrap_or_else(|| "sky.png".to_string());

    let mut state = RenderState::new(
        config.location.to_location()?,
        f64::from(config.sky.altitude_scale),
    );
    state.set_date(date);
    let sun = state.sun();

    println!("=== Solsky Frame ===");
    println!(
        "Date:     {}-{:02}-{:02} {:02}:{:02}:{:02} (UTC{:+}min, day {})",
        date.year(),
        date.month(),
        date.day(),
        date.hour(),
        date.minute(),
        date.second(),
        date.utc_offset_minutes(),
        date.day_of_year()
    );
    println!("Location: {:.4}, {:.4}", config.location.latitude, config.location.longitude);
    println!(
        "Sun:      x = {:.4}, y = {:.4} ({})",
        sun.x,
        sun.y,
        if sun.is_above_horizon() { "above horizon" } else { "below horizon" }
    );

    let start = Instant::now();
    let image = render_frame(&state.snapshot(), &SkyShader::new(config.sky), &config.frame)?;
    save_frame(&image, &out)?;
    println!(
        "Output:   {} ({}x{}, {:.1}ms)",
        out,
        config.frame.width,
        config.frame.height,
        start.elapsed().as_secs_f32() * 1000.0
    );

    if let Some(path) = parse_str_arg(&args, "--uniform") {
        let uniform = SkyUniform::new(sun, config.frame.aspect_ratio(), &config.sky);
        uniform.save(&path)?;
        println!("Uniform:  {} ({} bytes)", path, uniform.as_bytes().len());
    }

    Ok(())
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
