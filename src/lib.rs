//! Solsky - A sky simulation driven by the sun's true position

pub mod core;
pub mod config;
pub mod ephemeris;
pub mod sky;
pub mod render;
