#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`TwinkleEngine`**: Advances a frame buffer one animation frame per call
//! - **`DirectionStore`**: Per-pixel brightening/darkening flags, dense or bit-packed
//! - **`Palette16`**: 16-stop color table that ignited pixels draw their color from
//! - **`PaletteSchedule`**: Rotates palettes on fixed time windows
//! - **`TwinkleConfig`**: Fade speeds, ignition density and frame delay
//! - **`RandomSource`**: Trait to implement for your random number generator
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Pixels are `Srgb<u8>`. The engine never talks to hardware: after each
//! [`TwinkleEngine::advance_frame`] call, write [`TwinkleEngine::leds`] to your
//! strip and sleep for the returned duration.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod color;
pub mod color_table;
pub mod config;
pub mod direction;
pub mod engine;
pub mod random;
pub mod schedule;
pub mod time;

pub use color::{BLACK, BLUE, GREEN, RED, Rgb8, WHITE, is_off};
pub use color_table::{Palette16, PaletteBlend};
pub use config::{ConfigBuilder, ConfigError, TwinkleConfig};
pub use direction::{
    DenseDirections, Direction, DirectionFlags, DirectionStore, FlagEncoding, PackedDirections,
    packed_len,
};
pub use engine::{TwinkleEngine, TwinkleError};
pub use random::{RandomSource, RngSource};
pub use schedule::{MAX_PALETTES, PaletteSchedule, ScheduleBuilder, ScheduleError};
pub use time::{TimeDuration, TimeInstant, TimeSource};

#[cfg(feature = "std")]
pub use time::StdClock;
