//! Twinkle animation engine.
//!
//! Provides [`TwinkleEngine`], which advances a frame buffer by one animation
//! frame per call. Every pixel is either brightening or darkening:
//!
//! - A brightening pixel gains a fraction of its own color each frame. Once
//!   any channel hits 255 it turns around and starts darkening.
//! - A darkening pixel loses a fraction of its color each frame until it is
//!   off.
//! - Once per frame, a randomly chosen pixel that is fully off may ignite with
//!   a dim color from the active palette and start brightening.
//!
//! The active palette rotates on a fixed schedule of elapsed time.

use crate::color::{Rgb8, brighten, darken, is_off, is_saturated};
use crate::color_table::{Palette16, PaletteBlend};
use crate::config::{ConfigError, TwinkleConfig};
use crate::direction::{Direction, DirectionStore, FlagEncoding};
use crate::random::RandomSource;
use crate::schedule::PaletteSchedule;
use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// Errors that can occur when building an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwinkleError {
    /// The frame buffer is longer than a 16-bit random draw can address.
    TooManyPixels {
        /// Frame buffer length
        pixels: usize,
    },
    /// The direction store cannot hold a flag for every pixel.
    DirectionStoreTooSmall {
        /// Frame buffer length
        pixels: usize,
        /// Number of flags the store can hold
        capacity: usize,
    },
    /// The direction store does not use the encoding the config names.
    EncodingMismatch {
        /// Encoding named by the config
        configured: FlagEncoding,
        /// Encoding the store actually uses
        store: FlagEncoding,
    },
    /// The configuration failed validation.
    InvalidConfig(ConfigError),
}

impl core::fmt::Display for TwinkleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TwinkleError::TooManyPixels { pixels } => {
                write!(
                    f,
                    "frame buffer of {} pixels exceeds the maximum of {}",
                    pixels,
                    u16::MAX
                )
            }
            TwinkleError::DirectionStoreTooSmall { pixels, capacity } => {
                write!(
                    f,
                    "direction store holds {} flags but the frame buffer has {} pixels",
                    capacity, pixels
                )
            }
            TwinkleError::EncodingMismatch { configured, store } => {
                write!(
                    f,
                    "config asks for {:?} direction flags but the store is {:?}",
                    configured, store
                )
            }
            TwinkleError::InvalidConfig(err) => {
                write!(f, "invalid config: {}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TwinkleError {}

impl From<ConfigError> for TwinkleError {
    fn from(err: ConfigError) -> Self {
        TwinkleError::InvalidConfig(err)
    }
}

/// Drives a twinkle animation over a frame buffer.
///
/// The engine owns everything one animation instance needs: the frame buffer,
/// the direction flags, the random source and the palette state. Several
/// engines can run side by side without sharing anything but the time source.
///
/// Call [`advance_frame`](Self::advance_frame) once per frame, push the frame
/// buffer to the LEDs, then wait for the returned duration.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `R` - Random source implementation type
/// * `S` - Direction store (dense, packed or runtime-selected)
/// * `B` - Frame buffer, e.g. `[Rgb8; N]` or `&mut [Rgb8]`
pub struct TwinkleEngine<'t, I, T, R, S, B>
where
    I: TimeInstant,
    T: TimeSource<I>,
    R: RandomSource,
    S: DirectionStore,
    B: AsRef<[Rgb8]> + AsMut<[Rgb8]>,
{
    leds: B,
    directions: S,
    rng: R,
    time_source: &'t T,
    start_time: I,
    config: TwinkleConfig,
    schedule: PaletteSchedule,
    palette: Palette16,
    palette_index: usize,
}

impl<'t, I, T, R, S, B> TwinkleEngine<'t, I, T, R, S, B>
where
    I: TimeInstant,
    T: TimeSource<I>,
    R: RandomSource,
    S: DirectionStore,
    B: AsRef<[Rgb8]> + AsMut<[Rgb8]>,
{
    /// Creates an engine and starts its palette clock.
    ///
    /// The frame buffer length is fixed from here on.
    ///
    /// # Errors
    /// * `InvalidConfig` - `config` fails [`TwinkleConfig::validate`]
    /// * `TooManyPixels` - more than `u16::MAX` pixels
    /// * `DirectionStoreTooSmall` - `directions` has fewer flags than pixels
    /// * `EncodingMismatch` - `directions` is not laid out as
    ///   `config.flag_encoding`; build it with
    ///   [`DirectionFlags::from_config`](crate::DirectionFlags::from_config)
    ///   to keep the two in step
    pub fn new(
        leds: B,
        directions: S,
        rng: R,
        time_source: &'t T,
        config: TwinkleConfig,
        schedule: PaletteSchedule,
    ) -> Result<Self, TwinkleError> {
        config.validate()?;

        let pixels = leds.as_ref().len();
        if pixels > usize::from(u16::MAX) {
            return Err(TwinkleError::TooManyPixels { pixels });
        }

        let capacity = directions.capacity();
        if capacity < pixels {
            return Err(TwinkleError::DirectionStoreTooSmall { pixels, capacity });
        }

        let store = directions.encoding();
        if store != config.flag_encoding {
            return Err(TwinkleError::EncodingMismatch {
                configured: config.flag_encoding,
                store,
            });
        }

        let palette = *schedule.palette_at(0);

        Ok(Self {
            leds,
            directions,
            rng,
            time_source,
            start_time: time_source.now(),
            config,
            schedule,
            palette,
            palette_index: 0,
        })
    }

    /// Renders one frame and returns how long to wait before the next one.
    ///
    /// Rotates the palette if its window has passed, fades every pixel one
    /// step and makes at most one ignition attempt.
    pub fn advance_frame(&mut self) -> I::Duration {
        self.select_palette();
        self.fade_pixels();
        self.try_ignite();

        I::Duration::from_millis(self.config.frame_millis)
    }

    /// Switches to the palette scheduled for the current elapsed time.
    ///
    /// Returns the active palette index. Calling this again within the same
    /// window changes nothing.
    pub fn select_palette(&mut self) -> usize {
        let elapsed = self.time_source.now().duration_since(self.start_time);
        let elapsed_millis = elapsed.as_millis();
        let index = self.schedule.index_at(elapsed_millis);

        if index != self.palette_index {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "twinkle: palette {} -> {} at {} ms",
                self.palette_index,
                index,
                elapsed_millis
            );

            self.palette = *self.schedule.palette_at(elapsed_millis);
            self.palette_index = index;
        }

        index
    }

    /// Moves every pixel one step in its current direction.
    ///
    /// A brightening pixel that saturates is flipped to darkening after its
    /// step. A lit pixel too dim for the step to change it is flipped as well.
    /// Off pixels stay off.
    pub fn fade_pixels(&mut self) {
        let fade_in = self.config.fade_in_speed;
        let fade_out = self.config.fade_out_speed;

        for (index, pixel) in self.leds.as_mut().iter_mut().enumerate() {
            match self.directions.get(index) {
                Direction::Darkening => {
                    *pixel = darken(*pixel, fade_out);
                }
                Direction::Brightening => {
                    let brighter = brighten(*pixel, fade_in);
                    let stalled = brighter == *pixel && !is_off(brighter);
                    if is_saturated(brighter) || stalled {
                        self.directions.set(index, Direction::Darkening);
                    }
                    *pixel = brighter;
                }
            }
        }
    }

    /// Makes one ignition attempt.
    ///
    /// With probability `density / 256` a pixel is picked uniformly at random.
    /// If it is off, it gets a random color from the active palette at the
    /// starting brightness and begins brightening. A lit pick is dropped
    /// without retrying.
    ///
    /// Returns the index of the ignited pixel.
    pub fn try_ignite(&mut self) -> Option<usize> {
        let pixels = self.leds.as_ref().len();
        if pixels == 0 || self.rng.random8() >= self.config.density {
            return None;
        }

        // Construction guarantees pixels <= u16::MAX.
        let index = usize::from(self.rng.random16_below(pixels as u16));
        if !is_off(self.leds.as_ref()[index]) {
            return None;
        }

        let color = self.palette.color_at(
            self.rng.random8(),
            self.config.starting_brightness,
            PaletteBlend::Direct,
        );
        self.leds.as_mut()[index] = color;
        self.directions.set(index, Direction::Brightening);

        Some(index)
    }

    /// Turns every pixel off and restarts the palette clock.
    pub fn restart(&mut self) {
        for (index, pixel) in self.leds.as_mut().iter_mut().enumerate() {
            *pixel = Rgb8::new(0, 0, 0);
            self.directions.set(index, Direction::Brightening);
        }

        self.start_time = self.time_source.now();
        self.palette = *self.schedule.palette_at(0);
        self.palette_index = 0;
    }

    /// Returns the frame buffer.
    pub fn leds(&self) -> &[Rgb8] {
        self.leds.as_ref()
    }

    /// Returns the frame buffer for direct edits between frames.
    pub fn leds_mut(&mut self) -> &mut [Rgb8] {
        self.leds.as_mut()
    }

    /// Returns the fade direction of pixel `index`.
    ///
    /// # Panics
    /// Panics if `index` is not below [`len`](Self::len).
    pub fn direction(&self, index: usize) -> Direction {
        assert!(index < self.len(), "pixel index out of range");
        self.directions.get(index)
    }

    /// Overrides the fade direction of pixel `index`.
    ///
    /// # Panics
    /// Panics if `index` is not below [`len`](Self::len).
    pub fn set_direction(&mut self, index: usize, direction: Direction) {
        assert!(index < self.len(), "pixel index out of range");
        self.directions.set(index, direction);
    }

    /// Returns the direction store.
    pub fn directions(&self) -> &S {
        &self.directions
    }

    /// Returns the active palette.
    pub fn palette(&self) -> &Palette16 {
        &self.palette
    }

    /// Returns the schedule index of the active palette.
    pub fn palette_index(&self) -> usize {
        self.palette_index
    }

    /// Returns the palette rotation.
    pub fn schedule(&self) -> &PaletteSchedule {
        &self.schedule
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TwinkleConfig {
        &self.config
    }

    /// Number of pixels in the frame buffer.
    pub fn len(&self) -> usize {
        self.leds.as_ref().len()
    }

    /// Returns true if the frame buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the elapsed time since the engine started or restarted.
    pub fn elapsed_time(&self) -> I::Duration {
        self.time_source.now().duration_since(self.start_time)
    }

    /// Consumes the engine, returning the frame buffer, direction store and
    /// random source.
    pub fn into_parts(self) -> (B, S, R) {
        (self.leds, self.directions, self.rng)
    }
}
