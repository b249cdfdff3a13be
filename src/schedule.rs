use crate::color::{GREEN, RED, Rgb8, WHITE, from_hex};
use crate::color_table::Palette16;
use heapless::Vec;
use palette::Srgb;

/// Maximum number of palettes a schedule can rotate through.
pub const MAX_PALETTES: usize = 8;

const DIM_WHITE: Rgb8 = Srgb::new(85, 85, 85);
const INCANDESCENT: Rgb8 = from_hex(0xE1A024);

/// Red and green with a little dim white.
#[rustfmt::skip]
pub const RED_GREEN_WHITE: Palette16 = Palette16::new([
    RED, RED, RED, RED, RED, RED, RED, RED,
    GREEN, GREEN, GREEN, GREEN,
    DIM_WHITE, DIM_WHITE, DIM_WHITE, DIM_WHITE,
]);

/// Blues and whites.
#[rustfmt::skip]
pub const CLOUD: Palette16 = Palette16::from_hex([
    0x0000FF, 0x00008B, 0x00008B, 0x00008B,
    0x00008B, 0x00008B, 0x00008B, 0x00008B,
    0x0000FF, 0x00008B, 0x87CEEB, 0x87CEEB,
    0xADD8E6, 0xFFFFFF, 0xADD8E6, 0x87CEEB,
]);

/// A full hue rotation.
#[rustfmt::skip]
pub const RAINBOW: Palette16 = Palette16::from_hex([
    0xFF0000, 0xD52A00, 0xAB5500, 0xAB7F00,
    0xABAB00, 0x56D500, 0x00FF00, 0x00D52A,
    0x00AB55, 0x0056AA, 0x0000FF, 0x2A00D5,
    0x5500AB, 0x7F0081, 0xAB0055, 0xD5002B,
]);

/// Warm incandescent "fairy lights".
pub const FAIRY_LIGHTS: Palette16 = Palette16::solid(INCANDESCENT);

/// Mostly dim white with a few bright flakes.
#[rustfmt::skip]
pub const SNOW: Palette16 = Palette16::new([
    WHITE, WHITE, WHITE, WHITE,
    DIM_WHITE, DIM_WHITE, DIM_WHITE, DIM_WHITE,
    DIM_WHITE, DIM_WHITE, DIM_WHITE, DIM_WHITE,
    DIM_WHITE, DIM_WHITE, DIM_WHITE, DIM_WHITE,
]);

/// Schedule validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScheduleError {
    /// No palettes provided.
    EmptySchedule,

    /// Window length of zero milliseconds.
    ZeroWindow,

    /// More than [`MAX_PALETTES`] palettes.
    CapacityExceeded,
}

impl core::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ScheduleError::EmptySchedule => {
                write!(f, "schedule must have at least one palette")
            }
            ScheduleError::ZeroWindow => {
                write!(f, "palette window must be longer than zero milliseconds")
            }
            ScheduleError::CapacityExceeded => {
                write!(f, "schedule capacity of {} palettes exceeded", MAX_PALETTES)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ScheduleError {}

/// Rotates through a fixed list of palettes, one per time window.
///
/// Elapsed time is divided into windows of equal length; window `w` shows
/// palette `w % len`. Selection depends on nothing but the elapsed time, so
/// asking again within the same window always yields the same palette.
#[derive(Debug, Clone)]
pub struct PaletteSchedule {
    palettes: Vec<Palette16, MAX_PALETTES>,
    window_millis: u64,
}

impl PaletteSchedule {
    /// Default window length, ten seconds.
    pub const DEFAULT_WINDOW_MILLIS: u64 = 10_000;

    /// Creates a new schedule builder.
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::new()
    }

    /// The classic twinkle rotation: red/green/white, cloud, rainbow,
    /// fairy lights and snow, ten seconds each.
    pub fn twinkle() -> Self {
        let mut palettes = Vec::new();
        for palette in [RED_GREEN_WHITE, CLOUD, RAINBOW, FAIRY_LIGHTS, SNOW] {
            // Five presets always fit in MAX_PALETTES.
            let _ = palettes.push(palette);
        }
        Self {
            palettes,
            window_millis: Self::DEFAULT_WINDOW_MILLIS,
        }
    }

    /// A schedule that always shows `palette`.
    pub fn single(palette: Palette16) -> Self {
        let mut palettes = Vec::new();
        let _ = palettes.push(palette);
        Self {
            palettes,
            window_millis: Self::DEFAULT_WINDOW_MILLIS,
        }
    }

    /// Index of the palette shown `elapsed_millis` after the animation started.
    #[inline]
    pub fn index_at(&self, elapsed_millis: u64) -> usize {
        let window = elapsed_millis / self.window_millis;
        (window % self.palettes.len() as u64) as usize
    }

    /// Palette shown `elapsed_millis` after the animation started.
    pub fn palette_at(&self, elapsed_millis: u64) -> &Palette16 {
        &self.palettes[self.index_at(elapsed_millis)]
    }

    /// Returns the palette at `index`.
    pub fn get(&self, index: usize) -> Option<&Palette16> {
        self.palettes.get(index)
    }

    /// Number of palettes in the rotation.
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Always false for a built schedule.
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Length of one palette window in milliseconds.
    pub fn window_millis(&self) -> u64 {
        self.window_millis
    }
}

impl Default for PaletteSchedule {
    fn default() -> Self {
        Self::twinkle()
    }
}

/// Builder for validated palette schedules.
#[derive(Debug)]
pub struct ScheduleBuilder {
    palettes: Vec<Palette16, MAX_PALETTES>,
    window_millis: u64,
    overflowed: bool,
}

impl ScheduleBuilder {
    /// Creates an empty builder with the default ten second window.
    pub fn new() -> Self {
        Self {
            palettes: Vec::new(),
            window_millis: PaletteSchedule::DEFAULT_WINDOW_MILLIS,
            overflowed: false,
        }
    }

    /// Appends a palette to the rotation.
    pub fn palette(mut self, palette: Palette16) -> Self {
        if self.palettes.push(palette).is_err() {
            self.overflowed = true;
        }
        self
    }

    /// Sets how long each palette is shown.
    pub fn window_millis(mut self, millis: u64) -> Self {
        self.window_millis = millis;
        self
    }

    /// Builds and validates the schedule.
    ///
    /// # Errors
    /// * `CapacityExceeded` - More than [`MAX_PALETTES`] palettes were added
    /// * `EmptySchedule` - No palettes were added
    /// * `ZeroWindow` - The window length is zero
    pub fn build(self) -> Result<PaletteSchedule, ScheduleError> {
        if self.overflowed {
            return Err(ScheduleError::CapacityExceeded);
        }

        if self.palettes.is_empty() {
            return Err(ScheduleError::EmptySchedule);
        }

        if self.window_millis == 0 {
            return Err(ScheduleError::ZeroWindow);
        }

        Ok(PaletteSchedule {
            palettes: self.palettes,
            window_millis: self.window_millis,
        })
    }
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
