//! Animation tuning parameters.

use crate::direction::FlagEncoding;

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Frame delay hint of zero milliseconds.
    ZeroFrameDuration,

    /// Fade-out step of zero, lit pixels would never go dark.
    ZeroFadeOut,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroFrameDuration => {
                write!(f, "frame duration must be at least one millisecond")
            }
            ConfigError::ZeroFadeOut => {
                write!(f, "fade-out speed must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Tuning for a twinkle animation.
///
/// All fractions are out of 256: a `fade_in_speed` of 32 adds roughly an
/// eighth of the current color every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TwinkleConfig {
    /// Brightness a pixel ignites at.
    pub starting_brightness: u8,

    /// Fraction of its own color a brightening pixel gains per frame.
    pub fade_in_speed: u8,

    /// Fraction of its color a darkening pixel loses per frame.
    pub fade_out_speed: u8,

    /// Ignition threshold: an attempt is made when an 8-bit draw is below it.
    pub density: u8,

    /// Delay hint returned after each frame.
    pub frame_millis: u64,

    /// Layout for direction flags built from this config.
    pub flag_encoding: FlagEncoding,
}

impl TwinkleConfig {
    /// The classic twinkle tuning.
    pub const DEFAULT: Self = Self {
        starting_brightness: 64,
        fade_in_speed: 32,
        fade_out_speed: 20,
        density: 255,
        frame_millis: 20,
        flag_encoding: FlagEncoding::Packed,
    };

    /// Creates a builder seeded with [`TwinkleConfig::DEFAULT`].
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks the fields that would stall the animation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_millis == 0 {
            return Err(ConfigError::ZeroFrameDuration);
        }

        if self.fade_out_speed == 0 {
            return Err(ConfigError::ZeroFadeOut);
        }

        Ok(())
    }
}

impl Default for TwinkleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Builder for validated configurations.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: TwinkleConfig,
}

impl ConfigBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Self {
            config: TwinkleConfig::DEFAULT,
        }
    }

    pub fn starting_brightness(mut self, brightness: u8) -> Self {
        self.config.starting_brightness = brightness;
        self
    }

    pub fn fade_in_speed(mut self, speed: u8) -> Self {
        self.config.fade_in_speed = speed;
        self
    }

    pub fn fade_out_speed(mut self, speed: u8) -> Self {
        self.config.fade_out_speed = speed;
        self
    }

    pub fn density(mut self, density: u8) -> Self {
        self.config.density = density;
        self
    }

    pub fn frame_millis(mut self, millis: u64) -> Self {
        self.config.frame_millis = millis;
        self
    }

    pub fn flag_encoding(mut self, encoding: FlagEncoding) -> Self {
        self.config.flag_encoding = encoding;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `ZeroFrameDuration` - `frame_millis` is zero
    /// * `ZeroFadeOut` - `fade_out_speed` is zero
    pub fn build(self) -> Result<TwinkleConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_build_matches_default() {
        assert_eq!(TwinkleConfig::builder().build(), Ok(TwinkleConfig::default()));
    }

    #[test]
    fn setters_override_defaults() {
        let config = TwinkleConfig::builder()
            .density(100)
            .fade_in_speed(8)
            .flag_encoding(FlagEncoding::Dense)
            .build()
            .unwrap();

        assert_eq!(config.density, 100);
        assert_eq!(config.fade_in_speed, 8);
        assert_eq!(config.fade_out_speed, 20);
        assert_eq!(config.flag_encoding, FlagEncoding::Dense);
    }

    #[test]
    fn rejects_zero_frame_duration() {
        let result = TwinkleConfig::builder().frame_millis(0).build();
        assert_eq!(result, Err(ConfigError::ZeroFrameDuration));
    }

    #[test]
    fn rejects_zero_fade_out() {
        let result = TwinkleConfig::builder().fade_out_speed(0).build();
        assert_eq!(result, Err(ConfigError::ZeroFadeOut));
    }
}
