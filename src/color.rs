//! 8-bit color math for frame buffer pixels.
//!
//! Pixels are stored as `Srgb<u8>`. Fades are fixed-point: a scale of `s`
//! multiplies a channel by `(s + 1) / 256`, so `255` is the identity and `0`
//! clears every channel.

use palette::Srgb;

/// A pixel color as stored in the frame buffer.
pub type Rgb8 = Srgb<u8>;

pub const BLACK: Rgb8 = Srgb::new(0, 0, 0);
pub const WHITE: Rgb8 = Srgb::new(255, 255, 255);
pub const RED: Rgb8 = Srgb::new(255, 0, 0);
/// HTML green (`#008000`), not full-intensity green.
pub const GREEN: Rgb8 = Srgb::new(0, 128, 0);
pub const BLUE: Rgb8 = Srgb::new(0, 0, 255);

/// Builds a color from a `0xRRGGBB` literal.
#[inline]
pub const fn from_hex(hex: u32) -> Rgb8 {
    Srgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Scales a single channel by `scale / 256`, rounding so that 255 is lossless.
#[inline]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Scales all three channels by the same fraction.
#[inline]
pub fn nscale8(color: Rgb8, scale: u8) -> Rgb8 {
    Srgb::new(
        scale8(color.red, scale),
        scale8(color.green, scale),
        scale8(color.blue, scale),
    )
}

/// Adds `color` scaled by `step` back onto itself, clamping each channel at 255.
///
/// The increment is proportional to the current color, so the hue is kept
/// while the pixel gets brighter. An off pixel stays off.
#[inline]
pub fn brighten(color: Rgb8, step: u8) -> Rgb8 {
    let increment = nscale8(color, step);
    Srgb::new(
        color.red.saturating_add(increment.red),
        color.green.saturating_add(increment.green),
        color.blue.saturating_add(increment.blue),
    )
}

/// Scales `color` down by `(255 - step) / 255`.
///
/// For any non-zero `step` every lit channel strictly decreases, so repeated
/// darkening always reaches [`BLACK`].
#[inline]
pub fn darken(color: Rgb8, step: u8) -> Rgb8 {
    nscale8(color, 255 - step)
}

/// True when every channel is exactly zero.
///
/// Near-black colors such as `(0, 0, 1)` are lit.
#[inline]
pub fn is_off(color: Rgb8) -> bool {
    color.red == 0 && color.green == 0 && color.blue == 0
}

/// True when any channel sits at the maximum intensity.
#[inline]
pub fn is_saturated(color: Rgb8) -> bool {
    color.red == u8::MAX || color.green == u8::MAX || color.blue == u8::MAX
}
