//! Sixteen-stop color palettes.

use crate::color::{Rgb8, from_hex, nscale8, scale8};
use palette::Srgb;

/// How a palette index between two stops is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaletteBlend {
    /// Use the stop the index falls into, no interpolation.
    Direct,
    /// Interpolate linearly toward the next stop, wrapping from the last stop
    /// back to the first.
    Blended,
}

/// A palette of 16 evenly spaced color stops addressed by an 8-bit index.
///
/// The upper four bits of an index select the stop, the lower four bits the
/// position between that stop and the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette16 {
    stops: [Rgb8; 16],
}

impl Palette16 {
    /// Creates a palette from its stops.
    pub const fn new(stops: [Rgb8; 16]) -> Self {
        Self { stops }
    }

    /// Creates a palette from `0xRRGGBB` literals.
    pub const fn from_hex(hex: [u32; 16]) -> Self {
        let mut stops = [Srgb::new(0, 0, 0); 16];
        let mut i = 0;
        while i < 16 {
            stops[i] = from_hex(hex[i]);
            i += 1;
        }
        Self { stops }
    }

    /// Creates a palette with every stop set to `color`.
    pub const fn solid(color: Rgb8) -> Self {
        Self { stops: [color; 16] }
    }

    /// Returns all stops in order.
    pub fn stops(&self) -> &[Rgb8; 16] {
        &self.stops
    }

    /// Returns stop `index`, or `None` past the last stop.
    pub fn stop(&self, index: usize) -> Option<Rgb8> {
        self.stops.get(index).copied()
    }

    /// Looks up the color at `index`, scaled to `brightness`.
    ///
    /// A brightness of 255 returns the palette color untouched.
    pub fn color_at(&self, index: u8, brightness: u8, blend: PaletteBlend) -> Rgb8 {
        let hi = usize::from(index >> 4);
        let lo = index & 0x0F;
        let base = self.stops[hi];

        let color = match blend {
            PaletteBlend::Blended if lo != 0 => {
                let next = self.stops[(hi + 1) % 16];
                let toward_next = lo << 4;
                let toward_base = 255 - toward_next;
                Srgb::new(
                    mix8(base.red, next.red, toward_base, toward_next),
                    mix8(base.green, next.green, toward_base, toward_next),
                    mix8(base.blue, next.blue, toward_base, toward_next),
                )
            }
            _ => base,
        };

        if brightness == u8::MAX {
            color
        } else {
            nscale8(color, brightness)
        }
    }
}

#[inline]
fn mix8(a: u8, b: u8, weight_a: u8, weight_b: u8) -> u8 {
    scale8(a, weight_a).saturating_add(scale8(b, weight_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, GREEN, RED, WHITE};

    fn two_tone() -> Palette16 {
        let mut stops = [BLACK; 16];
        stops[0] = WHITE;
        stops[1] = RED;
        Palette16::new(stops)
    }

    #[test]
    fn direct_lookup_ignores_low_nibble() {
        let palette = two_tone();
        assert_eq!(palette.color_at(0x00, 255, PaletteBlend::Direct), WHITE);
        assert_eq!(palette.color_at(0x0F, 255, PaletteBlend::Direct), WHITE);
        assert_eq!(palette.color_at(0x10, 255, PaletteBlend::Direct), RED);
    }

    #[test]
    fn blended_lookup_moves_toward_next_stop() {
        let palette = two_tone();
        let halfway = palette.color_at(0x08, 255, PaletteBlend::Blended);
        assert_eq!(halfway.red, 255);
        assert!(halfway.green > 100 && halfway.green < 160);
        assert_eq!(halfway.green, halfway.blue);
    }

    #[test]
    fn blended_lookup_wraps_last_stop() {
        let palette = two_tone();
        let wrapped = palette.color_at(0xF8, 255, PaletteBlend::Blended);
        assert!(wrapped.red > 0 && wrapped.red < 255);
    }

    #[test]
    fn brightness_scales_result() {
        let palette = Palette16::solid(WHITE);
        assert_eq!(
            palette.color_at(0x42, 64, PaletteBlend::Direct),
            Srgb::new(64, 64, 64)
        );
        assert_eq!(palette.color_at(0x42, 0, PaletteBlend::Direct), BLACK);

        let green = Palette16::solid(GREEN);
        assert_eq!(
            green.color_at(0x00, 64, PaletteBlend::Direct),
            Srgb::new(0, 32, 0)
        );
    }

    #[test]
    fn from_hex_matches_new() {
        let palette = Palette16::from_hex([0xFF0000; 16]);
        assert_eq!(palette, Palette16::solid(RED));
        assert_eq!(palette.stop(15), Some(RED));
        assert_eq!(palette.stop(16), None);
    }
}
