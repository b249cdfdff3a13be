//! Random number abstraction for ignition draws.

use rand_core::RngCore;

/// Trait for abstracting random number sources.
///
/// The engine draws an 8-bit value to gate each ignition attempt, a bounded
/// 16-bit value to pick the pixel and another 8-bit value for the palette
/// index. Seeding is left to the implementation.
pub trait RandomSource {
    /// Uniform value in `0..=255`.
    fn random8(&mut self) -> u8;

    /// Uniform value in `0..limit`. Returns 0 when `limit` is 0.
    fn random16_below(&mut self, limit: u16) -> u16;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn random8(&mut self) -> u8 {
        (**self).random8()
    }

    fn random16_below(&mut self, limit: u16) -> u16 {
        (**self).random16_below(limit)
    }
}

/// Adapts any [`RngCore`] generator to [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    /// Wraps a seeded generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the wrapped generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    #[inline]
    fn random8(&mut self) -> u8 {
        (self.rng.next_u32() >> 24) as u8
    }

    #[inline]
    fn random16_below(&mut self, limit: u16) -> u16 {
        // Multiply-shift keeps the draw uniform without a modulo.
        let draw = self.rng.next_u32() >> 16;
        ((draw * u32::from(limit)) >> 16) as u16
    }
}
