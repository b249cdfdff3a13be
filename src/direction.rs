//! Per-pixel fade direction storage.
//!
//! Each pixel carries a single flag saying whether it is currently getting
//! brighter or darker. [`DirectionStore`] hides how those flags are laid out in
//! memory so the engine does not care which encoding is in use:
//!
//! - [`DenseDirections`] spends one `bool` per pixel.
//! - [`PackedDirections`] spends one bit per pixel, an 8x reduction paid for
//!   with a shift and a mask on every access.
//!
//! [`DirectionFlags`] wraps both so the encoding can be picked at runtime from
//! [`FlagEncoding`], typically the one named in a [`TwinkleConfig`].

use crate::config::TwinkleConfig;

/// Fade direction of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Fading toward black.
    Darkening,
    /// Fading up toward saturation.
    Brightening,
}

impl From<bool> for Direction {
    fn from(brightening: bool) -> Self {
        if brightening {
            Direction::Brightening
        } else {
            Direction::Darkening
        }
    }
}

impl From<Direction> for bool {
    fn from(direction: Direction) -> Self {
        direction == Direction::Brightening
    }
}

/// Physical layout used for direction flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlagEncoding {
    /// One storage unit per pixel.
    Dense,
    /// One bit per pixel.
    #[default]
    Packed,
}

/// Number of bytes needed to pack `pixels` direction flags.
#[inline]
pub const fn packed_len(pixels: usize) -> usize {
    pixels.div_ceil(8)
}

/// Storage for one [`Direction`] per pixel.
///
/// Indices must be below [`capacity`](DirectionStore::capacity). Implementations
/// index their backing arrays directly and panic on out-of-range access.
pub trait DirectionStore {
    /// Number of pixels this store can hold a flag for.
    fn capacity(&self) -> usize;

    /// Layout the flags are kept in.
    fn encoding(&self) -> FlagEncoding;

    /// Returns the stored direction for pixel `index`.
    fn get(&self, index: usize) -> Direction;

    /// Overwrites the stored direction for pixel `index`.
    fn set(&mut self, index: usize, direction: Direction);
}

/// One `bool` per pixel.
#[derive(Debug, Clone)]
pub struct DenseDirections<const N: usize> {
    flags: [bool; N],
}

impl<const N: usize> DenseDirections<N> {
    /// Creates a store with every pixel brightening.
    pub const fn new() -> Self {
        Self { flags: [true; N] }
    }
}

impl<const N: usize> Default for DenseDirections<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DirectionStore for DenseDirections<N> {
    #[inline]
    fn capacity(&self) -> usize {
        N
    }

    #[inline]
    fn encoding(&self) -> FlagEncoding {
        FlagEncoding::Dense
    }

    #[inline]
    fn get(&self, index: usize) -> Direction {
        self.flags[index].into()
    }

    #[inline]
    fn set(&mut self, index: usize, direction: Direction) {
        self.flags[index] = direction.into();
    }
}

/// One bit per pixel, eight pixels per byte.
///
/// Pixel `i` lives in byte `i / 8` at bit `i % 8`. Size `BYTES` with
/// [`packed_len`].
#[derive(Debug, Clone)]
pub struct PackedDirections<const BYTES: usize> {
    bits: [u8; BYTES],
}

impl<const BYTES: usize> PackedDirections<BYTES> {
    /// Creates a store with every pixel brightening.
    pub const fn new() -> Self {
        Self {
            bits: [0xFF; BYTES],
        }
    }

    /// Raw backing bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }
}

impl<const BYTES: usize> Default for PackedDirections<BYTES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const BYTES: usize> DirectionStore for PackedDirections<BYTES> {
    #[inline]
    fn capacity(&self) -> usize {
        BYTES * 8
    }

    #[inline]
    fn encoding(&self) -> FlagEncoding {
        FlagEncoding::Packed
    }

    #[inline]
    fn get(&self, index: usize) -> Direction {
        let mask = 1u8 << (index & 0x07);
        (self.bits[index / 8] & mask != 0).into()
    }

    #[inline]
    fn set(&mut self, index: usize, direction: Direction) {
        let mask = 1u8 << (index & 0x07);
        let byte = &mut self.bits[index / 8];
        match direction {
            Direction::Brightening => *byte |= mask,
            Direction::Darkening => *byte &= !mask,
        }
    }
}

/// Direction store whose encoding is chosen at runtime.
///
/// Both variants are stored inline, so this type is as large as the dense
/// encoding. Use [`PackedDirections`] directly when memory is what matters.
#[derive(Debug, Clone)]
pub enum DirectionFlags<const N: usize, const BYTES: usize> {
    Dense(DenseDirections<N>),
    Packed(PackedDirections<BYTES>),
}

impl<const N: usize, const BYTES: usize> DirectionFlags<N, BYTES> {
    /// Creates an all-brightening store with the requested layout.
    pub const fn new(encoding: FlagEncoding) -> Self {
        match encoding {
            FlagEncoding::Dense => DirectionFlags::Dense(DenseDirections::new()),
            FlagEncoding::Packed => DirectionFlags::Packed(PackedDirections::new()),
        }
    }

    /// Creates an all-brightening store with the layout `config` asks for.
    pub const fn from_config(config: &TwinkleConfig) -> Self {
        Self::new(config.flag_encoding)
    }
}

impl<const N: usize, const BYTES: usize> DirectionStore for DirectionFlags<N, BYTES> {
    fn capacity(&self) -> usize {
        match self {
            DirectionFlags::Dense(store) => store.capacity(),
            DirectionFlags::Packed(store) => store.capacity(),
        }
    }

    fn encoding(&self) -> FlagEncoding {
        match self {
            DirectionFlags::Dense(_) => FlagEncoding::Dense,
            DirectionFlags::Packed(_) => FlagEncoding::Packed,
        }
    }

    fn get(&self, index: usize) -> Direction {
        match self {
            DirectionFlags::Dense(store) => store.get(index),
            DirectionFlags::Packed(store) => store.get(index),
        }
    }

    fn set(&mut self, index: usize, direction: Direction) {
        match self {
            DirectionFlags::Dense(store) => store.set(index, direction),
            DirectionFlags::Packed(store) => store.set(index, direction),
        }
    }
}

impl<S: DirectionStore + ?Sized> DirectionStore for &mut S {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn encoding(&self) -> FlagEncoding {
        (**self).encoding()
    }

    fn get(&self, index: usize) -> Direction {
        (**self).get(index)
    }

    fn set(&mut self, index: usize, direction: Direction) {
        (**self).set(index, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_len_rounds_up() {
        assert_eq!(packed_len(0), 0);
        assert_eq!(packed_len(1), 1);
        assert_eq!(packed_len(8), 1);
        assert_eq!(packed_len(9), 2);
        assert_eq!(packed_len(100), 13);
    }

    #[test]
    fn packed_store_touches_only_its_bit() {
        let mut store = PackedDirections::<2>::new();
        store.set(9, Direction::Darkening);
        assert_eq!(store.as_bytes(), &[0xFF, 0xFD]);
        store.set(9, Direction::Brightening);
        assert_eq!(store.as_bytes(), &[0xFF, 0xFF]);
    }

    #[test]
    fn set_is_idempotent() {
        let mut store = PackedDirections::<1>::new();
        store.set(3, Direction::Darkening);
        store.set(3, Direction::Darkening);
        assert_eq!(store.get(3), Direction::Darkening);
        assert_eq!(store.as_bytes(), &[0xF7]);
    }

    #[test]
    fn runtime_selection_reports_encoding() {
        let dense = DirectionFlags::<10, 2>::new(FlagEncoding::Dense);
        let packed = DirectionFlags::<10, 2>::new(FlagEncoding::Packed);
        assert_eq!(dense.encoding(), FlagEncoding::Dense);
        assert_eq!(packed.encoding(), FlagEncoding::Packed);
        assert_eq!(dense.capacity(), 10);
        assert_eq!(packed.capacity(), 16);
    }

    #[test]
    fn from_config_follows_flag_encoding() {
        let config = TwinkleConfig::builder()
            .flag_encoding(FlagEncoding::Dense)
            .build()
            .unwrap();
        let flags = DirectionFlags::<10, 2>::from_config(&config);
        assert_eq!(flags.encoding(), FlagEncoding::Dense);

        let flags = DirectionFlags::<10, 2>::from_config(&TwinkleConfig::default());
        assert_eq!(flags.encoding(), FlagEncoding::Packed);
    }

    #[test]
    fn bool_conversion() {
        assert_eq!(Direction::from(true), Direction::Brightening);
        assert!(!bool::from(Direction::Darkening));
    }
}
