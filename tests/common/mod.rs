//! Shared test infrastructure for twinkle-engine integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use rand::SeedableRng;
use rand::rngs::SmallRng;
use twinkle_engine::{
    DirectionFlags, FlagEncoding, PaletteSchedule, RandomSource, Rgb8, RngSource,
    TimeDuration, TimeInstant, TimeSource, TwinkleConfig, TwinkleEngine, packed_len,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Random Source
// ============================================================================

/// Replays a fixed list of draws.
///
/// `random8` truncates the next draw to a byte, `random16_below` reduces it
/// modulo the limit. Once the script runs out every draw is `u16::MAX`, which
/// fails the ignition gate at any density.
pub struct ScriptedRandom {
    draws: heapless::Vec<u16, 64>,
    next: usize,
}

impl ScriptedRandom {
    pub fn new(draws: &[u16]) -> Self {
        Self {
            draws: heapless::Vec::from_slice(draws).unwrap(),
            next: 0,
        }
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.next
    }

    fn draw(&mut self) -> u16 {
        let value = self.draws.get(self.next).copied().unwrap_or(u16::MAX);
        self.next += 1;
        value
    }
}

impl RandomSource for ScriptedRandom {
    fn random8(&mut self) -> u8 {
        self.draw() as u8
    }

    fn random16_below(&mut self, limit: u16) -> u16 {
        if limit == 0 { 0 } else { self.draw() % limit }
    }
}

/// Deterministic generator for long randomized runs
pub fn seeded_rng(seed: u64) -> RngSource<SmallRng> {
    RngSource::new(SmallRng::seed_from_u64(seed))
}

// ============================================================================
// Engine Helpers
// ============================================================================

pub const NUM_LEDS: usize = 100;
pub const FLAG_BYTES: usize = packed_len(NUM_LEDS);

pub type Flags = DirectionFlags<NUM_LEDS, FLAG_BYTES>;

pub type TestEngine<'t, R> =
    TwinkleEngine<'t, TestInstant, MockTimeSource, R, Flags, [Rgb8; NUM_LEDS]>;

/// Both direction flag encodings, for running one test against each
pub const ENCODINGS: [FlagEncoding; 2] = [FlagEncoding::Dense, FlagEncoding::Packed];

/// Builds a 100 pixel engine over `leds` with the encoding taken from `config`
pub fn engine_with<R: RandomSource>(
    leds: [Rgb8; NUM_LEDS],
    rng: R,
    timer: &MockTimeSource,
    config: TwinkleConfig,
    schedule: PaletteSchedule,
) -> TestEngine<'_, R> {
    TwinkleEngine::new(
        leds,
        Flags::from_config(&config),
        rng,
        timer,
        config,
        schedule,
    )
    .unwrap()
}

/// Default tuning with the given flag encoding
pub fn config_for(encoding: FlagEncoding) -> TwinkleConfig {
    TwinkleConfig::builder()
        .flag_encoding(encoding)
        .build()
        .unwrap()
}

/// Indices of pixels that are not fully off
pub fn lit_pixels(leds: &[Rgb8]) -> heapless::Vec<usize, NUM_LEDS> {
    leds.iter()
        .enumerate()
        .filter(|(_, color)| !twinkle_engine::is_off(**color))
        .map(|(index, _)| index)
        .collect()
}
