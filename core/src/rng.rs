//! Random Number Generator.

use crate::geometry::Point2f;
use crate::pbrt::*;

/// 32-bit precision value for 1 - epsilon.
pub const FLOAT_ONE_MINUS_EPSILON: f32 = hexf32!("0x1.fffffep-1"); // 0.99999994

/// 1 - epsilon in the precision we've selected for `Float`.
pub const ONE_MINUS_EPSILON: Float = FLOAT_ONE_MINUS_EPSILON;

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// Implements the pseudo-random number generator.
#[derive(Clone)]
pub struct RNG {
    state: u64,
    inc: u64,
}

impl Default for RNG {
    /// Return a new instance of `RNG` with default state and stream.
    fn default() -> Self {
        Self {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
}

impl RNG {
    /// Create a new `RNG` by seeding it with the given starting sequence.
    ///
    /// * `sequence_index` - The starting sequence to seed with.
    pub fn new(sequence_index: u64) -> Self {
        Self::new_with_seed(0, sequence_index)
    }

    /// Create a new `RNG` for one of many independent streams of a seeded
    /// run. Equal `(seed, sequence_index)` pairs always produce the same
    /// sequence of values.
    ///
    /// * `seed`           - The run seed.
    /// * `sequence_index` - The stream to select (photon or tile index).
    pub fn new_with_seed(seed: u64, sequence_index: u64) -> Self {
        let mut ret = Self { state: 0, inc: 0 };
        ret.set_sequence(PCG32_DEFAULT_STATE.wrapping_add(seed), sequence_index);
        ret
    }

    /// Initialize the random number generator sequence.
    ///
    /// * `init_state` - The starting state.
    /// * `init_seq`   - The starting sequence to seed with.
    #[inline(always)]
    fn set_sequence(&mut self, init_state: u64, init_seq: u64) {
        self.state = 0;
        let (inc, _) = init_seq.overflowing_shl(1);
        self.inc = inc | 1;
        let _ = self.uniform_u32();

        let (state, _) = self.state.overflowing_add(init_state);
        self.state = state;
        let _ = self.uniform_u32();
    }

    /// Returns a uniformly distributed u32 value.
    #[inline(always)]
    pub fn uniform_u32(&mut self) -> u32 {
        let old_state = self.state;
        let (new_state, _) = old_state.overflowing_mul(PCG32_MULT);
        let (new_state, _) = new_state.overflowing_add(self.inc);
        self.state = new_state;

        let (xor_shifted, _) = old_state.overflowing_shr(18);
        let (xor_shifted, _) = (xor_shifted ^ old_state).overflowing_shr(27);
        let xor_shifted = xor_shifted as u32;

        let (rot, _) = old_state.overflowing_shr(59);
        let rot = rot as u32;

        let (r1, _) = xor_shifted.overflowing_shr(rot);
        let (bits, _) = (!rot).overflowing_add(1);
        let (r2, _) = xor_shifted.overflowing_shl(bits & 31);

        r1 | r2
    }

    /// Returns a uniformly distributed value over the half open interval [0.0, 1.0).
    pub fn uniform_float(&mut self) -> Float {
        min(
            self.uniform_u32() as Float * hexf32!("0x1.0p-32") as Float,
            FLOAT_ONE_MINUS_EPSILON,
        )
    }

    /// Returns a 2-D sample with both coordinates in [0.0, 1.0).
    pub fn uniform_point2f(&mut self) -> Point2f {
        let x = self.uniform_float();
        let y = self.uniform_float();
        Point2f::new(x, y)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
