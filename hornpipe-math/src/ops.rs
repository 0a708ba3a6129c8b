use super::{Fixed, QFormat};

impl QFormat {
    /// Saturating addition.
    ///
    /// The sum is formed with one bit of headroom (raws are sign-extended
    /// W-bit values in an i64, W <= 62, so `a + b` cannot overflow the
    /// container) and clamped to `[min_raw, max_raw]`. A clamped result
    /// always has the sign of the true mathematical sum; wraparound never
    /// occurs.
    #[inline]
    pub fn sat_add(&self, a: Fixed, b: Fixed) -> Fixed {
        let sum = a.raw + b.raw;
        Fixed::from_raw(sum.clamp(self.min_raw(), self.max_raw()))
    }

    /// Saturating negation: `-min_raw` is not representable, so it clamps to
    /// `max_raw`. Everything else negates exactly.
    #[inline]
    pub fn sat_neg(&self, a: Fixed) -> Fixed {
        if a.raw == self.min_raw() {
            Fixed::from_raw(self.max_raw())
        } else {
            Fixed::from_raw(-a.raw)
        }
    }

    /// Rounding multiply: full-precision signed product, round-half-up at
    /// the 2^-F boundary, then extract bits [W+F-1 : F].
    ///
    /// The product of two W-bit raws needs at most 2W bits (<= 124), so the
    /// i128 intermediate is exact. Adding the 2^(F-1) bias before the
    /// arithmetic shift makes the result the nearest representable value,
    /// ties toward +inf: absolute error vs. the true product is <= 0.5 LSB.
    /// Plain truncation would instead lose up to a full LSB, always in the
    /// negative direction, and that one-sided error compounds across
    /// pipeline stages. With F = 0 the bias is zero and this is an exact
    /// integer multiply (modulo the W-bit extraction).
    #[inline]
    pub fn round_mul(&self, a: Fixed, b: Fixed) -> Fixed {
        let product = a.raw as i128 * b.raw as i128;
        let biased = if self.frac() > 0 {
            product + (1i128 << (self.frac() - 1))
        } else {
            product
        };
        self.wrap(biased >> self.frac())
    }
}
