use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest supported total width.
///
/// The raw value is backed by `i64`; one bit is reserved so the W+1-bit wide
/// sum used by the saturating add, and the saturating `from_f64` encode, can
/// never overflow the container itself.
pub const MAX_WIDTH: u32 = 62;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("total width {0} outside supported range 1..=62")]
    WidthOutOfRange(u32),
    #[error("fractional width {frac} must be strictly less than total width {width}")]
    FracTooWide { frac: u32, width: u32 },
}

/// A signed fixed-point value: a W-bit two's-complement integer with an
/// implicit scale of 2^-F, held sign-extended in an `i64`.
///
/// `Fixed` is a plain raw value; the format it belongs to lives in the
/// surrounding [`QFormat`] (or engine configuration), the same way a buffer
/// of Q8.23 words carries its format out-of-band. Every operation produces a
/// new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixed {
    pub raw: i64,
}

impl Fixed {
    pub const ZERO: Fixed = Fixed { raw: 0 };

    /// Wrap an already-sign-extended raw integer. The caller is responsible
    /// for the value being representable in the intended format; use
    /// [`QFormat::wrap`] when it might not be.
    #[inline]
    pub fn from_raw(raw: i64) -> Self {
        Fixed { raw }
    }
}

/// Runtime Q-format descriptor: total width `W` and fractional width `F`,
/// representing values `raw / 2^F` with `raw` a signed W-bit integer.
///
/// Range: `[-2^(W-1) / 2^F, (2^(W-1) - 1) / 2^F]`. Precision: `2^-F`.
/// Validated once at construction; arithmetic methods assume a valid format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QFormat {
    width: u32,
    frac: u32,
}

impl QFormat {
    /// Validate and build a format. `1 <= width <= MAX_WIDTH`, `frac < width`.
    pub fn new(width: u32, frac: u32) -> Result<Self, FormatError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(FormatError::WidthOutOfRange(width));
        }
        if frac >= width {
            return Err(FormatError::FracTooWide { frac, width });
        }
        Ok(QFormat { width, frac })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn frac(&self) -> u32 {
        self.frac
    }

    /// 2^F, the number of raw steps per unit.
    #[inline]
    pub fn scale(&self) -> i64 {
        1i64 << self.frac
    }

    /// Largest representable raw value, `2^(W-1) - 1`.
    #[inline]
    pub fn max_raw(&self) -> i64 {
        (1i64 << (self.width - 1)) - 1
    }

    /// Smallest representable raw value, `-2^(W-1)`.
    #[inline]
    pub fn min_raw(&self) -> i64 {
        -(1i64 << (self.width - 1))
    }

    /// Reduce a wide intermediate to this format: keep the low W bits and
    /// sign-extend. This is the truncating bit-field extraction used by the
    /// rounding multiply, not a saturating clamp.
    #[inline]
    pub fn wrap(&self, wide: i128) -> Fixed {
        let mask: u128 = (1u128 << self.width) - 1;
        let bits = (wide as u128) & mask;
        let raw = if bits >> (self.width - 1) & 1 == 1 {
            (bits | !mask) as i128 as i64
        } else {
            bits as i64
        };
        Fixed { raw }
    }

    /// Encode a float with deterministic round-to-nearest, saturating at the
    /// format extremes. This is the boundary conversion for externally
    /// prepared values; the evaluation core itself never touches floats.
    pub fn from_f64(&self, value: f64) -> Fixed {
        let scaled = value * self.scale() as f64;
        let raw = if scaled >= self.max_raw() as f64 {
            self.max_raw()
        } else if scaled <= self.min_raw() as f64 {
            self.min_raw()
        } else {
            scaled.round() as i64
        };
        Fixed { raw }
    }

    /// Decode back to float: `raw / 2^F`.
    #[inline]
    pub fn to_f64(&self, v: Fixed) -> f64 {
        v.raw as f64 / self.scale() as f64
    }
}
