//! # hornpipe-math
//!
//! Deterministic signed Q(W.F) fixed-point arithmetic for the hornpipe
//! polynomial evaluator.
//!
//! This crate provides [`QFormat`] — a runtime-validated fixed-point format
//! (total width W, fractional width F) — and [`Fixed`], an immutable raw
//! value in that format. All arithmetic is saturating or bounded-error by
//! policy: sums clamp at the format extremes instead of wrapping, and the
//! multiply rounds half-up with at most 0.5 LSB of error, so a pipeline of
//! these operations never diverges through wraparound or one-sided bias.
//!
//! Interchange encoding: `raw = round(value * 2^F)`, `value = raw / 2^F`,
//! two's complement in W bits. Externally prepared coefficient tables must
//! use exactly this encoding.

pub mod format;
pub mod ops;

pub use format::{Fixed, FormatError, QFormat, MAX_WIDTH};
