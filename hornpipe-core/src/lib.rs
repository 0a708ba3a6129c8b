//! # hornpipe-core
//!
//! Step-driven pipelined evaluation of truncated Taylor polynomials over
//! signed fixed-point numbers.
//!
//! Key types:
//! - [`EngineConfig`]: format, order, expansion point and coefficient table,
//!   validated once at construction
//! - [`HornerEngine`]: ORDER+1 pipeline stages of Horner's method, one
//!   sample in and one `(value, valid)` pair out per step, fixed latency
//!   of ORDER+1 steps
//! - [`StreamEvaluator`]: the trait seam drivers and round-robin schedulers
//!   program against
//!
//! The engine advances only on an explicit [`StreamEvaluator::advance`] call
//! (one call = one clock). `&mut self` makes the single-caller contract a
//! compile-time fact; independent engines share no state and may run on
//! separate threads freely.

pub mod config;
pub mod pipeline;

pub use config::{ConfigError, EngineConfig};
pub use pipeline::HornerEngine;

use hornpipe_math::Fixed;

/// Step-driven streaming evaluator.
///
/// One `advance` consumes exactly one input sample and retires exactly one
/// output; `output` is a pure query of the current tail state and may be
/// called any number of times between steps. Neither can fail on a validly
/// constructed evaluator: out-of-range arithmetic saturates and rounding
/// error is bounded, both by policy.
pub trait StreamEvaluator {
    /// Feed one sample. `present = false` inserts a bubble that flows
    /// through the pipeline and emerges as a `valid = false` output with the
    /// same latency as a real sample.
    fn advance(&mut self, x: Fixed, present: bool);

    /// Most recently completed result and whether it corresponds to a real
    /// input (as opposed to pipeline fill or a bubble).
    fn output(&self) -> (Fixed, bool);

    /// Return all stage state to the zero/idle reset value.
    fn reset(&mut self);
}
