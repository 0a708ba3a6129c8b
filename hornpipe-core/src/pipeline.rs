use hornpipe_math::{Fixed, QFormat};

use crate::config::{ConfigError, EngineConfig};
use crate::StreamEvaluator;

/// One pipeline register set: the running Horner accumulator, the forwarded
/// delta (dx = x - x0) it will be multiplied by, and the validity flag that
/// travels with the sample.
///
/// Each stage's registers are read only by the immediately following stage,
/// and only its previous-step values. The last stage's `delta` is carried
/// but never read; keeping the record uniform keeps the update loop
/// branch-free.
#[derive(Debug, Clone, Copy, Default)]
struct Stage {
    delta: Fixed,
    acc: Fixed,
    valid: bool,
}

/// Pipelined Horner evaluator for P(x) = c_0 + c_1 dx + ... + c_N dx^N,
/// dx = x - x0.
///
/// Stage 0 computes dx and seeds the accumulator with c_N; each of the N
/// following stages performs one Horner step
/// `acc = sat_add(c_{N-i}, round_mul(dx, acc))` with exactly one step of
/// delay. A sample fed at step t is the output at step t + N + 1, and the
/// engine accepts one sample per step indefinitely (fully pipelined).
///
/// Degenerate N = 0: a single stage seeds c_0 and emits it one step later;
/// dx is computed but never consumed.
pub struct HornerEngine {
    format: QFormat,
    order: usize,
    x0: Fixed,
    coeffs: Vec<Fixed>,
    stages: Vec<Stage>,
}

impl HornerEngine {
    /// Build an engine from a validated configuration. All configuration
    /// errors surface here; `advance`/`output` cannot fail afterwards.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let stages = vec![Stage::default(); config.order + 1];
        Ok(HornerEngine {
            format: config.format,
            order: config.order,
            x0: config.x0,
            coeffs: config.coeffs,
            stages,
        })
    }

    /// Steps between a sample entering and its result becoming valid:
    /// order + 1.
    #[inline]
    pub fn latency(&self) -> usize {
        self.order + 1
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn format(&self) -> QFormat {
        self.format
    }
}

impl StreamEvaluator for HornerEngine {
    fn advance(&mut self, x: Fixed, present: bool) {
        let q = self.format;

        // Stages update highest-first so each reads its predecessor's
        // previous-step registers before they are overwritten. This is the
        // in-place equivalent of computing every next-state value first and
        // committing them together.
        for i in (1..=self.order).rev() {
            let prev = self.stages[i - 1];
            self.stages[i] = Stage {
                delta: prev.delta,
                acc: q.sat_add(self.coeffs[self.order - i], q.round_mul(prev.delta, prev.acc)),
                valid: prev.valid,
            };
        }

        // Stage 0 updates unconditionally every step; there is no stall.
        // An absent sample still occupies a pipeline slot as a bubble.
        self.stages[0] = Stage {
            delta: q.sat_add(x, q.sat_neg(self.x0)),
            acc: self.coeffs[self.order],
            valid: present,
        };
    }

    fn output(&self) -> (Fixed, bool) {
        let tail = self.stages[self.order];
        (tail.acc, tail.valid)
    }

    fn reset(&mut self) {
        for stage in &mut self.stages {
            *stage = Stage::default();
        }
    }
}
