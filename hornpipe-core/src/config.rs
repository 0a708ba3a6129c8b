use hornpipe_math::{Fixed, FormatError, QFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("polynomial order {order} exceeds max_order {max_order}")]
    OrderTooHigh { order: usize, max_order: usize },
    #[error("coefficient table holds {got} entries, expected max_order + 1 = {expected}")]
    CoefficientCount { expected: usize, got: usize },
    #[error("fixed-point format error: {0}")]
    Format(#[from] FormatError),
}

/// Engine configuration: everything the pipeline needs, fixed for its
/// lifetime.
///
/// `coeffs[k]` holds c_k, the k-th Taylor coefficient of the target function
/// around `x0`, in the interchange encoding `raw = round(c_k * 2^F)`. The
/// table is sized `max_order + 1`; entries above `order` are padding and are
/// never read during evaluation.
///
/// Serializable so externally prepared tables can be loaded as-is; a
/// deserialized config goes through the same [`EngineConfig::validate`] as a
/// hand-built one when the engine is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub format: QFormat,
    pub order: usize,
    pub max_order: usize,
    pub x0: Fixed,
    pub coeffs: Vec<Fixed>,
}

impl EngineConfig {
    /// Check the whole configuration. Runs once, at engine construction;
    /// nothing is re-checked per step.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Re-derive the format so a config that bypassed QFormat::new
        // (e.g. deserialized from a file) is held to the same rules.
        QFormat::new(self.format.width(), self.format.frac())?;

        if self.order > self.max_order {
            return Err(ConfigError::OrderTooHigh {
                order: self.order,
                max_order: self.max_order,
            });
        }
        let expected = self.max_order + 1;
        if self.coeffs.len() != expected {
            return Err(ConfigError::CoefficientCount {
                expected,
                got: self.coeffs.len(),
            });
        }
        Ok(())
    }
}
