//! ## skyfade-propagation::random
//! **Stream-seedable random variables for shadowing draws**
//!
//! Each shadowing model owns exactly one random variable. Reproducible
//! runs partition an integer stream space across all variables in a
//! simulation: the external allocator hands out disjoint indices, and
//! [`RandomVariable::set_stream`] reseeds the variable from its index so
//! distinct indices yield distinct, bit-reproducible sample sequences.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

use crate::error::PropagationError;

/// Trait for random variables drawn once per power computation.
pub trait RandomVariable: Send {
    /// Draws the next sample, advancing the internal sequence state.
    fn value(&mut self) -> f64;

    /// Reseeds the variable from a deterministic stream index.
    ///
    /// Two variables given the same index produce identical sequences;
    /// disjoint indices produce independent ones. Until the first call
    /// the variable runs on an entropy seed and makes no
    /// reproducibility promise.
    fn set_stream(&mut self, stream: i64);
}

/// Gaussian random variable, parameterized in dB.
#[derive(Debug)]
pub struct NormalVariable {
    dist: Normal<f64>,
    rng: SmallRng,
}

impl NormalVariable {
    /// Zero-mean Gaussian with the given variance (dB²).
    ///
    /// Rejects a negative or non-finite variance at configuration time.
    pub fn new(mean_db: f64, variance_db2: f64) -> Result<Self, PropagationError> {
        if !mean_db.is_finite() {
            return Err(PropagationError::InvalidDistribution {
                distribution: "normal",
                reason: format!("mean must be finite, got {mean_db}"),
            });
        }
        if !variance_db2.is_finite() || variance_db2 < 0.0 {
            return Err(PropagationError::InvalidDistribution {
                distribution: "normal",
                reason: format!("variance must be non-negative and finite, got {variance_db2}"),
            });
        }
        let dist = Normal::new(mean_db, variance_db2.sqrt()).map_err(|e| {
            PropagationError::InvalidDistribution {
                distribution: "normal",
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            dist,
            rng: SmallRng::from_rng(&mut rand::rng()),
        })
    }
}

impl RandomVariable for NormalVariable {
    fn value(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }

    fn set_stream(&mut self, stream: i64) {
        self.rng = SmallRng::seed_from_u64(stream as u64);
    }
}

/// Uniform random variable over a closed interval.
#[derive(Debug)]
pub struct UniformVariable {
    dist: Uniform<f64>,
    rng: SmallRng,
}

impl UniformVariable {
    pub fn new(min: f64, max: f64) -> Result<Self, PropagationError> {
        let dist = Uniform::new_inclusive(min, max).map_err(|e| {
            PropagationError::InvalidDistribution {
                distribution: "uniform",
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            dist,
            rng: SmallRng::from_rng(&mut rand::rng()),
        })
    }
}

impl RandomVariable for UniformVariable {
    fn value(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }

    fn set_stream(&mut self, stream: i64) {
        self.rng = SmallRng::seed_from_u64(stream as u64);
    }
}

/// Degenerate variable returning the same value on every draw.
///
/// Useful for calibration runs and for pinning the shadowing term in
/// tests.
#[derive(Debug, Clone, Copy)]
pub struct ConstantVariable {
    value: f64,
}

impl ConstantVariable {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl RandomVariable for ConstantVariable {
    fn value(&mut self) -> f64 {
        self.value
    }

    fn set_stream(&mut self, _stream: i64) {}
}
