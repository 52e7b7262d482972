//! ## skyfade-propagation::model::log_normal_shadowing
//! **Power-law decay with a log-normal shadowing term**
//!
//! Obstruction and scattering make the received power fluctuate around
//! the deterministic log-distance value. The fluctuation is log-normal:
//! Gaussian when expressed in dB, so it enters the formula as one
//! additive sample per computation.

use tracing::debug;

use super::{checked_distance, path_loss_db, PropagationLossModel};
use super::{DEFAULT_EXPONENT, DEFAULT_REFERENCE_DISTANCE_M, DEFAULT_REFERENCE_LOSS_DB};
use crate::error::PropagationError;
use crate::mobility::MobilityModel;
use crate::random::{NormalVariable, RandomVariable};

/// Default shadowing mean, dB.
pub const DEFAULT_SHADOWING_MEAN_DB: f64 = 0.0;
/// Default shadowing variance, dB².
pub const DEFAULT_SHADOWING_VARIANCE_DB2: f64 = 2.0;

/// Log-normal shadowing path loss model.
///
/// Shares the log-distance formula and its reference-zone policy, and
/// adds one shadowing sample `X` per computation beyond the reference
/// distance:
/// `rx = tx − L0 − 10 · n · log10(d / d0) + X`.
///
/// At or below the reference distance the loss is pinned to `L0` and no
/// sample is drawn, so the reference zone consumes no randomness.
///
/// The model owns its random variable exclusively; it is deliberately
/// not `Clone`, since two models sharing one sample sequence would
/// couple their draws.
pub struct LogNormalShadowingModel {
    exponent: f64,
    reference_distance: f64,
    reference_loss: f64,
    variable: Box<dyn RandomVariable>,
    next: Option<Box<dyn PropagationLossModel>>,
}

impl Default for LogNormalShadowingModel {
    fn default() -> Self {
        Self::new()
    }
}

impl LogNormalShadowingModel {
    /// Model with the default zero-mean, variance-2 dB² Gaussian
    /// shadowing.
    pub fn new() -> Self {
        let variable =
            NormalVariable::new(DEFAULT_SHADOWING_MEAN_DB, DEFAULT_SHADOWING_VARIANCE_DB2)
                .expect("default shadowing distribution is valid");
        Self::with_variable(Box::new(variable))
    }

    /// Model drawing shadowing samples from `variable`.
    pub fn with_variable(variable: Box<dyn RandomVariable>) -> Self {
        Self {
            exponent: DEFAULT_EXPONENT,
            reference_distance: DEFAULT_REFERENCE_DISTANCE_M,
            reference_loss: DEFAULT_REFERENCE_LOSS_DB,
            variable,
            next: None,
        }
    }

    /// Sets the path loss exponent.
    pub fn set_path_loss_exponent(&mut self, n: f64) {
        self.exponent = n;
    }

    /// The current path loss exponent.
    pub fn path_loss_exponent(&self) -> f64 {
        self.exponent
    }

    /// Sets the reference distance (m) and the loss measured there (dB).
    pub fn set_reference(
        &mut self,
        reference_distance: f64,
        reference_loss: f64,
    ) -> Result<(), PropagationError> {
        if !reference_distance.is_finite() || reference_distance <= 0.0 {
            return Err(PropagationError::InvalidReferenceDistance(
                reference_distance,
            ));
        }
        self.reference_distance = reference_distance;
        self.reference_loss = reference_loss;
        Ok(())
    }

    /// Replaces the shadowing distribution.
    pub fn set_variable(&mut self, variable: Box<dyn RandomVariable>) {
        self.variable = variable;
    }
}

impl PropagationLossModel for LogNormalShadowingModel {
    fn apply_loss(
        &mut self,
        tx_power_dbm: f64,
        a: &dyn MobilityModel,
        b: &dyn MobilityModel,
    ) -> f64 {
        let distance = checked_distance(a, b);
        if distance <= self.reference_distance {
            // Reference zone: pinned loss, no shadowing draw.
            return tx_power_dbm - self.reference_loss;
        }
        let path_loss_db = path_loss_db(self.exponent, distance, self.reference_distance);
        let coefficient_db = -self.reference_loss - path_loss_db;
        let shadowing_db = self.variable.value();
        debug!(
            distance_m = distance,
            reference_attenuation_db = -self.reference_loss,
            coefficient_db,
            shadowing_db,
            "log-normal shadowing attenuation"
        );
        tx_power_dbm + coefficient_db + shadowing_db
    }

    fn seed_streams(&mut self, stream: i64) -> i64 {
        // One stream-generating object owned by this model.
        self.variable.set_stream(stream);
        1
    }

    fn set_next(&mut self, next: Box<dyn PropagationLossModel>) {
        self.next = Some(next);
    }

    fn next(&self) -> Option<&dyn PropagationLossModel> {
        self.next.as_deref()
    }

    fn next_mut(&mut self) -> Option<&mut (dyn PropagationLossModel + 'static)> {
        self.next.as_deref_mut()
    }
}
