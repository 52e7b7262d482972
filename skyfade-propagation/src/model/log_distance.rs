//! ## skyfade-propagation::model::log_distance
//! **Deterministic power-law distance decay**

use tracing::debug;

use super::{checked_distance, path_loss_db, PropagationLossModel};
use crate::error::PropagationError;
use crate::mobility::MobilityModel;

/// Default path loss exponent.
pub const DEFAULT_EXPONENT: f64 = 3.0;
/// Default reference distance, meters.
pub const DEFAULT_REFERENCE_DISTANCE_M: f64 = 1.0;
/// Default loss at the reference distance: free-space loss at 1 m for a
/// 5.15 GHz carrier, dB.
pub const DEFAULT_REFERENCE_LOSS_DB: f64 = 46.6777;

/// Log-distance path loss model.
///
/// Attenuation grows with the log of the distance:
/// `L = L0 + 10 · n · log10(d / d0)`, where `L0` is the loss at the
/// reference distance `d0` and `n` the path loss exponent. At or below
/// `d0` — including a zero distance — the loss is pinned to `L0` and the
/// logarithm is never evaluated.
pub struct LogDistanceModel {
    exponent: f64,
    reference_distance: f64,
    reference_loss: f64,
    next: Option<Box<dyn PropagationLossModel>>,
}

impl Default for LogDistanceModel {
    fn default() -> Self {
        Self {
            exponent: DEFAULT_EXPONENT,
            reference_distance: DEFAULT_REFERENCE_DISTANCE_M,
            reference_loss: DEFAULT_REFERENCE_LOSS_DB,
            next: None,
        }
    }
}

impl LogDistanceModel {
    pub fn new() -> Self {
        Self::default()
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
    ///
    /// The reference distance anchors the power-law formula and must be
    /// positive and finite.
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
}

impl PropagationLossModel for LogDistanceModel {
    fn apply_loss(
        &mut self,
        tx_power_dbm: f64,
        a: &dyn MobilityModel,
        b: &dyn MobilityModel,
    ) -> f64 {
        let distance = checked_distance(a, b);
        if distance <= self.reference_distance {
            return tx_power_dbm - self.reference_loss;
        }
        let path_loss_db = path_loss_db(self.exponent, distance, self.reference_distance);
        let coefficient_db = -self.reference_loss - path_loss_db;
        debug!(
            distance_m = distance,
            reference_attenuation_db = -self.reference_loss,
            coefficient_db,
            "log-distance attenuation"
        );
        tx_power_dbm + coefficient_db
    }

    fn seed_streams(&mut self, _stream: i64) -> i64 {
        0
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
