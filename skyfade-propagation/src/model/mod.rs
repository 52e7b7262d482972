//! ## skyfade-propagation::model
//! **Attenuation models and chain composition**
//!
//! A signal leaving a transmitter can pass through several independent
//! loss mechanisms before it reaches a receiver. Each mechanism is a
//! [`PropagationLossModel`]; linking models with [`set_next`] threads
//! one power value through the whole sequence, each hop attenuating in
//! the dB domain.
//!
//! ### Available Models:
//! - [`LogDistanceModel`]: deterministic power-law distance decay.
//! - [`LogNormalShadowingModel`]: the same decay plus a Gaussian-in-dB
//!   shadowing term drawn once per computation.
//!
//! Chain topology is fixed at setup. Composition order matters for
//! reproducibility: dB addition commutes, but reordering the chain
//! changes which random draws land where.
//!
//! [`set_next`]: PropagationLossModel::set_next

mod log_distance;
mod log_normal_shadowing;

pub use log_distance::{
    LogDistanceModel, DEFAULT_EXPONENT, DEFAULT_REFERENCE_DISTANCE_M, DEFAULT_REFERENCE_LOSS_DB,
};
pub use log_normal_shadowing::{
    LogNormalShadowingModel, DEFAULT_SHADOWING_MEAN_DB, DEFAULT_SHADOWING_VARIANCE_DB2,
};

use crate::mobility::MobilityModel;

/// Capability contract for a single attenuation mechanism.
///
/// Concrete models implement [`apply_loss`] (their own attenuation),
/// [`seed_streams`] (their own random-stream demand) and the link
/// accessors. The chained entry points [`calc_rx_power`] and
/// [`assign_streams`] are provided here once and are not overridden.
///
/// [`apply_loss`]: PropagationLossModel::apply_loss
/// [`seed_streams`]: PropagationLossModel::seed_streams
/// [`calc_rx_power`]: PropagationLossModel::calc_rx_power
/// [`assign_streams`]: PropagationLossModel::assign_streams
pub trait PropagationLossModel: Send {
    /// Received power in dBm after this model's own attenuation only.
    ///
    /// A pure function of the transmit power, the distance between `a`
    /// and `b`, and the model configuration — except that a model
    /// holding a random variable also advances its sequence state. The
    /// position inputs are never mutated.
    fn apply_loss(
        &mut self,
        tx_power_dbm: f64,
        a: &dyn MobilityModel,
        b: &dyn MobilityModel,
    ) -> f64;

    /// Seeds the random sources owned by this model itself, starting at
    /// `stream`. Returns the number of stream indices consumed: 0 for a
    /// deterministic model.
    fn seed_streams(&mut self, stream: i64) -> i64;

    /// Links `next` downstream of this model, replacing any previous
    /// link. Keeping links acyclic is the caller's responsibility;
    /// ownership of the successor makes cycles unconstructible in safe
    /// code.
    fn set_next(&mut self, next: Box<dyn PropagationLossModel>);

    /// The downstream model, if any. A model with no successor is the
    /// chain terminator.
    fn next(&self) -> Option<&dyn PropagationLossModel>;

    /// Mutable access to the downstream model, if any.
    fn next_mut(&mut self) -> Option<&mut (dyn PropagationLossModel + 'static)>;

    /// Received power in dBm after the whole chain starting here.
    ///
    /// Applies this model's own attenuation, then feeds the result as
    /// the transmit power of the next linked model.
    fn calc_rx_power(
        &mut self,
        tx_power_dbm: f64,
        a: &dyn MobilityModel,
        b: &dyn MobilityModel,
    ) -> f64 {
        let rx_power_dbm = self.apply_loss(tx_power_dbm, a, b);
        match self.next_mut() {
            Some(next) => next.calc_rx_power(rx_power_dbm, a, b),
            None => rx_power_dbm,
        }
    }

    /// Assigns disjoint random stream indices to this model and every
    /// model downstream, starting at `stream`.
    ///
    /// Returns the total number of indices consumed by the chain, not
    /// counting the caller's starting offset. Must run exactly once per
    /// simulation run, before any power computation; re-running it, or
    /// running it after computations began, breaks run-to-run
    /// determinism.
    fn assign_streams(&mut self, stream: i64) -> i64 {
        let mut current = stream;
        current += self.seed_streams(stream);
        if let Some(next) = self.next_mut() {
            current += next.assign_streams(current);
        }
        current - stream
    }
}

/// Assembles a loss chain front-to-back before simulation start.
///
/// Models are applied in push order: the first pushed model sees the
/// original transmit power, the last produces the final received power.
#[derive(Default)]
pub struct LossChainBuilder {
    models: Vec<Box<dyn PropagationLossModel>>,
}

impl LossChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a model to the end of the chain.
    pub fn push(mut self, model: Box<dyn PropagationLossModel>) -> Self {
        self.models.push(model);
        self
    }

    /// Links the pushed models and returns the chain head, or `None` if
    /// nothing was pushed.
    pub fn build(mut self) -> Option<Box<dyn PropagationLossModel>> {
        let mut head: Option<Box<dyn PropagationLossModel>> = None;
        while let Some(mut model) = self.models.pop() {
            if let Some(next) = head.take() {
                model.set_next(next);
            }
            head = Some(model);
        }
        head
    }
}

/// Path loss beyond the reference distance, dB: `10 · n · log10(d / d0)`.
fn path_loss_db(exponent: f64, distance: f64, reference_distance: f64) -> f64 {
    10.0 * exponent * (distance / reference_distance).log10()
}

/// Distance between two entities, checked against the provider contract.
///
/// A negative or non-finite distance means the mobility provider is
/// broken; failing fast here beats propagating NaN through the dB math.
fn checked_distance(a: &dyn MobilityModel, b: &dyn MobilityModel) -> f64 {
    let distance = a.distance_from(b);
    assert!(
        distance.is_finite() && distance >= 0.0,
        "distance provider returned an invalid distance: {distance}"
    );
    distance
}
