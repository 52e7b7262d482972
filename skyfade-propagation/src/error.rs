use thiserror::Error;

/// Configuration-time errors for propagation models and random
/// variables.
///
/// The power formulas themselves have no error path: any finite,
/// non-negative distance is a defined input. Everything that can go
/// wrong is rejected synchronously while the simulation is being set up.
#[derive(Debug, Error)]
pub enum PropagationError {
    /// The reference distance anchoring the power-law formula must be
    /// positive and finite.
    #[error("reference distance must be positive and finite, got {0}")]
    InvalidReferenceDistance(f64),

    /// A random distribution was configured with unusable parameters.
    #[error("invalid {distribution} distribution: {reason}")]
    InvalidDistribution {
        distribution: &'static str,
        reason: String,
    },
}
