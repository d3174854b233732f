use crate::error::{ReconstructError, Result};

/// How arc sweep angles are signed when re-projected into model space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepConvention {
    /// `±(Δ + 360)`: positive for the front view, negated for top and right.
    /// Kept for compatibility with scenes built by earlier releases.
    #[default]
    Legacy,
    /// Δ wrapped into `(0, 360]`, signed by the handedness of the view plane
    /// about the emitted normal.
    RightHanded,
}

#[derive(Debug, Clone)]
pub struct ReconstructConfig {
    /// How far (drawing units) a cluster reaches past its bounds when growing.
    pub expand_distance: f64,
    pub sweep_convention: SweepConvention,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            expand_distance: 5.0,
            sweep_convention: SweepConvention::Legacy,
        }
    }
}

impl ReconstructConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.expand_distance.is_finite() || self.expand_distance < 0.0 {
            return Err(ReconstructError::InvalidConfig(format!(
                "expand_distance must be a finite, non-negative distance (got {})",
                self.expand_distance
            )));
        }
        Ok(())
    }
}
