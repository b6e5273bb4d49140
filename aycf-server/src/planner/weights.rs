//! Scoring weights for itinerary ranking.

/// Weights applied to the four leg appearance counts when scoring a
/// candidate.
///
/// The outbound legs (base→hub, hub→target) always count at face value.
/// The target→hub leg is weighted above 1.0 to reward itineraries with
/// redundant ways back from the target. The hub→base leg weight depends on
/// whether returning to base is required: when it is, that leg is the
/// binding constraint and high-frequency links matter more; when it is
/// not, the leg is merely a bonus.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    /// Weight for the target→return-hub leg.
    pub return_leg: f64,

    /// Weight for the return-hub→base leg when return-to-base is required.
    pub home_leg_required: f64,

    /// Weight for the return-hub→base leg when it is only a bonus.
    pub home_leg_bonus: f64,
}

impl ScoreWeights {
    /// The hub→base weight for the given return-to-base mode.
    pub fn home_leg(&self, require_return_to_base: bool) -> f64 {
        if require_return_to_base {
            self.home_leg_required
        } else {
            self.home_leg_bonus
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            return_leg: 1.2,
            home_leg_required: 0.8,
            home_leg_bonus: 0.3,
        }
    }
}
