use crate::dihedral::Dihedral;

/// Width of the discretized angle domain. Angles live on a ring of this
/// circumference, so the largest possible circular distance is
/// `ANGLE_DOMAIN / 2`.
pub const ANGLE_DOMAIN: i64 = 65536;

/// Distance between two angles on the circular domain: the smaller of the
/// direct and the wrap-around difference.
#[inline]
pub fn circular_distance(a: u16, b: u16) -> i64 {
    let diff = (i64::from(a) - i64::from(b)).abs();
    diff.min(ANGLE_DOMAIN - diff)
}

/// Scoring parameters shared by every alignment in a batch.
#[derive(Debug, Clone, Copy)]
pub struct ScoringParams {
    /// Shifts the zero-crossing of the similarity score; larger values let
    /// more dissimilar token pairs still score positive.
    pub scoring_offset: i64,
}

impl ScoringParams {
    pub fn new(scoring_offset: i64) -> Self {
        ScoringParams { scoring_offset }
    }

    /// Similarity score for a token pair: the offset minus the sum of the
    /// squared circular distances of the two components. Integer arithmetic
    /// only; a maximally distant pair contributes `2 * 32768^2`, which is why
    /// scores are 64-bit.
    #[inline]
    pub fn score(&self, a: Dihedral, b: Dihedral) -> i64 {
        let dphi = circular_distance(a.phi, b.phi);
        let dpsi = circular_distance(a.psi, b.psi);
        self.scoring_offset - (dphi * dphi + dpsi * dpsi)
    }
}
