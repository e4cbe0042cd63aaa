use super::*;

/// Deepest reflection the builder will produce.
pub const MAX_REFLECTIONS: usize = 10;

/// Images smaller than this fraction of the ball are dropped, along with their descendants.
pub const MIN_REFLECTION_SIZE_RATIO: Float = 0.05;

/// Radius multipliers, indexed by `min(depth - 1, 5)`.
pub const RADIUS_FACTORS: [Float; 6] = [1.0, 0.85, 0.70, 0.60, 0.60, 0.60];

/// Relative margin under which a crossing, found right at the far end of
/// a sight line, doesn't count as blocking it.
pub const OCCLUSION_TOLERANCE: Float = 0.01;

/// Tunables of a pass. The [`Default`] impl uses the constants above.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub max_reflections: usize,
    pub min_size_ratio: Float,
    pub radius_factors: [Float; 6],
    pub occlusion_tolerance: Float,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_reflections: MAX_REFLECTIONS,
            min_size_ratio: MIN_REFLECTION_SIZE_RATIO,
            radius_factors: RADIUS_FACTORS,
            occlusion_tolerance: OCCLUSION_TOLERANCE,
        }
    }
}

impl EngineConfig {
    /// Radius of a depth-`depth` image whose parent (the ball, if
    /// `depth == 1`) has radius `parent_radius`.
    ///
    /// # Panics
    ///
    /// if `depth == 0`
    #[inline]
    #[must_use]
    pub fn child_radius(&self, parent_radius: Float, depth: usize) -> Float {
        let last = self.radius_factors.len() - 1;
        parent_radius * self.radius_factors[(depth - 1).min(last)]
    }
}
