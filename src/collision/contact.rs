use crate::math::vec2::Vec2;

/// One contact point produced by a narrow-phase routine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Contact position in world coordinates.
    pub point: Vec2,
    /// Unit normal pointing from the first shape towards the second.
    pub normal: Vec2,
    /// Signed distance between the surfaces; negative when overlapping.
    pub penetration: f64,
    /// Identifies the feature pairing that produced this point, for
    /// matching contacts between steps.
    pub feature_id: u32,
}

impl Contact {
    pub fn new(point: Vec2, normal: Vec2, penetration: f64, feature_id: u32) -> Self {
        Self {
            point,
            normal,
            penetration,
            feature_id,
        }
    }

    /// The same contact seen from the other shape.
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Packs a reference feature (high half) and an incident feature (low half).
pub fn feature_id(reference: usize, incident: u32) -> u32 {
    ((reference as u32 & 0xFFFF) << 16) | (incident & 0xFFFF)
}
