//! 2D overlap tests for trigger-style collision detection
//!
//! Runner entities never push each other around; the game only needs to know
//! when two trigger volumes start touching.

use crate::foundation::math::Vec2;

/// An axis-aligned box described by center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Center position in world space
    pub center: Vec2,
    /// Half width and half height
    pub half_extents: Vec2,
}

impl Aabb2 {
    /// Creates a box from its center and half extents
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self { center, half_extents }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    /// Maximum corner
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Check if this box overlaps another (touching edges count)
    pub fn intersects(&self, other: &Aabb2) -> bool {
        let delta = self.center - other.center;
        delta.x.abs() <= self.half_extents.x + other.half_extents.x
            && delta.y.abs() <= self.half_extents.y + other.half_extents.y
    }

    /// Check if a point lies inside the box
    pub fn contains_point(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

/// A trigger volume: a box plus the layer filtering it participates in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerVolume {
    /// Shape in world space
    pub bounds: Aabb2,
    /// Layer this volume belongs to
    pub layer: u32,
    /// Layers this volume reacts to
    pub mask: u32,
}

impl TriggerVolume {
    /// Check layer filtering and shape overlap together
    pub fn overlaps(&self, other: &TriggerVolume) -> bool {
        super::CollisionLayers::should_collide(self.layer, self.mask, other.layer, other.mask)
            && self.bounds.intersects(&other.bounds)
    }
}
