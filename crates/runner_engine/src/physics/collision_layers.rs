//! Collision layer system for filtering collision detection
//!
//! Each trigger volume has a layer it belongs to and a mask of layers it
//! reacts to. A pair only interacts when both sides accept each other.

/// Collision layer definitions as bit flags
pub struct CollisionLayers;

impl CollisionLayers {
    /// No collision layer
    pub const NONE: u32 = 0;

    /// All collision layers
    pub const ALL: u32 = 0xFFFF_FFFF;

    /// The player vehicle
    pub const PLAYER: u32 = 1 << 0;

    /// Things that hurt the player
    pub const OBSTACLE: u32 = 1 << 1;

    /// Pickups and collectibles
    pub const PICKUP: u32 = 1 << 2;

    /// Purely visual effects (never collide)
    pub const EFFECT: u32 = 1 << 3;

    /// Check if two volumes should collide based on their layers and masks
    ///
    /// A's layer must be in B's mask AND B's layer must be in A's mask.
    pub fn should_collide(layer_a: u32, mask_a: u32, layer_b: u32, mask_b: u32) -> bool {
        (layer_a & mask_b) != 0 && (layer_b & mask_a) != 0
    }

    /// Helper to create a mask from multiple layers
    pub fn mask(layers: &[u32]) -> u32 {
        layers.iter().fold(0, |acc, &layer| acc | layer)
    }
}
