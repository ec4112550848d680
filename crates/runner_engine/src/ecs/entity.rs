//! Entity identifiers
//!
//! Entities live in slot maps owned by game code. Keys are generational, so a
//! handle to a destroyed entity never aliases a newer one.

slotmap::new_key_type! {
    /// Handle to a pooled world entity
    pub struct EntityId;

    /// Handle to a pooled visual effect instance
    pub struct EffectId;
}

/// Storage for entities keyed by [`EntityId`]
pub type EntityStore<T> = slotmap::SlotMap<EntityId, T>;

/// Storage for effects keyed by [`EffectId`]
pub type EffectStore<T> = slotmap::SlotMap<EffectId, T>;
