//! Prefab catalog
//!
//! Resolves the configured tiers into an indexed catalog. Pools and the
//! spawn scheduler refer to prefabs by [`PrefabId`] only.

use std::collections::HashSet;
use std::fmt;

use runner_engine::foundation::math::Vec2;

use crate::config::{ContactEffect, MotionConfig, PrefabConfig, PrefabTiers, ReleaseEffect, RotatorConfig};
use crate::error::{GameError, GameResult};

/// Index of a prefab inside its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrefabId(usize);

/// Which pool an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolCategory {
    /// Food and pickups
    Collectible,
    /// Things that hurt the player
    Obstacle,
}

impl fmt::Display for PoolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collectible => write!(f, "collectible"),
            Self::Obstacle => write!(f, "obstacle"),
        }
    }
}

/// Obstacle difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleTier {
    /// Available from the start
    Early,
    /// Unlocked mid-game
    Mid,
    /// Unlocked late-game
    Late,
}

/// Configured list a prefab was declared in
#[derive(Debug, Clone, Copy)]
enum TierGroup {
    Common,
    Rare,
    Obstacle(ObstacleTier),
}

impl TierGroup {
    const fn category(self) -> PoolCategory {
        match self {
            Self::Common | Self::Rare => PoolCategory::Collectible,
            Self::Obstacle(_) => PoolCategory::Obstacle,
        }
    }
}

/// A resolved prefab
#[derive(Debug, Clone, PartialEq)]
pub struct Prefab {
    /// Catalog index
    pub id: PrefabId,
    /// Unique name
    pub name: String,
    /// Pool that owns instances of this prefab
    pub category: PoolCategory,
    /// Leftward speed
    pub move_speed: f32,
    /// Recycle threshold on X
    pub off_screen_x: f32,
    /// Movement model
    pub motion: MotionConfig,
    /// Optional spin
    pub rotator: Option<RotatorConfig>,
    /// Contact side effect
    pub contact: ContactEffect,
    /// Release effect policy
    pub release_effect: ReleaseEffect,
    /// Trigger half extents
    pub half_extents: Vec2,
}

/// All prefabs known to a session, grouped by tier
#[derive(Debug, Clone, Default)]
pub struct PrefabCatalog {
    prefabs: Vec<Prefab>,
    common: Vec<PrefabId>,
    rare: Vec<PrefabId>,
    early: Vec<PrefabId>,
    mid: Vec<PrefabId>,
    late: Vec<PrefabId>,
}

impl PrefabCatalog {
    /// Build a catalog from configured tiers. Prefab names must be unique.
    pub fn from_tiers(tiers: &PrefabTiers) -> GameResult<Self> {
        let mut catalog = Self::default();
        let mut seen = HashSet::new();

        for (group, configs) in [
            (TierGroup::Common, &tiers.common),
            (TierGroup::Rare, &tiers.rare),
            (TierGroup::Obstacle(ObstacleTier::Early), &tiers.early),
            (TierGroup::Obstacle(ObstacleTier::Mid), &tiers.mid),
            (TierGroup::Obstacle(ObstacleTier::Late), &tiers.late),
        ] {
            for config in configs {
                if !seen.insert(config.name.as_str()) {
                    return Err(GameError::DuplicatePrefab(config.name.clone()));
                }
                let id = catalog.push(config, group.category());
                match group {
                    TierGroup::Common => catalog.common.push(id),
                    TierGroup::Rare => catalog.rare.push(id),
                    TierGroup::Obstacle(ObstacleTier::Early) => catalog.early.push(id),
                    TierGroup::Obstacle(ObstacleTier::Mid) => catalog.mid.push(id),
                    TierGroup::Obstacle(ObstacleTier::Late) => catalog.late.push(id),
                }
            }
        }

        log::debug!(
            "Prefab catalog: {} common, {} rare, {} early, {} mid, {} late",
            catalog.common.len(),
            catalog.rare.len(),
            catalog.early.len(),
            catalog.mid.len(),
            catalog.late.len()
        );
        Ok(catalog)
    }

    fn push(&mut self, config: &PrefabConfig, category: PoolCategory) -> PrefabId {
        let id = PrefabId(self.prefabs.len());
        self.prefabs.push(Prefab {
            id,
            name: config.name.clone(),
            category,
            move_speed: config.move_speed,
            off_screen_x: config.off_screen_x,
            motion: config.motion,
            rotator: config.rotator,
            contact: config.contact,
            release_effect: config.release_effect,
            half_extents: config.half_extents,
        });
        id
    }

    /// Look up a prefab
    pub fn get(&self, id: PrefabId) -> Option<&Prefab> {
        self.prefabs.get(id.0)
    }

    /// Find a prefab by name
    pub fn find(&self, name: &str) -> Option<PrefabId> {
        self.prefabs.iter().find(|prefab| prefab.name == name).map(|prefab| prefab.id)
    }

    /// Common collectibles
    pub fn common(&self) -> &[PrefabId] {
        &self.common
    }

    /// Rare collectibles
    pub fn rare(&self) -> &[PrefabId] {
        &self.rare
    }

    /// Obstacles of one tier
    pub fn tier(&self, tier: ObstacleTier) -> &[PrefabId] {
        match tier {
            ObstacleTier::Early => &self.early,
            ObstacleTier::Mid => &self.mid,
            ObstacleTier::Late => &self.late,
        }
    }

    /// Number of prefabs across all tiers
    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    /// Whether the catalog holds no prefabs
    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers_resolve() {
        let catalog = PrefabCatalog::from_tiers(&PrefabTiers::default()).unwrap();
        assert_eq!(catalog.common().len(), 2);
        assert_eq!(catalog.rare().len(), 1);
        assert_eq!(catalog.tier(ObstacleTier::Early).len(), 1);

        let tire = catalog.find("BouncingTire").unwrap();
        let prefab = catalog.get(tire).unwrap();
        assert_eq!(prefab.category, PoolCategory::Obstacle);
        assert_eq!(catalog.tier(ObstacleTier::Mid), &[tire]);
    }

    #[test]
    fn test_each_list_lands_in_its_tier() {
        let tiers = PrefabTiers {
            common: vec![PrefabConfig::food("Apple", 4)],
            rare: vec![PrefabConfig::food("Truffle", 40)],
            early: vec![PrefabConfig::new("Cone", ContactEffect::Damage(1))],
            mid: vec![PrefabConfig::new("Crate", ContactEffect::Damage(1))],
            late: vec![
                PrefabConfig::new("Boulder", ContactEffect::Damage(1)),
                PrefabConfig::new("Sofa", ContactEffect::Damage(1)),
            ],
        };
        let catalog = PrefabCatalog::from_tiers(&tiers).unwrap();
        let id = |name: &str| catalog.find(name).unwrap();

        assert_eq!(catalog.common(), &[id("Apple")]);
        assert_eq!(catalog.rare(), &[id("Truffle")]);
        assert_eq!(catalog.tier(ObstacleTier::Early), &[id("Cone")]);
        assert_eq!(catalog.tier(ObstacleTier::Mid), &[id("Crate")]);
        assert_eq!(catalog.tier(ObstacleTier::Late), &[id("Boulder"), id("Sofa")]);

        for (name, category) in [
            ("Apple", PoolCategory::Collectible),
            ("Truffle", PoolCategory::Collectible),
            ("Cone", PoolCategory::Obstacle),
            ("Sofa", PoolCategory::Obstacle),
        ] {
            assert_eq!(catalog.get(id(name)).unwrap().category, category);
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut tiers = PrefabTiers::default();
        tiers.late.push(PrefabConfig::new("Barrier", ContactEffect::Damage(1)));
        assert!(matches!(
            PrefabCatalog::from_tiers(&tiers),
            Err(GameError::DuplicatePrefab(name)) if name == "Barrier"
        ));
    }

    #[test]
    fn test_empty_tiers() {
        let tiers = PrefabTiers {
            common: Vec::new(),
            rare: Vec::new(),
            early: Vec::new(),
            mid: Vec::new(),
            late: Vec::new(),
        };
        let catalog = PrefabCatalog::from_tiers(&tiers).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.find("Burger").is_none());
    }
}
