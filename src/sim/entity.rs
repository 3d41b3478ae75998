//! Range entities: targets, bystanders and props.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PrimaryTarget,
    Civilian,
    Guard,
    ExplosiveBarrel,
    Crate,
    IntelItem,
    BreakableGlass,
}

impl Category {
    /// Props that stay on screen in a destroyed state after dying.
    #[inline]
    pub fn is_scenery(self) -> bool {
        matches!(self, Self::ExplosiveBarrel | Self::Crate | Self::BreakableGlass)
    }

    #[inline]
    pub fn base_hp(self) -> u32 {
        match self {
            Self::PrimaryTarget | Self::Guard => 100,
            Self::Civilian => 60,
            Self::ExplosiveBarrel | Self::Crate => 40,
            Self::IntelItem | Self::BreakableGlass => 10,
        }
    }
}

/// Closed set of movement scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Behavior {
    #[default]
    Stationary,
    Pacing,
    Erratic,
    Flanking,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeEntity {
    pub id: EntityId,
    pub label: String,
    pub category: Category,
    pub behavior: Behavior,
    /// Current world position. `z` is the pinhole depth and stays positive.
    pub pos: Vec3,
    /// Anchor the behavior scripts oscillate around.
    pub spawn: Vec3,
    pub speed: f32,
    /// Desynchronizes identical scripts across instances.
    pub phase: f32,
    pub hp: u32,
    pub alive: bool,
    pub hostile: bool,
    /// Mission-relative seconds of the last shot at the player.
    pub last_fire: f32,
}

impl RangeEntity {
    pub fn new(id: EntityId, category: Category, label: impl Into<String>, spawn: Vec3) -> Self {
        Self {
            id,
            label: label.into(),
            category,
            behavior: Behavior::Stationary,
            pos: spawn,
            spawn,
            speed: 1.0,
            phase: 0.0,
            hp: category.base_hp(),
            alive: true,
            hostile: category == Category::Guard,
            last_fire: 0.0,
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior, speed: f32) -> Self {
        self.behavior = behavior;
        self.speed = speed;
        self
    }

    /// Set the phase offset. Also staggers the first hostile shot inside the first second.
    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self.last_fire = phase.rem_euclid(1.0);
        self
    }

    pub fn hostile(mut self, hostile: bool) -> Self {
        self.hostile = hostile;
        self
    }

    /// Kill the entity. Returns `false` if it was already dead.
    pub fn kill(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.hp = 0;
        true
    }

    /// Living entities, plus destroyed scenery.
    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.alive || self.category.is_scenery()
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.alive && self.behavior != Behavior::Stationary
    }
}
