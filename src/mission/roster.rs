//! Range layout for a mission.
//!
//! The base layout is fixed so every run of the same mission looks the same.
//! Missions that ask for more than one kill of a kind (two fuel drums, say)
//! get extra entities of that category so every objective stays reachable.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::mission::Mission;
use crate::sim::entity::{Behavior, Category, EntityId, RangeEntity};

struct Slot {
    category: Category,
    label: &'static str,
    spawn: Vec3,
    behavior: Behavior,
    speed: f32,
    phase: f32,
}

const fn slot(category: Category, label: &'static str, spawn: Vec3, behavior: Behavior, speed: f32, phase: f32) -> Slot {
    Slot { category, label, spawn, behavior, speed, phase }
}

const BASE: [Slot; 10] = [
    slot(Category::PrimaryTarget, "Primary Target", Vec3::new(0.0, 20.0, 950.0), Behavior::Pacing, 0.6, 0.0),
    slot(Category::Guard, "Guard Alpha", Vec3::new(-260.0, 0.0, 700.0), Behavior::Pacing, 0.9, 1.3),
    slot(Category::Guard, "Guard Bravo", Vec3::new(320.0, 0.0, 1100.0), Behavior::Flanking, 0.8, 2.1),
    slot(Category::Civilian, "Dock Worker", Vec3::new(140.0, 0.0, 800.0), Behavior::Pacing, 0.5, 0.7),
    slot(Category::Civilian, "Courier", Vec3::new(-120.0, 0.0, 1000.0), Behavior::Erratic, 1.0, 2.6),
    slot(Category::ExplosiveBarrel, "Fuel Drum", Vec3::new(-220.0, -40.0, 720.0), Behavior::Stationary, 0.0, 0.0),
    slot(Category::ExplosiveBarrel, "Fuel Drum", Vec3::new(380.0, -40.0, 1050.0), Behavior::Stationary, 0.0, 0.0),
    slot(Category::Crate, "Supply Crate", Vec3::new(-60.0, -50.0, 650.0), Behavior::Stationary, 0.0, 0.0),
    slot(Category::IntelItem, "Intel Case", Vec3::new(80.0, -30.0, 880.0), Behavior::Stationary, 0.0, 0.0),
    slot(Category::BreakableGlass, "Depot Window", Vec3::new(-40.0, 80.0, 1200.0), Behavior::Stationary, 0.0, 0.0),
];

fn spawn(id: u32, s: &Slot) -> RangeEntity {
    RangeEntity::new(EntityId(id), s.category, s.label, s.spawn)
        .with_behavior(s.behavior, s.speed)
        .with_phase(s.phase)
}

/// Position of the `n`th extra entity: alternating sides, receding.
fn extra_spawn(n: usize) -> Vec3 {
    let side = if n % 2 == 0 { -1.0 } else { 1.0 };
    Vec3::new(side * (160.0 + 70.0 * n as f32), -20.0, 1250.0 + 90.0 * n as f32)
}

fn extra_label(category: Category) -> &'static str {
    match category {
        Category::ExplosiveBarrel => "Fuel Drum",
        Category::IntelItem => "Intel Case",
        Category::PrimaryTarget => "Secondary Target",
        _ => "Contact",
    }
}

/// Build the roster for `mission`. Ids are dense and stable for a given mission.
pub fn layout(mission: &Mission, tunables: &Tunables) -> Vec<RangeEntity> {
    let mut roster: Vec<RangeEntity> = BASE
        .iter()
        .zip(0u32..)
        .map(|(s, id)| spawn(id, s))
        .collect();

    let mut extras = 0;
    for category in [Category::ExplosiveBarrel, Category::IntelItem, Category::PrimaryTarget] {
        let needed = mission
            .objectives
            .iter()
            .filter(|o| o.kind.target_category() == Some(category))
            .count();
        let have = roster.iter().filter(|e| e.category == category).count();

        for _ in have..needed {
            let id = roster.len() as u32;
            let behavior = if category == Category::PrimaryTarget { Behavior::Pacing } else { Behavior::Stationary };
            let s = slot(category, extra_label(category), extra_spawn(extras), behavior, 0.5, extras as f32 * 0.9);
            roster.push(spawn(id, &s));
            extras += 1;
        }
    }

    // Keep every spawn inside the depth band the behaviors maintain.
    for e in &mut roster {
        let z = e.spawn.z.clamp(tunables.flank_near, tunables.flank_far);
        e.spawn.z = z;
        e.pos.z = z;
    }

    roster
}
