//! Click resolution, damage and explosions.
//!
//! A click is tested against the same projected box the renderer draws. When
//! boxes overlap, the nearest entity (smallest depth) takes the shot; the
//! ones behind it are covered.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::sim::deferred::DeferredEffect;
use crate::sim::entity::{Category, EntityId, RangeEntity};
use crate::sim::particles::{EXPLOSION, GLASS, IMPACT, INTEL, RICOCHET, SPLINTER};
use crate::sim::projection::{project, project_box};
use crate::sim::{FrameReport, Notice, Phase, Simulation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Miss,
    Hit { id: EntityId, category: Category },
}

/// Index of the living entity under `point`, nearest first.
pub fn pick_target(entities: &[RangeEntity], point: Vec2, pointer: Vec2, tunables: &Tunables) -> Option<usize> {
    entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive)
        .filter(|(_, e)| project_box(e.pos, pointer, tunables).contains(point))
        .min_by(|(_, a), (_, b)| a.pos.z.total_cmp(&b.pos.z))
        .map(|(i, _)| i)
}

/// Indices of living entities within `radius` of `origin`, excluding `source`.
pub fn blast_victims(entities: &[RangeEntity], source: EntityId, origin: Vec3, radius: f32) -> Vec<usize> {
    entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive && e.id != source)
        .filter(|(_, e)| e.pos.distance(origin) <= radius)
        .map(|(i, _)| i)
        .collect()
}

fn impact_color(category: Category) -> Color {
    match category {
        Category::Crate => SPLINTER,
        Category::BreakableGlass => GLASS,
        Category::IntelItem => INTEL,
        Category::ExplosiveBarrel => EXPLOSION,
        _ => IMPACT,
    }
}

impl Simulation {
    /// Resolve one click at pointer position `click`.
    ///
    /// The shot lands where the aim is at click time (pointer + sway + recoil),
    /// then the weapon kicks.
    pub fn fire_shot(&mut self, tunables: &Tunables, click: Vec2, report: &mut FrameReport) -> ShotOutcome {
        if self.phase != Phase::Playing {
            return ShotOutcome::Miss;
        }

        let now = self.clock;
        let aim = click + self.fx.aim_offset(now, tunables);
        self.player.shots += 1;
        self.fx.kick(now, tunables);
        self.fx.shake(now, tunables.shake_shot, tunables);

        let Some(i) = pick_target(&self.entities, aim, self.pointer, tunables) else {
            self.particles.spawn_burst(aim, RICOCHET, 5, 2.0);
            report.notices.push(Notice::Missed { at: aim });
            return ShotOutcome::Miss;
        };

        self.player.hits += 1;
        let target = &mut self.entities[i];
        target.kill();
        let (id, category, origin) = (target.id, target.category, target.pos);
        debug!("hit {} ({category:?}) at {aim}", target.label);

        self.particles.spawn_burst(aim, impact_color(category), 10, 3.0);
        report.notices.push(Notice::Killed { id, category });

        if category == Category::ExplosiveBarrel {
            self.ignite(tunables, id, origin, aim);
        }

        self.adjudicate(category, report);
        ShotOutcome::Hit { id, category }
    }

    /// Visual burst now, blast damage after `blast_delay`.
    fn ignite(&mut self, tunables: &Tunables, source: EntityId, origin: Vec3, at: Vec2) {
        self.particles.spawn_burst(at, EXPLOSION, 30, 5.0);
        self.particles.spawn_burst(at, RICOCHET, 8, 3.0);
        self.fx.shake(self.clock, tunables.shake_explosion, tunables);
        self.deferred.push(
            self.clock + tunables.blast_delay,
            self.epoch,
            DeferredEffect::Detonate { source, origin },
        );
    }

    /// Kill everything alive within the blast radius. Barrels caught in the
    /// blast are destroyed without blasts of their own.
    pub(crate) fn detonate(&mut self, tunables: &Tunables, source: EntityId, origin: Vec3, report: &mut FrameReport) {
        let victims = blast_victims(&self.entities, source, origin, tunables.blast_radius);
        debug!("barrel {source:?} detonated: {} caught", victims.len());

        for i in victims {
            if self.phase != Phase::Playing {
                return;
            }

            let victim = &mut self.entities[i];
            if !victim.kill() {
                continue;
            }
            let (id, category) = (victim.id, victim.category);
            let at = project(victim.pos, self.pointer, tunables).screen;

            self.particles.spawn_burst(at, impact_color(category), 8, 3.0);
            report.notices.push(Notice::Killed { id, category });

            self.adjudicate(category, report);
        }
    }
}
