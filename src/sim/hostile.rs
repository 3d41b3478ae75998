//! Return fire from hostile entities.
//!
//! Each hostile keeps its own cooldown from its last shot, so several guards
//! fire on staggered schedules rather than in volleys.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::sim::particles::{DAMAGE, MUZZLE};
use crate::sim::projection::project;
use crate::sim::{FrameReport, Notice, Simulation};

impl Simulation {
    pub(crate) fn return_fire(&mut self, tunables: &Tunables, report: &mut FrameReport) {
        let now = self.clock;

        for e in self.entities.iter_mut().filter(|e| e.alive && e.hostile) {
            if self.player.is_down() {
                break;
            }
            if now - e.last_fire <= tunables.hostile_cooldown {
                continue;
            }

            e.last_fire = now;
            let health = self.player.take_damage(tunables.hostile_damage);
            debug!("{} fired: health {health}", e.label);

            self.fx.shake(now, tunables.shake_hit, tunables);
            self.particles.spawn_burst(Vec2::ZERO, DAMAGE, 12, 4.0);
            let muzzle = project(e.pos, self.pointer, tunables);
            self.particles.spawn_burst(muzzle.screen, MUZZLE, 6, 2.0 * muzzle.scale.max(0.5));

            report.notices.push(Notice::PlayerHit { by: e.id, health });
        }
    }
}
