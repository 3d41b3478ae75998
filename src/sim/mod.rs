//! Simulation core.
//!
//! [`Simulation`] is the single context object for a run: roster, particles,
//! objectives, player status, screen feel and deferred effects. The frame
//! scheduler owns it (as a resource) and calls [`Simulation::step`] once per
//! display refresh. Nothing in here touches the ECS world directly, which is
//! what keeps the whole core testable with plain function calls.
//!
//! Step order is fixed:
//!
//! ```text
//!   clicks ─▶ deferred effects ─▶ behaviors ─▶ hostile fire ─▶ recon dwell ─▶ particles ─▶ health check
//! ```

pub mod behavior;
pub mod deferred;
pub mod entity;
pub mod fx;
pub mod hit;
pub mod hostile;
pub mod objectives;
pub mod particles;
pub mod projection;

use bevy::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

use crate::common::tunables::Tunables;
use crate::mission::{Mission, roster};

use self::deferred::{DeferredEffect, DeferredQueue};
use self::entity::{Category, EntityId, RangeEntity};
use self::fx::ScreenFx;
use self::objectives::{Advance, ObjectiveTracker};
use self::particles::ParticleSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No run in progress (briefing, loading).
    Idle,
    Playing,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStatus {
    pub health: u32,
    pub max_health: u32,
    pub shots: u32,
    pub hits: u32,
}

impl PlayerStatus {
    pub fn new(max_health: u32) -> Self {
        Self { health: max_health, max_health, shots: 0, hits: 0 }
    }

    /// Deduct health, floored at zero. Returns the remaining health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    #[inline]
    pub fn is_down(&self) -> bool {
        self.health == 0
    }

    /// Integer percentage for the HUD.
    pub fn health_percent(&self) -> u32 {
        if self.max_health == 0 {
            return 0;
        }
        self.health * 100 / self.max_health
    }

    pub fn accuracy(&self) -> f32 {
        if self.shots == 0 {
            return 0.0;
        }
        self.hits as f32 / self.shots as f32
    }
}

/// Per-frame input gathered by the scheduler.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// Monotonic seconds (any origin; the run start is subtracted internally).
    pub now: f32,
    /// Pointer offset from the viewport center, +y up.
    pub pointer: Vec2,
    /// Pointer positions of clicks since the last frame.
    pub clicks: &'a [Vec2],
}

/// Something the outer layers may want to react to (narration, logging, HUD).
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    ObjectiveAdvanced { index: usize, description: String },
    Killed { id: EntityId, category: Category },
    Missed { at: Vec2 },
    PlayerHit { by: EntityId, health: u32 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub notices: Vec<Notice>,
    /// Set on the single frame the run ends.
    pub terminal: Option<Terminal>,
}

#[derive(Resource, Debug, Clone)]
pub struct Simulation {
    phase: Phase,
    epoch: u64,
    started_at: f32,
    /// Mission-relative seconds of the current frame.
    clock: f32,
    pointer: Vec2,
    mission: Option<Mission>,
    pub entities: Vec<RangeEntity>,
    pub particles: ParticleSystem,
    pub objectives: ObjectiveTracker,
    pub player: PlayerStatus,
    pub fx: ScreenFx,
    pub deferred: DeferredQueue,
    recon_dwell: f32,
    seed: u64,
    rng: StdRng,
}

impl Simulation {
    pub fn new(seed: u64) -> Self {
        let defaults = Tunables::default();
        Self {
            phase: Phase::Idle,
            epoch: 0,
            started_at: 0.0,
            clock: 0.0,
            pointer: Vec2::ZERO,
            mission: None,
            entities: Vec::new(),
            particles: ParticleSystem::new(
                defaults.particle_capacity,
                defaults.particle_decay,
                defaults.particle_spread,
                seed,
            ),
            objectives: ObjectiveTracker::default(),
            player: PlayerStatus::new(defaults.max_health),
            fx: ScreenFx::default(),
            deferred: DeferredQueue::default(),
            recon_dwell: 0.0,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Begin a run: build the roster, reset objectives and player, open a new epoch.
    pub fn start(&mut self, mission: Mission, tunables: &Tunables, now: f32) {
        self.epoch += 1;
        let run_seed = self.seed.wrapping_add(self.epoch);

        self.entities = roster::layout(&mission, tunables);
        self.objectives = ObjectiveTracker::new(mission.objectives.clone());
        self.player = PlayerStatus::new(tunables.max_health);
        self.particles = ParticleSystem::new(
            tunables.particle_capacity,
            tunables.particle_decay,
            tunables.particle_spread,
            run_seed,
        );
        self.fx = ScreenFx::new(mission.wind_speed, mission.wind_direction);
        self.deferred.clear();
        self.recon_dwell = 0.0;
        self.rng = StdRng::seed_from_u64(run_seed);
        self.started_at = now;
        self.clock = 0.0;
        self.pointer = Vec2::ZERO;
        self.mission = Some(mission);
        self.phase = Phase::Playing;

        info!(
            "run {} started: {} entities, {} objectives",
            self.epoch,
            self.entities.len(),
            self.objectives.len()
        );
    }

    /// Leave the current run without an outcome (restart, back to briefing).
    pub fn stand_down(&mut self) {
        if self.phase == Phase::Playing {
            self.epoch += 1;
        }
        self.phase = Phase::Idle;
        self.deferred.clear();
        self.particles.clear();
    }

    /// Advance one frame.
    pub fn step(&mut self, tunables: &Tunables, input: FrameInput<'_>) -> FrameReport {
        let mut report = FrameReport::default();
        if self.phase != Phase::Playing {
            return report;
        }

        let t = (input.now - self.started_at).max(self.clock);
        let dt = t - self.clock;
        self.clock = t;
        self.pointer = input.pointer;

        for &click in input.clicks {
            self.fire_shot(tunables, click, &mut report);
            if self.phase != Phase::Playing {
                return report;
            }
        }

        self.drain_deferred(tunables, &mut report);
        if self.phase != Phase::Playing {
            return report;
        }

        behavior::advance_all(&mut self.entities, tunables, t, dt, &mut self.rng);
        self.return_fire(tunables, &mut report);
        self.track_recon(tunables, dt, &mut report);
        self.particles.advance();

        if self.player.is_down() {
            self.finish(Terminal::Failure, &mut report);
        }

        report
    }

    fn drain_deferred(&mut self, tunables: &Tunables, report: &mut FrameReport) {
        for effect in self.deferred.take_due(self.clock, self.epoch) {
            if self.phase != Phase::Playing {
                break;
            }
            match effect {
                DeferredEffect::Detonate { source, origin } => {
                    self.detonate(tunables, source, origin, report);
                }
            }
        }
    }

    /// Reveal: hold the aim point on a living primary target or hostile.
    fn track_recon(&mut self, tunables: &Tunables, dt: f32, report: &mut FrameReport) {
        let recon_active = self
            .objectives
            .active()
            .is_some_and(|o| o.kind == objectives::ObjectiveKind::Recon);
        if !recon_active {
            self.recon_dwell = 0.0;
            return;
        }

        let aim = self.pointer + self.fx.aim_offset(self.clock, tunables);
        let observed = hit::pick_target(&self.entities, aim, self.pointer, tunables)
            .and_then(|i| self.entities.get(i))
            .is_some_and(|e| e.category == Category::PrimaryTarget || e.hostile);

        if !observed {
            self.recon_dwell = 0.0;
            return;
        }

        self.recon_dwell += dt;
        if self.recon_dwell >= tunables.recon_dwell {
            self.recon_dwell = 0.0;
            let outcome = self.objectives.register_recon();
            self.apply_advance(outcome, report);
        }
    }

    /// Offer a kill to the objective tracker.
    pub(crate) fn adjudicate(&mut self, category: Category, report: &mut FrameReport) {
        let outcome = self.objectives.register_hit(category);
        self.apply_advance(outcome, report);
    }

    fn apply_advance(&mut self, outcome: Advance, report: &mut FrameReport) {
        match outcome {
            Advance::Ignored => {}
            Advance::Advanced { index, description } => {
                info!("objective {index} active: {description}");
                report.notices.push(Notice::ObjectiveAdvanced { index, description });
            }
            Advance::Completed => self.finish(Terminal::Success, report),
        }
    }

    /// End the run. Only the first call per run has any effect.
    fn finish(&mut self, terminal: Terminal, report: &mut FrameReport) {
        if self.phase != Phase::Playing {
            return;
        }
        self.phase = match terminal {
            Terminal::Success => Phase::Success,
            Terminal::Failure => Phase::Failure,
        };
        self.epoch += 1;
        self.deferred.clear();
        report.terminal = Some(terminal);
        info!(
            "run ended: {terminal:?} (health {}, shots {}, hits {})",
            self.player.health, self.player.shots, self.player.hits
        );
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Mission-relative seconds of the last step.
    #[inline]
    pub fn clock(&self) -> f32 {
        self.clock
    }

    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    pub fn entity(&self, id: EntityId) -> Option<&RangeEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Where the reticle is drawn and where a click would land right now.
    pub fn aim_point(&self, tunables: &Tunables) -> Vec2 {
        self.pointer + self.fx.aim_offset(self.clock, tunables)
    }

    pub fn shake_offset(&self, tunables: &Tunables) -> Vec2 {
        self.fx.shake_offset(self.clock, tunables)
    }
}

#[cfg(test)]
mod tests;
