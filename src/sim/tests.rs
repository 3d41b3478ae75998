use bevy::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::*;
use crate::common::test_utils::{idle_frame, playing_fallback, playing_with, still_tunables};
use crate::sim::entity::Behavior;
use crate::sim::hit::pick_target;
use crate::sim::objectives::{Objective, ObjectiveKind};
use crate::sim::projection::project;

fn mission(kinds: &[ObjectiveKind]) -> Mission {
    Mission {
        objectives: kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| Objective {
                id: i.to_string(),
                kind: *kind,
                description: format!("objective {i}"),
            })
            .collect(),
        ..Mission::fallback()
    }
}

fn guard(id: u32, pos: Vec3) -> RangeEntity {
    RangeEntity::new(EntityId(id), Category::Guard, "Guard", pos)
}

// -----------------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------------

#[test]
fn idle_simulation_ignores_frames() {
    let t = Tunables::default();
    let mut sim = Simulation::new(1);
    let clicks = [Vec2::ZERO];

    let report = sim.step(&t, FrameInput { now: 5.0, pointer: Vec2::ZERO, clicks: &clicks });

    assert_eq!(report, FrameReport::default());
    assert_eq!(sim.phase(), Phase::Idle);
    assert_eq!(sim.player.shots, 0);
}

#[test]
fn start_resets_the_run() {
    let t = Tunables::default();
    let mut sim = playing_fallback(&t);
    let first_epoch = sim.epoch();

    sim.player.take_damage(70);
    sim.player.shots = 4;
    sim.entities[0].kill();
    sim.stand_down();
    assert_eq!(sim.phase(), Phase::Idle);

    sim.start(Mission::fallback(), &t, 42.0);

    assert_eq!(sim.phase(), Phase::Playing);
    assert!(sim.epoch() > first_epoch);
    assert_eq!(sim.player, PlayerStatus::new(t.max_health));
    assert_eq!(sim.objectives.index(), 0);
    assert!(sim.entities.iter().all(|e| e.alive));
    assert_eq!(sim.clock(), 0.0);

    // Clock is relative to the start time.
    sim.step(&t, idle_frame(42.5));
    assert!((sim.clock() - 0.5).abs() < 1e-5);
}

#[test]
fn clock_never_runs_backwards() {
    let t = Tunables::default();
    let mut sim = playing_fallback(&t);
    sim.step(&t, idle_frame(1.0));
    sim.step(&t, idle_frame(0.5));
    assert_eq!(sim.clock(), 1.0);
}

// -----------------------------------------------------------------------------
// Hostile fire and failure
// -----------------------------------------------------------------------------

#[test]
fn ten_hostile_hits_fail_the_run_once() {
    let t = still_tunables();
    let mut sim = playing_with(
        mission(&[ObjectiveKind::Eliminate]),
        vec![guard(0, Vec3::new(0.0, 0.0, 800.0))],
        &t,
    );
    let interval = t.hostile_cooldown + 0.1;

    let mut terminals = Vec::new();
    for n in 1..=10 {
        let report = sim.step(&t, idle_frame(n as f32 * interval));
        assert!(report.notices.iter().any(|n| matches!(n, Notice::PlayerHit { .. })));
        terminals.extend(report.terminal);
    }

    assert_eq!(sim.player.health, 0);
    assert_eq!(terminals, vec![Terminal::Failure]);
    assert_eq!(sim.phase(), Phase::Failure);

    // Later frames change nothing.
    for n in 11..20 {
        let report = sim.step(&t, idle_frame(n as f32 * interval));
        assert_eq!(report, FrameReport::default());
    }
    assert_eq!(sim.player.health, 0);
}

#[test]
fn hostile_fire_respects_each_cooldown() {
    let t = still_tunables();
    let mut late = guard(1, Vec3::new(200.0, 0.0, 800.0));
    late.last_fire = 0.5;
    let mut sim = playing_with(
        mission(&[ObjectiveKind::Eliminate]),
        vec![guard(0, Vec3::new(-200.0, 0.0, 800.0)), late],
        &t,
    );

    let fired = |report: &FrameReport| -> Vec<EntityId> {
        report
            .notices
            .iter()
            .filter_map(|n| match n {
                Notice::PlayerHit { by, .. } => Some(*by),
                _ => None,
            })
            .collect()
    };

    assert!(fired(&sim.step(&t, idle_frame(1.0))).is_empty());
    assert_eq!(fired(&sim.step(&t, idle_frame(2.6))), vec![EntityId(0)]);
    assert_eq!(fired(&sim.step(&t, idle_frame(3.1))), vec![EntityId(1)]);
    assert!(fired(&sim.step(&t, idle_frame(3.2))).is_empty());
    assert_eq!(sim.player.health, t.max_health - 2 * t.hostile_damage);
}

#[test]
fn dead_and_friendly_entities_hold_fire() {
    let t = still_tunables();
    let mut dead = guard(0, Vec3::new(0.0, 0.0, 800.0));
    dead.kill();
    let friendly = guard(1, Vec3::new(100.0, 0.0, 800.0)).hostile(false);
    let mut sim = playing_with(mission(&[ObjectiveKind::Eliminate]), vec![dead, friendly], &t);

    for n in 1..20 {
        sim.step(&t, idle_frame(n as f32));
    }
    assert_eq!(sim.player.health, t.max_health);
}

#[test]
fn damage_larger_than_health_floors_at_zero() {
    let mut player = PlayerStatus::new(25);
    assert_eq!(player.take_damage(10), 15);
    assert_eq!(player.take_damage(40), 0);
    assert!(player.is_down());
    assert_eq!(player.health_percent(), 0);
}

#[test]
fn accuracy_counts_hits_over_shots() {
    let mut player = PlayerStatus::new(100);
    assert_eq!(player.accuracy(), 0.0);
    player.shots = 4;
    player.hits = 3;
    assert_eq!(player.accuracy(), 0.75);
}

// -----------------------------------------------------------------------------
// Recon
// -----------------------------------------------------------------------------

#[test]
fn holding_aim_on_the_target_completes_recon() {
    let t = still_tunables();
    let target = RangeEntity::new(EntityId(0), Category::PrimaryTarget, "Target", Vec3::new(0.0, 0.0, 600.0));
    let mut sim = playing_with(mission(&[ObjectiveKind::Recon, ObjectiveKind::Eliminate]), vec![target], &t);

    for n in 1..=14 {
        let report = sim.step(&t, idle_frame(n as f32 * 0.1));
        assert!(report.notices.is_empty());
    }
    assert_eq!(sim.objectives.index(), 0);

    let report = sim.step(&t, idle_frame(1.6));
    assert_eq!(sim.objectives.index(), 1);
    assert!(matches!(report.notices.as_slice(), [Notice::ObjectiveAdvanced { index: 1, .. }]));
    assert!(sim.entities[0].alive, "recon does not shoot");
}

#[test]
fn looking_away_resets_recon_dwell() {
    let t = still_tunables();
    let target = RangeEntity::new(EntityId(0), Category::PrimaryTarget, "Target", Vec3::new(0.0, 0.0, 600.0));
    let mut sim = playing_with(mission(&[ObjectiveKind::Recon]), vec![target], &t);

    for n in 1..=10 {
        sim.step(&t, idle_frame(n as f32 * 0.1));
    }
    sim.step(&t, FrameInput { now: 1.1, pointer: Vec2::new(500.0, 300.0), clicks: &[] });
    for n in 12..=20 {
        sim.step(&t, idle_frame(n as f32 * 0.1));
    }

    assert_eq!(sim.phase(), Phase::Playing);
    assert_eq!(sim.objectives.index(), 0);
}

#[test]
fn civilians_do_not_count_as_recon() {
    let t = still_tunables();
    let bystander = RangeEntity::new(EntityId(0), Category::Civilian, "Bystander", Vec3::new(0.0, 0.0, 600.0));
    let mut sim = playing_with(mission(&[ObjectiveKind::Recon]), vec![bystander], &t);

    for n in 1..=40 {
        sim.step(&t, idle_frame(n as f32 * 0.1));
    }
    assert_eq!(sim.phase(), Phase::Playing);
}

// -----------------------------------------------------------------------------
// Fallback mission end to end
// -----------------------------------------------------------------------------

/// Step frames until the entity's projected center is owned by it, then shoot it there.
fn shoot_when_clear(sim: &mut Simulation, t: &Tunables, now: &mut f32, id: EntityId) -> FrameReport {
    for _ in 0..600 {
        *now += 1.0 / 60.0;
        let i = sim.entities.iter().position(|e| e.id == id).expect("entity in roster");
        let center = project(sim.entities[i].pos, Vec2::ZERO, t).screen;
        if pick_target(&sim.entities, center, Vec2::ZERO, t) == Some(i) {
            let clicks = [center];
            return sim.step(t, FrameInput { now: *now, pointer: Vec2::ZERO, clicks: &clicks });
        }
        sim.step(t, idle_frame(*now));
    }
    panic!("{id:?} never came into the clear");
}

fn first_alive(sim: &Simulation, category: Category) -> EntityId {
    sim.entities
        .iter()
        .find(|e| e.alive && e.category == category)
        .map(|e| e.id)
        .expect("target available")
}

#[test]
fn fallback_mission_is_winnable() {
    let t = Tunables { hostile_cooldown: 1000.0, ..still_tunables() };
    let mut sim = playing_fallback(&t);
    let mut now = 0.0;

    let barrel = first_alive(&sim, Category::ExplosiveBarrel);
    shoot_when_clear(&mut sim, &t, &mut now, barrel);
    assert_eq!(sim.objectives.index(), 1);

    let intel = first_alive(&sim, Category::IntelItem);
    shoot_when_clear(&mut sim, &t, &mut now, intel);
    assert_eq!(sim.objectives.index(), 2);

    let target = first_alive(&sim, Category::PrimaryTarget);
    let report = shoot_when_clear(&mut sim, &t, &mut now, target);
    assert_eq!(report.terminal, Some(Terminal::Success));
    assert_eq!(sim.phase(), Phase::Success);
    assert!(sim.player.health > 0);
}

#[test]
fn long_random_play_keeps_invariants() {
    let t = Tunables::default();
    let mut sim = playing_fallback(&t);
    let mut rng = StdRng::seed_from_u64(99);
    let mut last_index = 0;
    let mut terminals = 0;

    for frame in 1..=6000 {
        let now = frame as f32 / 60.0;
        let pointer = Vec2::new(rng.gen_range(-640.0..640.0), rng.gen_range(-360.0..360.0));
        let clicks: Vec<Vec2> = if rng.gen_bool(0.05) { vec![pointer] } else { Vec::new() };

        let report = sim.step(&t, FrameInput { now, pointer, clicks: &clicks });
        terminals += usize::from(report.terminal.is_some());

        assert!(sim.player.health <= sim.player.max_health);
        assert!(sim.objectives.index() >= last_index);
        last_index = sim.objectives.index();
        assert!(sim.particles.len() <= t.particle_capacity);
        for e in &sim.entities {
            assert!(e.pos.z >= t.near_plane, "{} crossed the camera plane", e.label);
            if e.behavior == Behavior::Flanking && e.alive {
                assert!(e.pos.z <= t.flank_far + 1e-3);
            }
            assert_eq!(e.alive, e.hp > 0);
        }
    }

    assert!(terminals <= 1);
    assert_eq!(terminals == 1, sim.phase() != Phase::Playing);
}
