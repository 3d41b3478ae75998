use bevy::prelude::*;

use super::*;

fn system(capacity: usize, decay: f32) -> ParticleSystem {
    ParticleSystem::new(capacity, decay, 6.0, 42)
}

#[test]
fn burst_spawns_at_origin_with_full_life() {
    let mut ps = system(100, 0.05);
    ps.spawn_burst(Vec2::new(3.0, 4.0), RICOCHET, 8, 2.0);
    assert_eq!(ps.len(), 8);
    for p in ps.iter() {
        assert_eq!(p.pos, Vec2::new(3.0, 4.0));
        assert_eq!(p.life, 1.0);
        assert_eq!(p.size, 2.0);
        assert!(p.vel.length() <= 6.0 + 1e-4);
    }
}

#[test]
fn life_strictly_decreases_each_tick() {
    let mut ps = system(100, 0.05);
    ps.spawn_burst(Vec2::ZERO, IMPACT, 1, 3.0);
    let mut prev = 1.0;
    while let Some(p) = { ps.iter().next().copied() } {
        ps.advance();
        if let Some(next) = ps.iter().next() {
            assert!(next.life < prev);
            assert!(next.life < p.life);
            prev = next.life;
        }
    }
}

#[test]
fn particle_removed_exactly_when_life_reaches_zero() {
    // Mirror the arithmetic so float rounding matches the system exactly.
    for decay in [0.025_f32, 0.03, 0.05, 0.1, 0.3, 0.7] {
        let mut ps = system(10, decay);
        ps.spawn_burst(Vec2::ZERO, IMPACT, 1, 1.0);

        let mut mirror = 1.0_f32;
        let mut ticks = 0;
        loop {
            ps.advance();
            mirror -= decay;
            ticks += 1;
            if mirror > 0.0 {
                assert_eq!(ps.len(), 1, "removed early at tick {ticks} (decay {decay})");
            } else {
                assert_eq!(ps.len(), 0, "lingered at tick {ticks} (decay {decay})");
                break;
            }
            assert!(ticks < 1000);
        }
    }
}

#[test]
fn particles_move_by_velocity() {
    let mut ps = system(10, 0.1);
    ps.spawn_burst(Vec2::new(1.0, 1.0), MUZZLE, 1, 1.0);
    let before = *ps.iter().next().unwrap();
    ps.advance();
    let after = *ps.iter().next().unwrap();
    assert_eq!(after.pos, before.pos + before.vel);
}

#[test]
fn capacity_drops_oldest_first() {
    let mut ps = system(10, 0.01);
    ps.spawn_burst(Vec2::new(-1.0, 0.0), RICOCHET, 6, 1.0);
    ps.advance();
    ps.spawn_burst(Vec2::new(1.0, 0.0), EXPLOSION, 6, 1.0);

    assert_eq!(ps.len(), 10);
    // Two of the older burst were evicted; all six new ones survive.
    let fresh = ps.iter().filter(|p| p.life == 1.0).count();
    assert_eq!(fresh, 6);
    let old = ps.iter().filter(|p| p.life < 1.0).count();
    assert_eq!(old, 4);
    // Order is preserved: old ones first.
    assert!(ps.iter().take(4).all(|p| p.life < 1.0));
}

#[test]
fn single_burst_larger_than_capacity_keeps_newest() {
    let mut ps = system(5, 0.01);
    ps.spawn_burst(Vec2::ZERO, RICOCHET, 50, 1.0);
    assert_eq!(ps.len(), ps.capacity());
}

#[test]
fn alpha_tracks_life() {
    let mut ps = system(10, 0.25);
    ps.spawn_burst(Vec2::ZERO, RICOCHET, 1, 1.0);
    ps.advance();
    let p = ps.iter().next().unwrap();
    assert_eq!(p.alpha(), 0.75);
}
