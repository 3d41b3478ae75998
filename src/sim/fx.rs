//! Aim sway, recoil and screen shake.
//!
//! Nothing here owns a timer. Each effect stores the time and strength of its
//! last impulse and is evaluated as a closed-form decay of the current time,
//! so the scheduler can sample it any number of times per frame.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::common::tunables::Tunables;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Impulse {
    at: f32,
    strength: f32,
}

impl Impulse {
    #[inline]
    fn magnitude(self, now: f32, decay: f32) -> f32 {
        let age = (now - self.at).max(0.0);
        self.strength * (-age * decay).exp()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenFx {
    shake: Impulse,
    recoil: Impulse,
    /// Wind drift: unit direction scaled by speed.
    wind: Vec2,
}

impl ScreenFx {
    /// `wind_direction` is in degrees, 0 = blowing toward +x.
    pub fn new(wind_speed: f32, wind_direction: f32) -> Self {
        Self {
            wind: Vec2::from_angle(wind_direction.to_radians()) * wind_speed.max(0.0),
            ..default()
        }
    }

    /// Add a shake impulse. A weaker impulse never cuts a stronger one short.
    pub fn shake(&mut self, now: f32, strength: f32, tunables: &Tunables) {
        let current = self.shake.magnitude(now, tunables.shake_decay);
        self.shake = Impulse { at: now, strength: current.max(strength) };
    }

    /// Recoil stacks: rapid fire climbs further.
    pub fn kick(&mut self, now: f32, tunables: &Tunables) {
        let current = self.recoil.magnitude(now, tunables.recoil_decay);
        self.recoil = Impulse { at: now, strength: current + tunables.recoil_kick };
    }

    pub fn shake_magnitude(&self, now: f32, tunables: &Tunables) -> f32 {
        self.shake.magnitude(now, tunables.shake_decay)
    }

    /// Whole-view offset. Deterministic pseudo-noise, bounded by the magnitude.
    pub fn shake_offset(&self, now: f32, tunables: &Tunables) -> Vec2 {
        let amp = self.shake_magnitude(now, tunables);
        if amp <= 0.01 {
            return Vec2::ZERO;
        }
        let x = (now * 37.0 * TAU).sin() + 0.5 * (now * 61.0 * TAU).sin();
        let y = (now * 41.0 * TAU).cos() + 0.5 * (now * 53.0 * TAU).cos();
        Vec2::new(x, y).clamp_length_max(1.0) * amp
    }

    /// Muzzle climb, straight up in screen space.
    pub fn recoil_offset(&self, now: f32, tunables: &Tunables) -> Vec2 {
        Vec2::Y * self.recoil.magnitude(now, tunables.recoil_decay)
    }

    /// Unsteady aim plus a slow drift downwind.
    pub fn sway_offset(&self, now: f32, tunables: &Tunables) -> Vec2 {
        let wobble = Vec2::new((now * 0.9).sin(), (now * 1.3).cos() * 0.6) * tunables.sway_amplitude;
        let gust = 0.5 + 0.5 * (now * 0.4).sin();
        wobble + self.wind * tunables.wind_sway * gust
    }

    /// Where a click at the pointer actually lands.
    pub fn aim_offset(&self, now: f32, tunables: &Tunables) -> Vec2 {
        self.sway_offset(now, tunables) + self.recoil_offset(now, tunables)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn shake_decays_to_nothing() {
        let t = Tunables::default();
        let mut fx = ScreenFx::default();
        fx.shake(1.0, 20.0, &t);
        assert_relative_eq!(fx.shake_magnitude(1.0, &t), 20.0);
        let mut prev = 20.0;
        for i in 1..100 {
            let m = fx.shake_magnitude(1.0 + i as f32 * 0.05, &t);
            assert!(m < prev);
            prev = m;
        }
        assert_eq!(fx.shake_offset(100.0, &t), Vec2::ZERO);
    }

    #[test]
    fn shake_offset_is_bounded_by_magnitude() {
        let t = Tunables::default();
        let mut fx = ScreenFx::default();
        fx.shake(0.0, 30.0, &t);
        for i in 0..500 {
            let now = i as f32 * 0.003;
            assert!(fx.shake_offset(now, &t).length() <= fx.shake_magnitude(now, &t) + 1e-3);
        }
    }

    #[test]
    fn weak_shake_does_not_cancel_strong_one() {
        let t = Tunables::default();
        let mut fx = ScreenFx::default();
        fx.shake(0.0, t.shake_explosion, &t);
        fx.shake(0.01, t.shake_shot, &t);
        assert!(fx.shake_magnitude(0.01, &t) > t.shake_shot);
    }

    #[test]
    fn recoil_stacks_and_settles() {
        let t = Tunables::default();
        let mut fx = ScreenFx::default();
        fx.kick(0.0, &t);
        fx.kick(0.0, &t);
        assert_relative_eq!(fx.recoil_offset(0.0, &t).y, t.recoil_kick * 2.0);
        assert!(fx.recoil_offset(5.0, &t).y < 1e-3);
    }

    #[test]
    fn wind_pushes_sway_downwind() {
        let t = Tunables::default();
        let calm = ScreenFx::new(0.0, 0.0);
        let windy = ScreenFx::new(10.0, 0.0);
        let now = std::f32::consts::FRAC_PI_2 / 0.4; // gust at full strength
        let d = windy.sway_offset(now, &t) - calm.sway_offset(now, &t);
        assert_relative_eq!(d.x, 10.0 * t.wind_sway, epsilon = 1e-3);
        assert_relative_eq!(d.y, 0.0, epsilon = 1e-3);
    }
}
