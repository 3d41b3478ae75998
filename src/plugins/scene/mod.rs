//! Range drawing.
//!
//! Everything is immediate-mode gizmos redrawn from the simulation each frame.
//! Boxes come from [`project_box`], the same function the hit test uses, so
//! what the player sees is exactly what a click can hit.

use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::mission::Environment;
use crate::plugins::content::LoadedMission;
use crate::plugins::scheduler::FrameSet;
use crate::sim::entity::{Category, RangeEntity};
use crate::sim::projection::project_box;
use crate::sim::{Phase, Simulation};

const RETICLE: Color = Color::srgb(0.2, 1.0, 0.3);
const HOSTILE_MARK: Color = Color::srgb(1.0, 0.15, 0.1);

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Playing), apply_environment)
        .add_systems(
            Update,
            draw_range
                .in_set(FrameSet::Present)
                .run_if(not(in_state(GameState::Briefing))),
        );
}

pub fn category_color(category: Category) -> Color {
    match category {
        Category::PrimaryTarget => Color::srgb(0.95, 0.8, 0.2),
        Category::Civilian => Color::srgb(0.55, 0.7, 0.95),
        Category::Guard => Color::srgb(0.85, 0.35, 0.3),
        Category::ExplosiveBarrel => Color::srgb(0.9, 0.45, 0.1),
        Category::Crate => Color::srgb(0.6, 0.45, 0.3),
        Category::IntelItem => Color::srgb(0.3, 0.95, 0.5),
        Category::BreakableGlass => Color::srgb(0.7, 0.9, 1.0),
    }
}

pub fn environment_color(environment: Environment) -> Color {
    match environment {
        Environment::Urban | Environment::Unknown => Color::srgb(0.09, 0.1, 0.12),
        Environment::Desert => Color::srgb(0.28, 0.21, 0.12),
        Environment::Arctic => Color::srgb(0.55, 0.62, 0.7),
        Environment::Jungle => Color::srgb(0.06, 0.16, 0.08),
        Environment::Night => Color::srgb(0.02, 0.02, 0.05),
    }
}

/// Indices of drawn entities, farthest first so near ones paint over.
pub fn draw_order(entities: &[RangeEntity]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entities.len()).filter(|&i| entities[i].is_drawn()).collect();
    order.sort_by(|&a, &b| entities[b].pos.z.total_cmp(&entities[a].pos.z));
    order
}

fn apply_environment(loaded: Res<LoadedMission>, mut clear: ResMut<ClearColor>) {
    let environment = loaded.mission.as_ref().map(|m| m.environment).unwrap_or_default();
    clear.0 = environment_color(environment);
}

fn draw_range(mut gizmos: Gizmos, tunables: Res<Tunables>, sim: Res<Simulation>) {
    let pointer = sim.pointer();

    for i in draw_order(&sim.entities) {
        let e = &sim.entities[i];
        let b = project_box(e.pos, pointer, &tunables);
        let iso = Isometry2d::from_translation(b.center);
        let color = category_color(e.category);

        if e.alive {
            gizmos.rect_2d(iso, b.size(), color);
            if e.hostile {
                gizmos.rect_2d(iso, b.size() * 0.8, HOSTILE_MARK);
            }
        } else {
            // Wreckage.
            let wreck = color.darker(0.25);
            gizmos.rect_2d(iso, b.size(), wreck);
            gizmos.line_2d(b.min(), b.max(), wreck);
            gizmos.line_2d(Vec2::new(b.min().x, b.max().y), Vec2::new(b.max().x, b.min().y), wreck);
        }
    }

    for p in sim.particles.iter() {
        gizmos.circle_2d(Isometry2d::from_translation(p.pos), p.size, p.color.with_alpha(p.alpha()));
    }

    if sim.phase() == Phase::Playing {
        let aim = sim.aim_point(&tunables);
        gizmos.circle_2d(Isometry2d::from_translation(aim), 14.0, RETICLE);
        gizmos.line_2d(aim - Vec2::X * 22.0, aim + Vec2::X * 22.0, RETICLE);
        gizmos.line_2d(aim - Vec2::Y * 22.0, aim + Vec2::Y * 22.0, RETICLE);
    }
}
