//! Text HUD: status line, briefing and outcome panels, narration subtitle.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::content::{LastNarration, LoadedMission, MissionSource};
use crate::plugins::scheduler::FrameSet;
use crate::sim::{PlayerStatus, Simulation};

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudText {
    Status,
    Panel,
    Subtitle,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud)
        .add_systems(Update, update_hud.in_set(FrameSet::Present));
}

fn spawn_hud(mut commands: Commands) {
    let mut text = |name: &'static str, kind: HudText, node: Node, size: f32| {
        commands.spawn((
            Name::new(name),
            kind,
            Text::new(""),
            TextFont { font_size: size, ..default() },
            TextColor(Color::srgb(0.9, 0.92, 0.95)),
            node,
        ));
    };

    text(
        "HudStatus",
        HudText::Status,
        Node { position_type: PositionType::Absolute, top: Val::Px(12.0), left: Val::Px(12.0), ..default() },
        18.0,
    );
    text(
        "HudPanel",
        HudText::Panel,
        Node { position_type: PositionType::Absolute, top: Val::Percent(30.0), left: Val::Percent(25.0), ..default() },
        22.0,
    );
    text(
        "HudSubtitle",
        HudText::Subtitle,
        Node { position_type: PositionType::Absolute, bottom: Val::Px(16.0), left: Val::Px(12.0), ..default() },
        16.0,
    );
}

pub fn status_line(sim: &Simulation) -> String {
    let health = format!("HEALTH {}%", sim.player.health_percent());
    match sim.objectives.active() {
        Some(o) => format!(
            "{health}   OBJECTIVE {}/{}: {}",
            sim.objectives.index() + 1,
            sim.objectives.len(),
            o.description
        ),
        None => health,
    }
}

pub fn briefing_panel(loaded: &LoadedMission) -> String {
    let Some(m) = &loaded.mission else {
        return "Awaiting mission...".into();
    };

    let mut out = format!("{}\n\n{}\n", m.title, m.briefing);
    for (i, o) in m.objectives.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", i + 1, o.description));
    }
    out.push_str(&format!(
        "\n\nTerrain {:?}, wind {:.0} at {:.0} deg",
        m.environment, m.wind_speed, m.wind_direction
    ));
    if loaded.source == MissionSource::Fallback {
        out.push_str("\n(offline mission)");
    }
    out.push_str("\n\n[Enter] deploy");
    out
}

pub fn outcome_panel(state: GameState, player: &PlayerStatus) -> String {
    let headline = match state {
        GameState::Success => "MISSION COMPLETE",
        _ => "MISSION FAILED",
    };
    format!(
        "{headline}\n\nHealth {}%\nShots {}  Hits {}  Accuracy {:.0}%\n\n[R] restart",
        player.health_percent(),
        player.shots,
        player.hits,
        player.accuracy() * 100.0
    )
}

fn update_hud(
    state: Res<State<GameState>>,
    sim: Res<Simulation>,
    loaded: Res<LoadedMission>,
    narration: Res<LastNarration>,
    mut texts: Query<(&mut Text, &HudText)>,
) {
    let state = *state.get();
    for (mut text, kind) in &mut texts {
        let value = match (kind, state) {
            (HudText::Status, GameState::Playing) => status_line(&sim),
            (HudText::Status, _) => String::new(),
            (HudText::Panel, GameState::Briefing) => briefing_panel(&loaded),
            (HudText::Panel, s) if s.is_terminal() => outcome_panel(s, &sim.player),
            (HudText::Panel, _) => String::new(),
            (HudText::Subtitle, _) => narration.0.as_ref().map(|c| c.text.clone()).unwrap_or_default(),
        };
        if text.0 != value {
            text.0 = value;
        }
    }
}
