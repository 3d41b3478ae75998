//! Content plugin: mission fetch and narration.
//!
//! Provider calls run on the IO task pool and are polled every frame. Each call
//! carries a [`RequestId`]; a response is applied only while its id is still
//! the latest for that purpose, so a restart or a newer request silently
//! drops older answers.
//!
//! ```text
//!   OnEnter(Briefing) ─▶ request_mission ─▶ MissionTask ─▶ poll_missions ─▶ LoadedMission
//!                                                             │
//!   FrameNotice::ObjectiveAdvanced ─▶ NarrationTask ◀─────────┘ (briefing)
//!                                         │
//!                                   poll_narration ─▶ LastNarration
//! ```
//!
//! Every failure path ends in a playable state: fetch errors, malformed
//! payloads and timeouts fall back to [`Mission::fallback`]; narration errors
//! are logged and skipped.

pub mod provider;
pub mod requests;

use std::sync::Arc;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task, TaskPool, block_on, futures_lite::future};

use crate::common::{config, state::GameState};
use crate::mission::{ContentError, Mission};
use crate::plugins::scheduler::{FrameNotice, FrameSet};
use crate::sim::Notice;

use self::provider::{ContentProvider, FileProvider, OfflineProvider, SpeechClip};
use self::requests::{ContentRequests, Purpose, RequestId};

/// Seconds to wait for a mission before using the fallback.
pub const MISSION_TIMEOUT: f32 = 8.0;

#[derive(Resource, Clone)]
pub struct Content(pub Arc<dyn ContentProvider>);

impl Content {
    pub fn new(provider: impl ContentProvider) -> Self {
        Self(Arc::new(provider))
    }

    /// File-backed when `RANGE_MISSION_FILE` is set, otherwise offline.
    pub fn from_env() -> Self {
        match config::mission_file() {
            Some(path) => {
                info!("missions from {}", path.display());
                Self::new(FileProvider::new(path))
            }
            None => Self::new(OfflineProvider),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissionSource {
    #[default]
    Provider,
    Fallback,
}

/// The mission for the next run. Empty while a request is in flight.
#[derive(Resource, Debug, Default)]
pub struct LoadedMission {
    pub mission: Option<Mission>,
    pub source: MissionSource,
}

impl LoadedMission {
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.mission.is_some()
    }
}

#[derive(Resource, Debug, Default)]
pub struct LastNarration(pub Option<SpeechClip>);

#[derive(Component)]
pub struct MissionTask {
    id: RequestId,
    issued_at: f32,
    task: Task<Result<String, ContentError>>,
}

#[derive(Component)]
pub struct NarrationTask {
    id: RequestId,
    task: Task<Result<SpeechClip, ContentError>>,
}

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<Content>() {
        app.insert_resource(Content::from_env());
    }

    app.init_resource::<ContentRequests>()
        .init_resource::<LoadedMission>()
        .init_resource::<LastNarration>()
        .add_systems(OnEnter(GameState::Briefing), request_mission)
        .add_systems(
            Update,
            (poll_missions, narrate_objectives, poll_narration)
                .chain()
                .in_set(FrameSet::Present),
        );
}

/// Parse a provider answer, degrading every failure to the built-in mission.
pub fn resolve_mission(result: Result<String, ContentError>) -> (Mission, MissionSource) {
    match result.and_then(|json| Mission::from_json(&json)) {
        Ok(mission) => {
            info!("mission loaded: {}", mission.title);
            (mission, MissionSource::Provider)
        }
        Err(e) => {
            warn!("mission unavailable ({e}), using fallback");
            (Mission::fallback(), MissionSource::Fallback)
        }
    }
}

fn io_pool() -> &'static IoTaskPool {
    IoTaskPool::get_or_init(TaskPool::default)
}

fn request_mission(
    mut commands: Commands,
    time: Res<Time>,
    content: Res<Content>,
    mut requests: ResMut<ContentRequests>,
    mut loaded: ResMut<LoadedMission>,
) {
    // Anything still in flight belongs to the previous run.
    requests.invalidate();
    *loaded = LoadedMission::default();

    let id = requests.issue(Purpose::Mission);
    let provider = Arc::clone(&content.0);
    let task = io_pool().spawn(async move { provider.fetch_mission() });
    commands.spawn((
        Name::new("MissionRequest"),
        MissionTask { id, issued_at: time.elapsed_secs(), task },
    ));
    debug!("mission request {} issued", id.0);
}

fn spawn_narration(commands: &mut Commands, content: &Content, requests: &mut ContentRequests, text: String) {
    let id = requests.issue(Purpose::Narration);
    let provider = Arc::clone(&content.0);
    let task = io_pool().spawn(async move { provider.narrate(&text) });
    commands.spawn((Name::new("NarrationRequest"), NarrationTask { id, task }));
}

fn poll_missions(
    mut commands: Commands,
    time: Res<Time>,
    content: Res<Content>,
    mut requests: ResMut<ContentRequests>,
    mut loaded: ResMut<LoadedMission>,
    mut tasks: Query<(Entity, &mut MissionTask)>,
) {
    for (entity, mut pending) in &mut tasks {
        if !requests.is_latest(Purpose::Mission, pending.id) {
            debug!("dropping stale mission request {}", pending.id.0);
            commands.entity(entity).despawn();
            continue;
        }

        let result = match block_on(future::poll_once(&mut pending.task)) {
            Some(result) => result,
            None if time.elapsed_secs() - pending.issued_at > MISSION_TIMEOUT => {
                Err(ContentError::TimedOut(MISSION_TIMEOUT))
            }
            None => continue,
        };

        requests.settle(Purpose::Mission, pending.id);
        commands.entity(entity).despawn();

        let (mission, source) = resolve_mission(result);
        let line = format!("{}. {}", mission.title, mission.briefing);
        loaded.mission = Some(mission);
        loaded.source = source;

        spawn_narration(&mut commands, &content, &mut requests, line);
    }
}

fn narrate_objectives(
    mut commands: Commands,
    content: Res<Content>,
    mut requests: ResMut<ContentRequests>,
    mut notices: MessageReader<FrameNotice>,
) {
    for FrameNotice(notice) in notices.read() {
        if let Notice::ObjectiveAdvanced { description, .. } = notice {
            spawn_narration(&mut commands, &content, &mut requests, description.clone());
        }
    }
}

fn poll_narration(
    mut commands: Commands,
    mut requests: ResMut<ContentRequests>,
    mut last: ResMut<LastNarration>,
    mut tasks: Query<(Entity, &mut NarrationTask)>,
) {
    for (entity, mut pending) in &mut tasks {
        if !requests.is_latest(Purpose::Narration, pending.id) {
            commands.entity(entity).despawn();
            continue;
        }

        let Some(result) = block_on(future::poll_once(&mut pending.task)) else {
            continue;
        };
        requests.settle(Purpose::Narration, pending.id);
        commands.entity(entity).despawn();

        match result {
            Ok(clip) => {
                debug!("narration ready: {}", clip.text);
                last.0 = Some(clip);
            }
            Err(e) => warn!("narration skipped: {e}"),
        }
    }
}
