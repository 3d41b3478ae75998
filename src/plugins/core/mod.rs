//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::{config, tunables::Tunables};

pub fn plugin(app: &mut App) {
    // Tests may insert their own tunables first.
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::load(config::tunables_path().as_deref()));
    }
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}
