use bevy::log::LogPlugin;
use bevy::prelude::*;
use vibroshear::VibroShearPlugin;

fn main() -> AppExit {
    App::new()
        .add_plugins(LogPlugin::default())
        .add_plugins(VibroShearPlugin)
        .run()
}
