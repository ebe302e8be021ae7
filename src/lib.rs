// Overlay chrome for the Reel video player: activity detection, the two
// auto-hiding bands and the shell that ties them to the playback engine.

pub mod config;
pub mod core;
pub mod models;
pub mod player;
pub mod ui;
pub mod utils;

pub use crate::config::Config;
pub use crate::core::viewmodels::{PlaybackCommand, PlaybackStateStore, Subregion};
pub use crate::player::MediaEngine;
pub use crate::ui::pages::player::{PlayerInput, PlayerOutput, PlayerProps, PlayerShell};
pub use crate::utils::ChromeError;
